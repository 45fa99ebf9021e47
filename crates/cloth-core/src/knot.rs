use glam::Vec3;

use crate::config;
use crate::error::Result;
use crate::forces::gravity::{euler_step, rk4_step};
use crate::forces::spring::SpringClass;

/// One point mass of the cloth grid.
///
/// Neighbors are stored as indices into the owning [`ClothMesh`](crate::ClothMesh)'s
/// knot array; a knot never owns another knot.
#[derive(Clone, Debug)]
pub struct Knot {
    index: u32,
    position: Vec3,
    initial_position: Vec3,
    velocity: Vec3,
    force: Vec3,
    wind_force: Vec3,
    mass: f32,
    force_damping: f32,
    is_static: bool,
    adjacent: Vec<u32>,
    diagonal: Vec<u32>,
    flex: Vec<u32>,
}

impl Knot {
    pub fn new(index: u32, position: Vec3) -> Self {
        Self {
            index,
            position,
            initial_position: position,
            velocity: Vec3::ZERO,
            force: Vec3::ZERO,
            wind_force: Vec3::ZERO,
            mass: 1.0,
            force_damping: 0.95,
            is_static: false,
            adjacent: Vec::with_capacity(4),
            diagonal: Vec::with_capacity(4),
            flex: Vec::with_capacity(4),
        }
    }

    pub fn with_mass(mut self, mass: f32, force_damping: f32) -> Result<Self> {
        config::validate_mass(mass)?;
        config::validate_force_damping(force_damping)?;
        self.mass = mass;
        self.force_damping = force_damping;
        Ok(self)
    }

    /// Restore the recorded initial position and clear velocity and force.
    pub fn reset(&mut self) {
        self.position = self.initial_position;
        self.velocity = Vec3::ZERO;
        self.force = Vec3::ZERO;
    }

    /// RK4 step of `dx/dt = v, dv/dt = acceleration`. Spring forces are not
    /// part of this ODE; they reach the velocity through [`Self::integrate_force`].
    pub fn integrate_velocity(&mut self, acceleration: Vec3, dt: f32) {
        if self.is_static {
            return;
        }
        let (position, velocity) = rk4_step(self.position, self.velocity, acceleration, dt);
        self.position = position;
        self.velocity = velocity;
    }

    /// `velocity += gravity * dt`.
    pub fn apply_g(&mut self, gravity: Vec3, dt: f32) {
        if self.is_static {
            return;
        }
        self.velocity += gravity * dt;
    }

    /// [`Self::apply_g`] followed by an explicit position advance.
    pub fn integrate_euler(&mut self, gravity: Vec3, dt: f32) {
        if self.is_static {
            return;
        }
        let (position, velocity) = euler_step(self.position, self.velocity, gravity, dt);
        self.position = position;
        self.velocity = velocity;
    }

    /// Convert the accumulated force into velocity, then decay the residual force.
    pub fn integrate_force(&mut self, dt: f32) {
        if self.is_static {
            return;
        }
        self.velocity += (self.force / self.mass) * dt;
        self.force *= self.force_damping;
    }

    pub fn add_force(&mut self, force: Vec3) {
        self.force += force;
    }

    pub fn add_adjacent_neighbor(&mut self, index: u32) {
        self.adjacent.push(index);
    }

    pub fn add_diagonal_neighbor(&mut self, index: u32) {
        self.diagonal.push(index);
    }

    pub fn add_flex_neighbor(&mut self, index: u32) {
        self.flex.push(index);
    }

    pub fn set_static(&mut self) {
        self.is_static = true;
    }

    pub fn set_non_static(&mut self) {
        self.is_static = false;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Move the knot and make that its reset target.
    pub fn place(&mut self, position: Vec3) {
        self.position = position;
        self.initial_position = position;
    }

    pub fn set_wind_force(&mut self, wind: Vec3) {
        self.wind_force = wind;
    }

    pub(crate) fn set_mass(&mut self, mass: f32, force_damping: f32) {
        self.mass = mass;
        self.force_damping = force_damping;
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn initial_position(&self) -> Vec3 {
        self.initial_position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn force(&self) -> Vec3 {
        self.force
    }

    pub fn wind_force(&self) -> Vec3 {
        self.wind_force
    }

    pub fn mass(&self) -> f32 {
        self.mass
    }

    pub fn force_damping(&self) -> f32 {
        self.force_damping
    }

    pub fn is_static(&self) -> bool {
        self.is_static
    }

    pub fn adjacent_neighbors(&self) -> &[u32] {
        &self.adjacent
    }

    pub fn diagonal_neighbors(&self) -> &[u32] {
        &self.diagonal
    }

    pub fn flex_neighbors(&self) -> &[u32] {
        &self.flex
    }

    pub fn neighbors(&self, class: SpringClass) -> &[u32] {
        match class {
            SpringClass::Adjacent => &self.adjacent,
            SpringClass::Diagonal => &self.diagonal,
            SpringClass::Flex => &self.flex,
        }
    }
}
