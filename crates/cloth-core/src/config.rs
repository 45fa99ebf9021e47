use glam::Vec3;

use crate::error::{ClothError, Result};

/// Stiffness and damping of one spring class.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpringParams {
    /// Hooke constant `k`.
    pub stiffness: f32,
    /// Damping `b` applied to the relative velocity along the spring.
    pub damping: f32,
}

impl SpringParams {
    pub const fn new(stiffness: f32, damping: f32) -> Self {
        Self { stiffness, damping }
    }
}

impl Default for SpringParams {
    fn default() -> Self {
        Self::new(2.5, 3.0)
    }
}

/// Oscillating wind: `direction * amplitude * sin(frequency * t)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Gust {
    pub direction: Vec3,
    pub amplitude: f32,
    pub frequency: f32,
}

impl Gust {
    pub fn at(&self, t: f32) -> Vec3 {
        self.direction * self.amplitude * (self.frequency * t).sin()
    }
}

impl Default for Gust {
    fn default() -> Self {
        Self {
            direction: Vec3::Z,
            amplitude: 0.05,
            frequency: 1.0,
        }
    }
}

/// Tuning of a single cloth. Every cloth carries its own copy, so cloths
/// with different tuning can share a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct ClothConfig {
    pub knots_per_side: u32,
    /// Rest pitch of the grid; also the adjacent spring rest length.
    pub knot_spacing: f32,
    pub mass: f32,
    /// Per-step multiplicative decay of each knot's residual force.
    pub force_damping: f32,
    pub adjacent: SpringParams,
    pub diagonal: SpringParams,
    pub flex: SpringParams,
    pub gust: Option<Gust>,
}

impl Default for ClothConfig {
    fn default() -> Self {
        Self {
            knots_per_side: 33,
            knot_spacing: 0.5,
            mass: 1.0,
            force_damping: 0.95,
            adjacent: SpringParams::default(),
            diagonal: SpringParams::default(),
            flex: SpringParams::default(),
            gust: None,
        }
    }
}

impl ClothConfig {
    pub fn validate(&self) -> Result<()> {
        if self.knots_per_side < 2 {
            return Err(ClothError::InvalidGridSize(self.knots_per_side));
        }
        if !(self.knot_spacing.is_finite() && self.knot_spacing > 0.0) {
            return Err(ClothError::InvalidSpacing(self.knot_spacing));
        }
        validate_mass(self.mass)?;
        validate_force_damping(self.force_damping)?;
        Ok(())
    }

    pub fn knot_count(&self) -> usize {
        let n = self.knots_per_side as usize;
        n * n
    }
}

pub(crate) fn validate_mass(mass: f32) -> Result<()> {
    if mass.is_finite() && mass > 0.0 {
        Ok(())
    } else {
        Err(ClothError::InvalidMass(mass))
    }
}

pub(crate) fn validate_force_damping(force_damping: f32) -> Result<()> {
    if (0.0..=1.0).contains(&force_damping) {
        Ok(())
    } else {
        Err(ClothError::InvalidForceDamping(force_damping))
    }
}

/// How gravity is folded into knot motion. A scene uses exactly one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Integrator {
    /// Classic RK4 on `dx/dt = v, dv/dt = g`.
    #[default]
    RungeKutta4,
    /// `v += g dt`, then `x += v dt`.
    Euler,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneConfig {
    /// Sub-steps run per rendered frame.
    pub substeps: u32,
    pub gravity: Vec3,
    pub integrator: Integrator,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            substeps: 20,
            gravity: Vec3::new(0.0, -9.82, 0.0),
            integrator: Integrator::RungeKutta4,
        }
    }
}

impl SceneConfig {
    pub fn validate(&self) -> Result<()> {
        if self.substeps == 0 {
            return Err(ClothError::InvalidSubsteps);
        }
        Ok(())
    }
}
