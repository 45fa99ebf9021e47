use glam::Vec3;

use crate::collider::SphereCollider;
use crate::config::{Integrator, SceneConfig};
use crate::error::{ClothError, Result};
use crate::mesh::ClothMesh;

/// Everything a scene can simulate.
#[derive(Debug)]
pub enum Body {
    /// Steppable: receives forces and integration every sub-step.
    Cloth(ClothMesh),
    /// Collidable: pushes cloth knots out of itself every sub-step.
    Sphere(SphereCollider),
}

impl Body {
    pub fn is_steppable(&self) -> bool {
        matches!(self, Body::Cloth(_))
    }

    pub fn is_collidable(&self) -> bool {
        matches!(self, Body::Sphere(_))
    }

    pub fn reset(&mut self) {
        match self {
            Body::Cloth(mesh) => mesh.reset(),
            Body::Sphere(sphere) => sphere.reset(),
        }
    }
}

/// Handle returned by [`Scene::add_body`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyId(pub usize);

/// Owns every body and advances them with a fixed sub-step.
///
/// Each sub-step runs, in this order: collision resolution against the
/// previous sub-step's positions, spring force accumulation and force
/// integration, then gravity integration. Kinematic colliders move last.
#[derive(Debug)]
pub struct Scene {
    bodies: Vec<Body>,
    config: SceneConfig,
    t: f32,
    dt: f32,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        log::debug!(
            "scene created: {} sub-steps per frame, gravity {}, {:?}",
            config.substeps,
            config.gravity,
            config.integrator
        );
        Ok(Self {
            bodies: Vec::new(),
            config,
            t: 0.0,
            dt: 0.0,
        })
    }

    pub fn add_body(&mut self, body: Body) -> BodyId {
        self.bodies.push(body);
        BodyId(self.bodies.len() - 1)
    }

    pub fn add_cloth(&mut self, mesh: ClothMesh) -> BodyId {
        self.add_body(Body::Cloth(mesh))
    }

    pub fn add_sphere(&mut self, sphere: SphereCollider) -> BodyId {
        self.add_body(Body::Sphere(sphere))
    }

    /// Run one sub-step of size `self.dt` at time `self.t`.
    pub fn step(&mut self) {
        self.check_collisions();
        self.apply_spring_force();
        self.integrate_velocities();
        self.advance_colliders();
    }

    /// Run a whole frame: `frame_dt` is split evenly over the configured
    /// number of sub-steps. A negative or non-finite `frame_dt` skips the frame.
    pub fn advance_frame(&mut self, t: f32, frame_dt: f32) {
        if !(frame_dt.is_finite() && frame_dt >= 0.0) {
            log::warn!("skipping frame at t = {t}: bad frame time {frame_dt}");
            return;
        }
        self.t = t;
        self.dt = frame_dt / self.config.substeps as f32;
        for _ in 0..self.config.substeps {
            self.step();
        }
        log::trace!("frame at t = {t} advanced {} sub-steps of {}", self.config.substeps, self.dt);
    }

    fn check_collisions(&mut self) {
        for c in 0..self.bodies.len() {
            let Body::Sphere(sphere) = self.bodies[c] else {
                continue;
            };
            for body in self.bodies.iter_mut() {
                if let Body::Cloth(mesh) = body {
                    mesh.resolve_collisions(&sphere);
                }
            }
        }
    }

    fn apply_spring_force(&mut self) {
        for body in self.bodies.iter_mut() {
            if let Body::Cloth(mesh) = body {
                mesh.apply_spring_force(self.t, self.dt);
            }
        }
    }

    fn integrate_velocities(&mut self) {
        for body in self.bodies.iter_mut() {
            if let Body::Cloth(mesh) = body {
                mesh.integrate(self.config.integrator, self.config.gravity, self.dt);
            }
        }
    }

    fn advance_colliders(&mut self) {
        for body in self.bodies.iter_mut() {
            if let Body::Sphere(sphere) = body {
                sphere.advance(self.dt);
            }
        }
    }

    /// Restore every body to its initial configuration. Never call mid-step.
    pub fn reset(&mut self) {
        for body in self.bodies.iter_mut() {
            body.reset();
        }
        log::debug!("scene reset ({} bodies)", self.bodies.len());
    }

    pub fn body(&self, id: BodyId) -> Result<&Body> {
        self.bodies.get(id.0).ok_or(ClothError::BodyNotFound(id.0))
    }

    pub fn body_mut(&mut self, id: BodyId) -> Result<&mut Body> {
        self.bodies.get_mut(id.0).ok_or(ClothError::BodyNotFound(id.0))
    }

    pub fn cloth(&self, id: BodyId) -> Result<&ClothMesh> {
        match self.body(id)? {
            Body::Cloth(mesh) => Ok(mesh),
            _ => Err(ClothError::NotACloth(id.0)),
        }
    }

    pub fn cloth_mut(&mut self, id: BodyId) -> Result<&mut ClothMesh> {
        match self.body_mut(id)? {
            Body::Cloth(mesh) => Ok(mesh),
            _ => Err(ClothError::NotACloth(id.0)),
        }
    }

    pub fn sphere_mut(&mut self, id: BodyId) -> Result<&mut SphereCollider> {
        match self.body_mut(id)? {
            Body::Sphere(sphere) => Ok(sphere),
            _ => Err(ClothError::NotACollider(id.0)),
        }
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn set_time(&mut self, t: f32) {
        self.t = t;
    }

    /// Sub-step size used by [`Self::step`]. A negative or non-finite `dt`
    /// is rejected and the previous value kept.
    pub fn set_dt(&mut self, dt: f32) -> Result<()> {
        if !(dt.is_finite() && dt >= 0.0) {
            log::warn!("rejecting sub-step size {dt}");
            return Err(ClothError::InvalidTimeStep(dt));
        }
        self.dt = dt;
        Ok(())
    }

    pub fn set_acceleration(&mut self, acceleration: Vec3) {
        self.config.gravity = acceleration;
    }

    pub fn set_integrator(&mut self, integrator: Integrator) {
        self.config.integrator = integrator;
    }

    pub fn set_substeps(&mut self, substeps: u32) -> Result<()> {
        if substeps == 0 {
            return Err(ClothError::InvalidSubsteps);
        }
        self.config.substeps = substeps;
        Ok(())
    }

    pub fn acceleration(&self) -> Vec3 {
        self.config.gravity
    }

    pub fn time(&self) -> f32 {
        self.t
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }
}
