use glam::Vec3;

use crate::error::{ClothError, Result};
use crate::knot::Knot;

/// Push-out direction for a knot sitting exactly on the sphere center.
const FALLBACK_NORMAL: Vec3 = Vec3::Y;

/// A kinematic sphere that displaces knots found inside it.
///
/// Collisions never move the sphere; it only moves through
/// [`Self::set_position`] or its own velocity in [`Self::advance`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SphereCollider {
    radius: f32,
    position: Vec3,
    initial_position: Vec3,
    velocity: Vec3,
}

impl SphereCollider {
    pub fn new(radius: f32, position: Vec3) -> Result<Self> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(ClothError::InvalidRadius(radius));
        }
        Ok(Self {
            radius,
            position,
            initial_position: position,
            velocity: Vec3::ZERO,
        })
    }

    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.velocity = velocity;
        self
    }

    /// Positional correction only: a knot strictly inside the sphere is moved
    /// to its surface along the center-to-knot direction. Velocity is left
    /// untouched. Returns whether the knot moved.
    pub fn resolve_collision(&self, knot: &mut Knot) -> bool {
        let offset = knot.position() - self.position;
        let distance = offset.length();
        if distance >= self.radius {
            return false;
        }

        let normal = if distance > 0.0 { offset / distance } else { FALLBACK_NORMAL };
        let penetration = self.radius - distance;
        knot.set_position(knot.position() + penetration * normal);
        true
    }

    /// Move by the sphere's own velocity.
    pub fn advance(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }

    pub fn reset(&mut self) {
        self.position = self.initial_position;
        self.velocity = Vec3::ZERO;
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }
}
