use thiserror::Error;

pub type Result<T, E = ClothError> = std::result::Result<T, E>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClothError {
    #[error("knot index {index} is out of bounds (cloth has {count} knots)")]
    KnotOutOfBounds { index: usize, count: usize },

    #[error("a cloth needs at least 2 knots per side, got {0}")]
    InvalidGridSize(u32),

    #[error("knot spacing must be positive and finite, got {0}")]
    InvalidSpacing(f32),

    #[error("knot mass must be positive and finite, got {0}")]
    InvalidMass(f32),

    #[error("force damping must lie in [0, 1], got {0}")]
    InvalidForceDamping(f32),

    #[error("sphere radius must be positive and finite, got {0}")]
    InvalidRadius(f32),

    #[error("time step must be finite and non-negative, got {0}")]
    InvalidTimeStep(f32),

    #[error("a scene needs at least one sub-step per frame")]
    InvalidSubsteps,

    #[error("there is no cloth setup number {0} (valid: 1..=5)")]
    UnknownSetup(u32),

    #[error("no body with id {0} in the scene")]
    BodyNotFound(usize),

    #[error("body {0} is not a cloth")]
    NotACloth(usize),

    #[error("body {0} is not a collider")]
    NotACollider(usize),
}
