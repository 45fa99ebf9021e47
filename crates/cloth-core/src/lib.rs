//! Mass-spring cloth simulation.
//!
//! A square grid of knots joined by structural, shear and bend springs,
//! integrated under gravity, spring-damper forces and wind, with point
//! versus sphere collision resolution. Rendering is left to the caller,
//! which reads knot positions (or a [`geometry::ClothGeometry`]) after each
//! frame.

pub mod collider;
pub mod config;
pub mod error;
pub mod forces;
pub mod geometry;
pub mod knot;
pub mod mesh;
pub mod scene;
pub mod setups;

pub use collider::SphereCollider;
pub use config::{ClothConfig, Gust, Integrator, SceneConfig, SpringParams};
pub use error::{ClothError, Result};
pub use forces::spring::SpringClass;
pub use geometry::{ClothGeometry, RenderVertex};
pub use knot::Knot;
pub use mesh::ClothMesh;
pub use scene::{Body, BodyId, Scene};
pub use setups::Setup;
