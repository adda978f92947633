//! # Scene Management Module
//!
//! The retained scene graph of the engine: the object container, individual
//! objects with their meshes and transforms, lights, and the vertex format.
//!
//! ## Key Components
//!
//! - [`Scene`] - Container that owns objects, lights, materials and the camera
//! - [`Object`] - A mesh with a material reference and a transform
//! - [`Light`] - Ambient and spot lights
//! - [`Vertex3D`] - Vertex layout with position and normal
//!
//! Objects and lights are addressed through the [`ObjectId`] and [`LightId`]
//! handles returned when they are added; the scene keeps ownership.

pub mod light;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use light::{AmbientLight, Light, ShadowSettings, SpotLight};
pub use object::{DrawObject, Mesh, Object};
pub use scene::{LightId, ObjectId, Scene, SceneStatistics};
pub use vertex::Vertex3D;
