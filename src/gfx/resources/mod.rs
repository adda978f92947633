//! GPU resource management
//!
//! Materials, colors, global uniforms, bind group layouts and depth textures.

pub mod color;
pub mod global_bindings;
pub mod layouts;
pub mod material;
pub mod texture_resource;

// Re-export main types
pub use color::{hex_to_linear_rgba, srgb_to_linear};
pub use global_bindings::{GlobalBindings, GlobalUBOContent};
pub use layouts::SceneLayouts;
pub use material::{Material, MaterialManager, DEFAULT_MATERIAL};
pub use texture_resource::TextureResource;
