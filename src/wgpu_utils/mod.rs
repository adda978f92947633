//! Thin helpers over wgpu
//!
//! Builders for bind group layouts and bind groups, binding type shorthands and
//! a typed uniform buffer. Used by the materials, objects and render engine.

pub mod binding_builder;
pub mod binding_types;
pub mod uniform_buffer;

pub use binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc};
pub use uniform_buffer::UniformBuffer;
