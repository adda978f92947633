//! Debug visualizations
//!
//! Wireframe helpers drawn as ordinary scene objects with emissive materials,
//! so they render through the line pipeline without extra GPU plumbing.

pub mod light_helpers;

pub use light_helpers::DebugHelpers;
