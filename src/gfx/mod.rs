//! # Graphics Module
//!
//! The rendering runtime the clock is built on: procedural meshes, a small
//! scene container, Phong materials, an orbit camera and a wgpu renderer with
//! a single shadow-mapped spot light.
//!
//! ## Architecture Overview
//!
//! - **Geometry** ([`geometry`]) - Boxes, planes, cylinders, extruded outlines and helper lines
//! - **Scene Management** ([`scene`]) - Objects, lights and materials addressed by handle
//! - **Resource Management** ([`resources`]) - Materials, bind group layouts, depth and shadow textures
//! - **Rendering Pipeline** ([`rendering`]) - Shadow pass followed by a Phong pass
//! - **Camera System** ([`camera`]) - Orbit camera with zoom bounds and optional panning
//! - **Debug Helpers** ([`debug`]) - Spot-light cone and shadow-camera frustum
//!
//! ## Usage
//!
//! Everything except [`RenderEngine`] works without a GPU:
//!
//! ```rust
//! use cgmath::Vector3;
//! use haggis_clock::gfx::{
//!     camera::{CameraController, CameraManager, OrbitCamera},
//!     geometry::generate_box,
//!     scene::{Object, Scene},
//! };
//!
//! let camera = OrbitCamera::new(8.0, 0.3, 0.0, Vector3::new(0.0, 0.0, 0.0), 1.5);
//! let mut scene = Scene::new(CameraManager::new(camera, CameraController::new(0.005, 0.5)));
//! let id = scene.add_object(Object::new("box", &generate_box(1.0, 1.0, 1.0)));
//! assert!(scene.object(id).is_some());
//! ```

pub mod camera;
pub mod debug;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
