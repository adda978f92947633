//! Haggis Clock
//!
//! An animated 3D analog clock on a small wgpu + winit engine. The dial,
//! hands and hour markings are built procedurally, lit by a shadow-casting
//! spot light and updated from the local time once per second.
//!
//! ```no_run
//! use haggis_clock::{ClockApp, ClockConfig};
//!
//! let app = ClockApp::new(ClockConfig::default())?;
//! app.run()?;
//! # Ok::<(), haggis_clock::EngineError>(())
//! ```

pub mod app;
pub mod clock;
pub mod config;
pub mod error;
pub mod gfx;
pub mod logging;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::{ClockApp, ClockScene};
pub use config::ClockConfig;
pub use error::{ClockError, EngineError};
