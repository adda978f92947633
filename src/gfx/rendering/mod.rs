//! Core rendering functionality
//!
//! Pipelines, the per-frame passes and surface management.

pub mod pipeline_manager;
pub mod render_engine;

// Re-export main types
pub use pipeline_manager::{PipelineConfig, PipelineManager, PipelineStats};
pub use render_engine::{EngineSettings, RenderEngine, SurfaceErrorAction};
