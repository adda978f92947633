//! Command-line configuration

use std::time::Duration;

use clap::Parser;

use crate::{clock::HourMode, gfx::rendering::EngineSettings};

/// An animated 3D analog clock
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(name = "haggis-clock", version, about)]
pub struct ClockConfig {
    /// Show the spot-light cone and shadow-camera frustum
    #[arg(long)]
    pub debug: bool,

    /// How the hour hand moves between hours
    #[arg(long, value_enum, default_value_t = HourMode::Creep)]
    pub hour_mode: HourMode,

    /// Initial window width in logical pixels
    #[arg(long, default_value_t = 1200)]
    pub width: u32,

    /// Initial window height in logical pixels
    #[arg(long, default_value_t = 800)]
    pub height: u32,

    /// Side length of the square shadow map
    #[arg(long, default_value_t = 512, value_parser = clap::value_parser!(u32).range(16..=8192))]
    pub shadow_map_size: u32,

    /// Present frames as fast as possible instead of syncing to the display
    #[arg(long)]
    pub no_vsync: bool,

    /// Milliseconds between hand updates
    #[arg(long, default_value_t = 1000, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_interval_ms: u64,

    /// Log filter in env_logger syntax; overrides RUST_LOG
    #[arg(long)]
    pub log_filter: Option<String>,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            debug: false,
            hour_mode: HourMode::Creep,
            width: 1200,
            height: 800,
            shadow_map_size: 512,
            no_vsync: false,
            tick_interval_ms: 1000,
            log_filter: None,
        }
    }
}

impl ClockConfig {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            width: self.width.max(1),
            height: self.height.max(1),
            vsync: !self.no_vsync,
        }
    }
}
