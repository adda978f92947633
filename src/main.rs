use anyhow::Context;
use clap::Parser;

use haggis_clock::{
    logging::{init_logging, LoggingConfig},
    ClockApp, ClockConfig,
};

fn main() -> anyhow::Result<()> {
    let config = ClockConfig::parse();
    init_logging(LoggingConfig::with_filter(config.log_filter.clone()));

    log::info!("Starting haggis-clock {}", env!("CARGO_PKG_VERSION"));

    let app = ClockApp::new(config).context("failed to set up the clock")?;
    app.run().context("clock stopped with an error")?;

    log::info!("Shut down cleanly");
    Ok(())
}
