pub mod config;
pub mod generate;
pub mod profile;
pub mod update;

use tracing::level_filters::LevelFilter;

/// Install the log output for the daemon.
///
/// Records emitted through `log` (which `ptpconf` uses) are forwarded into
/// `tracing`.
pub fn setup_logger(level: LevelFilter) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_log::LogTracer::init()?;

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(true)
        .try_init()
}
