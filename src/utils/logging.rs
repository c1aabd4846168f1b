//! Logging setup and run banners.

use std::fs::OpenOptions;
use std::io::Write;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// Initializes the tracing subscriber. `RUST_LOG` overrides the default
/// `info` level.
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Logs the run banner.
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 mass conversion run starting");
    info!("📋 variants: {}", config.variants.join(", "));
    info!("📊 session slots: {}", config.max_sessions);
    info!("{}", "=".repeat(60));
}

/// Logs the closing statistics block.
pub fn log_final_stats(
    config: &Config,
    converted: usize,
    skipped: usize,
    no_data: usize,
    failed: usize,
) {
    info!("{}", "=".repeat(60));
    info!(
        "run finished: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ converted rows: {converted}");
    info!("↩ skipped rows: {skipped}");
    info!("∅ no-data variants: {no_data}");
    info!("❌ failed variants: {failed}");
    info!("{}", "=".repeat(60));
    info!("status log: {}", config.status_log_file);
}

/// Appends a timestamped line to the error log. Called for run-level
/// failures only; worker-level failures stay inside the status entry.
pub fn append_error_log(path: &str, error: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(
        file,
        "{} - ERROR - {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        error
    )?;
    Ok(())
}
