use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::Context;
use connect4_client::ClientConfig;
use tracing_subscriber::EnvFilter;

/// Send logs to the file named by `CONNECT4_LOG_FILE`, filtered by `RUST_LOG`
/// (default `info`). The terminal belongs to the UI, so without a log file
/// nothing is installed.
pub fn init_logging(config: &ClientConfig) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}
