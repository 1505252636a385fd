use std::fs::{self, File};
use std::path::Path;
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Route `tracing` output to `path`.  The terminal itself is taken over by
/// the game, so nothing is logged to stdout/stderr.  `RUST_LOG` overrides
/// the default `info` level.
pub fn init(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create log directory {}", dir.display()))?;
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("failed to install log subscriber: {err}"))?;

    tracing::info!(log_file = %path.display(), "logging initialized");
    Ok(())
}
