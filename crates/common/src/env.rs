//! Environment/runtime helpers
//!
//! Sanity checks to ensure expected directories exist at startup.

use std::path::Path;

use tracing::{info, warn};

/// Make sure the directory holding the movie data file exists.
///
/// Without a data file the store runs purely in memory, which is worth a
/// warning since nothing survives a restart.
pub async fn ensure_env(data_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(file) = data_file else {
        warn!("no data file configured; movies are kept in memory only");
        return Ok(());
    };
    if let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| anyhow::anyhow!("cannot create {}: {e}", dir.display()))?;
    }
    info!(data_file = %file.display(), "movie data file");
    Ok(())
}
