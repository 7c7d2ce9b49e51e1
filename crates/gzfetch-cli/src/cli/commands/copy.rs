use anyhow::{Context, Result};
use std::path::Path;

pub fn run_copy(source: &Path, destination: &Path) -> Result<()> {
    let n = gzfetch_core::copy(source, destination).with_context(|| {
        format!("copy {} to {}", source.display(), destination.display())
    })?;
    tracing::debug!(bytes = n, "copied {}", source.display());
    Ok(())
}
