use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::fetch::{ReencodeMode, TransferOptions};
use crate::paths::expand_user_home;

/// Configuration loaded from `~/.config/gzfetch/config.toml` by the CLI.
/// The library functions take explicit options and never read it themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GzfetchConfig {
    /// Default timeout for `ping`, applied to connect and response separately.
    pub ping_timeout_ms: u64,
    /// Connect timeout for downloads.
    pub connect_timeout_secs: u64,
    /// Abort a download that stays below 1 KiB/s for this many seconds.
    pub low_speed_time_secs: u64,
    /// Directory for temp files (None = platform temp dir). `~/` is expanded.
    #[serde(default)]
    pub temp_dir: Option<String>,
    /// "lines" (text re-encode, default) or "bytes" (verbatim).
    #[serde(default)]
    pub reencode: ReencodeMode,
}

impl Default for GzfetchConfig {
    fn default() -> Self {
        Self {
            ping_timeout_ms: 5000,
            connect_timeout_secs: 30,
            low_speed_time_secs: 60,
            temp_dir: None,
            reencode: ReencodeMode::Lines,
        }
    }
}

impl GzfetchConfig {
    pub fn ping_timeout(&self) -> Duration {
        Duration::from_millis(self.ping_timeout_ms)
    }
}

impl From<&GzfetchConfig> for TransferOptions {
    fn from(cfg: &GzfetchConfig) -> Self {
        TransferOptions {
            temp_dir: cfg
                .temp_dir
                .as_deref()
                .map(|d| PathBuf::from(expand_user_home(d))),
            reencode: cfg.reencode,
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            low_speed_time: Duration::from_secs(cfg.low_speed_time_secs),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gzfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<GzfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = GzfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: GzfetchConfig =
        toml::from_str(&data).with_context(|| format!("invalid config {}", path.display()))?;
    Ok(cfg)
}
