//! Fetch command: stage a gzip resource into a destination file.

use anyhow::Result;
use gzfetch_core::config::GzfetchConfig;
use gzfetch_core::fetch::{self, ReencodeMode, TransferOptions};
use gzfetch_core::paths::expand_user_home;
use std::path::PathBuf;

pub struct FetchArgs {
    pub url: String,
    pub destination: String,
    pub if_available: bool,
    pub temp_dir: Option<PathBuf>,
    pub bytes: bool,
}

/// Transfer options from config, overridden by command-line flags.
pub fn fetch_options(cfg: &GzfetchConfig, args: &FetchArgs) -> TransferOptions {
    let mut opts = TransferOptions::from(cfg);
    if let Some(dir) = &args.temp_dir {
        opts.temp_dir = Some(PathBuf::from(expand_user_home(&dir.to_string_lossy())));
    }
    if args.bytes {
        opts.reencode = ReencodeMode::Bytes;
    }
    opts
}

pub fn run_fetch(cfg: &GzfetchConfig, args: FetchArgs) -> Result<()> {
    let opts = fetch_options(cfg, &args);
    let destination = PathBuf::from(expand_user_home(&args.destination));

    if args.if_available {
        match fetch::download_file_if_available(&args.url, &destination, &opts) {
            Some(path) => println!("{}", path.display()),
            None => println!("not available: {}", args.url),
        }
        return Ok(());
    }

    let done = fetch::download_gzip_compressed_file(&args.url, &destination, &opts)?;
    for c in &done.cleanup {
        eprintln!("warning: {}", c);
    }
    println!("{}", done.destination.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(temp_dir: Option<&str>, bytes: bool) -> FetchArgs {
        FetchArgs {
            url: "http://example.org/a.gz".to_string(),
            destination: "a.gz".to_string(),
            if_available: false,
            temp_dir: temp_dir.map(PathBuf::from),
            bytes,
        }
    }

    #[test]
    fn config_values_used_without_flags() {
        let cfg = GzfetchConfig {
            temp_dir: Some("/var/tmp/gz".to_string()),
            ..GzfetchConfig::default()
        };
        let opts = fetch_options(&cfg, &args(None, false));
        assert_eq!(opts.temp_dir, Some(PathBuf::from("/var/tmp/gz")));
        assert_eq!(opts.reencode, ReencodeMode::Lines);
    }

    #[test]
    fn flags_override_config() {
        let cfg = GzfetchConfig {
            temp_dir: Some("/var/tmp/gz".to_string()),
            ..GzfetchConfig::default()
        };
        let opts = fetch_options(&cfg, &args(Some("/scratch"), true));
        assert_eq!(opts.temp_dir, Some(PathBuf::from("/scratch")));
        assert_eq!(opts.reencode, ReencodeMode::Bytes);
    }

    #[test]
    fn temp_dir_flag_expands_home() {
        let opts = fetch_options(&GzfetchConfig::default(), &args(Some("~/scratch"), false));
        assert_eq!(
            opts.temp_dir,
            Some(PathBuf::from(expand_user_home("~/scratch")))
        );
        if std::env::var_os("HOME").is_some() {
            assert!(!opts.temp_dir.unwrap().starts_with("~"));
        }
    }
}
