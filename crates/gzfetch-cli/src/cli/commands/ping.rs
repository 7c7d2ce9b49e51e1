//! Ping command: HEAD probe, printed as `<true|false>\t<url>`.

use gzfetch_core::config::GzfetchConfig;
use std::time::Duration;

pub fn run_ping(cfg: &GzfetchConfig, url: &str, timeout_ms: Option<u64>) {
    let timeout = timeout_ms
        .map(Duration::from_millis)
        .unwrap_or_else(|| cfg.ping_timeout());
    let reachable = gzfetch_core::ping(url, timeout);
    println!("{}\t{}", reachable, url);
}
