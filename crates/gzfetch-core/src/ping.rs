//! HTTP reachability probe.
//!
//! Sends a HEAD request through libcurl and reports whether the server
//! answered with a 2xx/3xx status. Every failure collapses to `false`.

use anyhow::{Context, Result};
use std::time::Duration;

/// Pings an HTTP(S) URL with a HEAD request.
///
/// `timeout` bounds the connect phase and, separately, the response phase, so
/// the call may take up to twice `timeout`. Returns `true` iff the final
/// response status is in 200..=399. Malformed URLs, non-HTTP schemes, refused
/// connections and timeouts all return `false`.
pub fn ping(url: &str, timeout: Duration) -> bool {
    match head_status(url, timeout) {
        Ok(code) => {
            tracing::debug!(url, code, "ping answered");
            (200..=399).contains(&code)
        }
        Err(e) => {
            tracing::debug!(url, "ping failed: {:#}", e);
            false
        }
    }
}

/// Performs the HEAD request and returns the final status code.
fn head_status(url: &str, timeout: Duration) -> Result<u32> {
    let parsed = url::Url::parse(url).context("malformed URL")?;
    if !matches!(parsed.scheme(), "http" | "https") {
        anyhow::bail!("unsupported scheme {}", parsed.scheme());
    }

    let mut easy = curl::easy::Easy::new();
    easy.url(parsed.as_str()).context("invalid URL")?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.connect_timeout(timeout)?;
    easy.timeout(timeout.saturating_mul(2))?;
    easy.perform().context("HEAD request failed")?;

    let code = easy.response_code().context("no response code")?;
    Ok(code)
}
