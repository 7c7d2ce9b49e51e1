//! Streaming HTTP GET through libcurl.
//!
//! The response body is pushed into a caller-supplied writer as it arrives.
//! A writer error aborts the transfer and is reported instead of libcurl's
//! generic write error.

use std::io::{self, Write};
use std::time::Duration;

use super::error::TransferErrorKind;

/// Connection settings for the GET.
#[derive(Debug, Clone, Copy)]
pub struct SourceOptions {
    pub connect_timeout: Duration,
    /// Abort when the transfer stays below 1 KiB/s for this long.
    pub low_speed_time: Duration,
}

/// GET `url`, writing the body into `sink`. Returns the number of body bytes
/// received.
///
/// HTTP statuses >= 400 fail before any body byte reaches `sink`.
pub fn stream_get<W: Write>(
    url: &str,
    sink: &mut W,
    opts: SourceOptions,
) -> Result<u64, TransferErrorKind> {
    let open_err = |source: curl::Error| TransferErrorKind::Open {
        url: url.to_string(),
        received: 0,
        source,
    };

    let mut easy = curl::easy::Easy::new();
    easy.url(url).map_err(open_err)?;
    easy.follow_location(true).map_err(open_err)?;
    easy.max_redirections(10).map_err(open_err)?;
    easy.fail_on_error(true).map_err(open_err)?;
    easy.connect_timeout(opts.connect_timeout).map_err(open_err)?;
    easy.low_speed_limit(1024).map_err(open_err)?;
    easy.low_speed_time(opts.low_speed_time).map_err(open_err)?;

    let mut received = 0u64;
    let mut sink_error: Option<io::Error> = None;
    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .write_function(|data| match sink.write_all(data) {
                Ok(()) => {
                    received += data.len() as u64;
                    Ok(data.len())
                }
                Err(e) => {
                    sink_error = Some(e);
                    Ok(0) // abort transfer
                }
            })
            .map_err(open_err)?;
        transfer.perform()
    };

    if let Some(e) = sink_error {
        return Err(TransferErrorKind::Stream(e));
    }
    if let Err(e) = performed {
        if e.is_http_returned_error() {
            let code = easy.response_code().unwrap_or(0);
            return Err(TransferErrorKind::Http {
                url: url.to_string(),
                code,
            });
        }
        return Err(TransferErrorKind::Open {
            url: url.to_string(),
            received,
            source: e,
        });
    }
    Ok(received)
}
