//! Gzip-aware download into a local destination.
//!
//! One core routine, [`transfer`], opens the URL, decodes the gzip stream,
//! re-encodes the content into a gzip temp file and commits it onto the
//! destination. The two entry points differ only in which outcomes they let
//! through: [`download_gzip_compressed_file`] fails loudly,
//! [`download_file_if_available`] turns every failure into `None`.

mod error;
mod outcome;
mod reencode;
mod source;
mod stage;

pub use error::{CleanupFailure, TransferError, TransferErrorKind};
pub use outcome::{FailurePolicy, TransferOutcome, Transferred};
pub use reencode::{ReencodeMode, Reencoder};
pub use source::SourceOptions;
pub use stage::{part_path, PART_SUFFIX};

use flate2::write::{GzEncoder, MultiGzDecoder};
use flate2::Compression;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::paths::FileName;
use stage::StagedFile;

/// Per-call transfer settings.
#[derive(Debug, Clone)]
pub struct TransferOptions {
    /// Where temp files are created; `None` means the platform temp dir.
    pub temp_dir: Option<PathBuf>,
    pub reencode: ReencodeMode,
    pub connect_timeout: Duration,
    pub low_speed_time: Duration,
}

impl Default for TransferOptions {
    fn default() -> Self {
        Self {
            temp_dir: None,
            reencode: ReencodeMode::Lines,
            connect_timeout: Duration::from_secs(30),
            low_speed_time: Duration::from_secs(60),
        }
    }
}

impl TransferOptions {
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }

    fn source(&self) -> SourceOptions {
        SourceOptions {
            connect_timeout: self.connect_timeout,
            low_speed_time: self.low_speed_time,
        }
    }
}

/// Downloads the gzip resource at `url` into `destination`, failing on any
/// error. The destination is untouched unless the whole transfer succeeded.
pub fn download_gzip_compressed_file(
    url: &str,
    destination: &Path,
    opts: &TransferOptions,
) -> Result<Transferred, TransferError> {
    transfer(url, destination, FailurePolicy::Strict, opts).into_result()
}

/// Downloads the gzip resource at `url` into `destination` if it can be had.
///
/// Returns `Some(destination)` on success. Every failure is logged and
/// yields `None`, leaving the destination untouched.
pub fn download_file_if_available(
    url: &str,
    destination: &Path,
    opts: &TransferOptions,
) -> Option<PathBuf> {
    match transfer(url, destination, FailurePolicy::BestEffort, opts) {
        TransferOutcome::Success(t) => Some(t.destination),
        TransferOutcome::Unavailable(e) | TransferOutcome::Fatal(e) => {
            if e.is_source_unavailable() {
                tracing::info!(url, "resource not available: {}", e);
            } else {
                tracing::warn!(url, "problem while downloading: {}", e);
            }
            None
        }
    }
}

/// Core transfer routine shared by both entry points.
pub fn transfer(
    url: &str,
    destination: &Path,
    policy: FailurePolicy,
    opts: &TransferOptions,
) -> TransferOutcome {
    let mut cleanup = Vec::new();
    let result = run(url, destination, opts, &mut cleanup);
    for c in &cleanup {
        tracing::warn!("cleanup: {}", c);
    }
    match result {
        Ok(()) => TransferOutcome::Success(Transferred {
            destination: destination.to_path_buf(),
            cleanup,
        }),
        Err(kind) => {
            tracing::debug!(url, ?policy, "transfer failed: {}", kind);
            policy.settle(TransferError { kind, cleanup })
        }
    }
}

fn run(
    url: &str,
    destination: &Path,
    opts: &TransferOptions,
    cleanup: &mut Vec<CleanupFailure>,
) -> Result<(), TransferErrorKind> {
    url::Url::parse(url).map_err(|source| TransferErrorKind::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    let name = FileName::of(destination)
        .ok_or_else(|| TransferErrorKind::NoFileName(destination.to_path_buf()))?;

    let staged = StagedFile::create(&opts.temp_dir(), &name)?;
    let result = fill(url, &staged, opts).and_then(|()| {
        tracing::info!("writing to {}", destination.display());
        staged.commit(destination, cleanup)
    });
    if let Some(failure) = staged.discard() {
        cleanup.push(failure);
    }
    result
}

/// Stream `url` through decode, re-encode and gzip into the staged file.
fn fill(url: &str, staged: &StagedFile, opts: &TransferOptions) -> Result<(), TransferErrorKind> {
    let file = staged.writer()?;
    let encoder = GzEncoder::new(BufWriter::new(file), Compression::default());
    let mut decoder = MultiGzDecoder::new(Reencoder::new(encoder, opts.reencode));

    let received = source::stream_get(url, &mut decoder, opts.source())?;

    let reencoder = decoder.finish().map_err(TransferErrorKind::Stream)?;
    let encoder = reencoder.finish().map_err(TransferErrorKind::Stream)?;
    let buffered = encoder.finish().map_err(TransferErrorKind::Stage)?;
    // The temp file is scratch; durability is handled at commit.
    buffered
        .into_inner()
        .map_err(|e| TransferErrorKind::Stage(e.into_error()))?;

    tracing::debug!(url, received, "staged {}", staged.path().display());
    Ok(())
}
