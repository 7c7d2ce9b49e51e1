//! Error types for a transfer and the cleanup diagnostics attached to it.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Primary reason a transfer failed.
#[derive(Debug, thiserror::Error)]
pub enum TransferErrorKind {
    /// The source locator could not be parsed as a URL.
    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    /// The destination path has no usable base name to stage under.
    #[error("destination {0} has no file name")]
    NoFileName(PathBuf),
    /// libcurl failed to open or read the source (DNS, connect, timeout, ...).
    /// `received` counts body bytes delivered before the failure.
    #[error("failed to fetch {url} after {received} bytes: {source}")]
    Open {
        url: String,
        received: u64,
        #[source]
        source: curl::Error,
    },
    /// The server answered with an error status.
    #[error("GET {url} returned HTTP {code}")]
    Http { url: String, code: u32 },
    /// Decoding the gzip stream or re-encoding it into the temp file failed.
    #[error("failed to decode or re-encode stream: {0}")]
    Stream(#[source] io::Error),
    /// Creating, finishing or syncing the temp file failed.
    #[error("failed to stage temp file: {0}")]
    Stage(#[source] io::Error),
    /// Copying the staged file onto the destination failed.
    #[error("failed to commit to {destination}: {source}")]
    Commit {
        destination: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A cleanup step (closing, removing a temp file) that failed after the
/// primary outcome was already decided. Never replaces that outcome.
#[derive(Debug)]
pub struct CleanupFailure {
    pub path: PathBuf,
    pub action: &'static str,
    pub source: io::Error,
}

impl fmt::Display for CleanupFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to {} {}: {}", self.action, self.path.display(), self.source)
    }
}

impl std::error::Error for CleanupFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// Failed transfer: the primary error plus any cleanup failures collected
/// while unwinding.
#[derive(Debug)]
pub struct TransferError {
    pub kind: TransferErrorKind,
    pub cleanup: Vec<CleanupFailure>,
}

impl TransferError {
    pub fn new(kind: TransferErrorKind) -> Self {
        Self {
            kind,
            cleanup: Vec::new(),
        }
    }

    /// True when the source itself was missing or unreachable: an error
    /// status, or a connect/resolve failure before any body byte arrived.
    /// A transfer that broke mid-body, or a local decode/write failure, is not.
    pub fn is_source_unavailable(&self) -> bool {
        match &self.kind {
            TransferErrorKind::Http { .. } => true,
            TransferErrorKind::Open {
                received: 0,
                source,
                ..
            } => {
                source.is_couldnt_connect()
                    || source.is_couldnt_resolve_host()
                    || source.is_couldnt_resolve_proxy()
                    || source.is_operation_timedout()
                    || source.is_file_couldnt_read_file()
            }
            _ => false,
        }
    }
}

impl From<TransferErrorKind> for TransferError {
    fn from(kind: TransferErrorKind) -> Self {
        TransferError::new(kind)
    }
}

impl fmt::Display for TransferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        match self.cleanup.len() {
            0 => Ok(()),
            1 => write!(f, " (also: {})", self.cleanup[0]),
            n => write!(f, " (also {} cleanup failures, first: {})", n, self.cleanup[0]),
        }
    }
}

impl std::error::Error for TransferError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        std::error::Error::source(&self.kind)
    }
}
