//! Result kinds of the core transfer routine and the policy that picks them.

use std::path::PathBuf;

use super::error::{CleanupFailure, TransferError};

/// How the core routine classifies a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// The caller expects the resource to exist; every failure is fatal.
    Strict,
    /// Absence is routine; every failure means "not available".
    BestEffort,
}

/// Completed transfer.
#[derive(Debug)]
pub struct Transferred {
    pub destination: PathBuf,
    /// Cleanup steps that failed after the destination was written.
    pub cleanup: Vec<CleanupFailure>,
}

/// Outcome of one transfer attempt.
#[derive(Debug)]
pub enum TransferOutcome {
    Success(Transferred),
    /// Failed under [`FailurePolicy::BestEffort`]; the error is kept for
    /// diagnostics only.
    Unavailable(TransferError),
    /// Failed under [`FailurePolicy::Strict`].
    Fatal(TransferError),
}

impl FailurePolicy {
    /// Map a failure to the outcome this policy allows.
    pub fn settle(self, err: TransferError) -> TransferOutcome {
        match self {
            FailurePolicy::Strict => TransferOutcome::Fatal(err),
            FailurePolicy::BestEffort => TransferOutcome::Unavailable(err),
        }
    }
}

impl TransferOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TransferOutcome::Success(_))
    }

    /// Success as `Ok`, either failure variant as `Err`.
    pub fn into_result(self) -> Result<Transferred, TransferError> {
        match self {
            TransferOutcome::Success(t) => Ok(t),
            TransferOutcome::Unavailable(e) | TransferOutcome::Fatal(e) => Err(e),
        }
    }
}
