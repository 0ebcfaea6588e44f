//! Compression backend trait and shared types.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend). Tests use a mock that
//! records calls and fakes the size change.

use super::params::CompressParams;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// What happened to a file after a compress call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressOutcome {
    /// The re-encoded bytes were smaller and replaced the original.
    Rewritten,
    /// Re-encoding did not help; the original was kept.
    KeptOriginal,
    /// No encoder for this format.
    Skipped,
}

pub trait ImageBackend {
    /// Re-encode `params.path` in place.
    fn compress(&self, params: &CompressParams) -> Result<CompressOutcome, BackendError>;
}
