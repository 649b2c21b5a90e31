//! Core error types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the claim workflow and its collaborators
#[derive(Error, Debug)]
pub enum ClaimError {
    #[error("Failed to read candidate list {path}: {source}")]
    CandidateSource {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to open ledger {path}: {source}")]
    LedgerOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read ledger {path}: {source}")]
    LedgerRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to record claimed bucket {bucket} in ledger: {source}")]
    LedgerAppend {
        bucket: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Fetch failed: {0}")]
    Fetch(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Invalid bucket name: {0}")]
    InvalidBucketName(#[from] crate::validate::InvalidBucketName),
}

impl ClaimError {
    /// Whether the error must abort the whole run
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ClaimError::CandidateSource { .. }
                | ClaimError::LedgerOpen { .. }
                | ClaimError::LedgerRead { .. }
                | ClaimError::LedgerAppend { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ClaimError>;
