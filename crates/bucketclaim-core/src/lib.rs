//! bucketclaim core workflow
//!
//! This crate implements the claim / record / rollback workflow for
//! dangling S3 bucket references: hostnames that still resolve to the
//! storage endpoint while the bucket behind them no longer exists.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │                 bucketclaim CLI                   │
//! │             (takeover / undo)                     │
//! └─────────────┬──────────────────────┬─────────────┘
//!               │                      │
//! ┌─────────────▼───────────┐ ┌────────▼────────────┐
//! │   ClaimOrchestrator     │ │ RollbackOrchestrator │
//! │ fetch → parse → create  │ │   read → delete      │
//! └──┬──────────┬───────────┘ └────────┬────────────┘
//!    │          │  append              │ read_all
//!    │          └──────────┐   ┌───────┘
//!    │                ┌────▼───▼────┐
//!    │                │ ClaimLedger │  (data.txt)
//!    │                └─────────────┘
//! ┌──▼───────────────────────────────────────────────┐
//! │  trait Fetcher        trait BucketProvider        │
//! │  (probe over HTTPS)   (create/delete/put-object)  │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Network collaborators live in `bucketclaim-aws`; everything here is
//! driven through the two traits so it can be exercised with in-memory
//! doubles.

pub mod candidate;
pub mod claim;
pub mod error;
pub mod error_response;
pub mod ledger;
pub mod provider;
pub mod rollback;
pub mod validate;

// Re-exports
pub use candidate::{Candidate, load_candidates};
pub use claim::{ClaimAttempt, ClaimOrchestrator, ClaimOutcome, ClaimReport, PROBE_SCHEME};
pub use error::{ClaimError, Result};
pub use error_response::ErrorResponse;
pub use ledger::{ClaimLedger, DEFAULT_LEDGER_PATH, LedgerWriter, is_recordable, read_ledger};
pub use provider::{BucketProvider, Fetcher};
pub use rollback::{DeleteOutcome, RollbackEntry, RollbackOrchestrator, RollbackReport};
pub use validate::{InvalidBucketName, validate_bucket_name};
