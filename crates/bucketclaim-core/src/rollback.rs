//! Rollback orchestrator
//!
//! Deletes every bucket recorded in a ledger, one at a time, in ledger
//! order. The ledger itself is left untouched.

use crate::error::Result;
use crate::ledger::read_ledger;
use crate::provider::BucketProvider;
use serde::Serialize;
use std::path::Path;

/// Result of deleting one ledger entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    Failed { reason: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct RollbackEntry {
    pub bucket_name: String,
    pub outcome: DeleteOutcome,
}

/// Outcome of a whole undo run
#[derive(Debug, Clone, Default, Serialize)]
pub struct RollbackReport {
    /// Entries in ledger order
    pub entries: Vec<RollbackEntry>,

    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

impl RollbackReport {
    pub fn is_success(&self) -> bool {
        self.failed_count() == 0
    }

    pub fn deleted_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == DeleteOutcome::Deleted)
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.entries.len() - self.deleted_count()
    }

    pub fn failures(&self) -> impl Iterator<Item = &RollbackEntry> {
        self.entries
            .iter()
            .filter(|e| e.outcome != DeleteOutcome::Deleted)
    }
}

pub struct RollbackOrchestrator<'a> {
    provider: &'a dyn BucketProvider,
}

impl<'a> RollbackOrchestrator<'a> {
    pub fn new(provider: &'a dyn BucketProvider) -> Self {
        Self { provider }
    }

    /// Read the ledger at `ledger_path` and delete every entry.
    ///
    /// An unreadable ledger is an error; individual delete failures are not.
    pub async fn run(&self, ledger_path: impl AsRef<Path>) -> Result<RollbackReport> {
        let buckets = read_ledger(ledger_path).await?;
        Ok(self.delete_all(&buckets).await)
    }

    /// Issue exactly one delete per name, in order.
    ///
    /// Entry point for callers that already read the ledger, such as the
    /// CLI, which skips building a provider when the ledger is empty.
    pub async fn delete_all(&self, buckets: &[String]) -> RollbackReport {
        let start = std::time::Instant::now();
        let mut report = RollbackReport::default();

        tracing::info!(
            "Rolling back {} buckets via {}",
            buckets.len(),
            self.provider.name()
        );

        for bucket in buckets {
            let outcome = match self.provider.delete_bucket(bucket).await {
                Ok(()) => {
                    tracing::info!("Deleted bucket {}", bucket);
                    DeleteOutcome::Deleted
                }
                Err(e) => {
                    tracing::warn!("Could not delete bucket {}: {}", bucket, e);
                    DeleteOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            report.entries.push(RollbackEntry {
                bucket_name: bucket.clone(),
                outcome,
            });
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        report
    }
}
