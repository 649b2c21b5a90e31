//! Claim ledger
//!
//! Plain text file, one claimed bucket name per line, in claim order.
//! A takeover run truncates it on open; a rollback run only reads it.
//! Nothing in this crate deletes the file.

use crate::error::{ClaimError, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;

pub const DEFAULT_LEDGER_PATH: &str = "data.txt";

/// Whether `bucket` reads back from the ledger as exactly one entry
pub fn is_recordable(bucket: &str) -> bool {
    !bucket.is_empty() && !bucket.contains(['\n', '\r'])
}

/// Sink for successfully claimed bucket names
#[async_trait]
pub trait LedgerWriter: Send {
    /// Record one claimed bucket. Must be durable when it returns.
    async fn append(&mut self, bucket: &str) -> Result<()>;
}

/// File-backed ledger write handle
pub struct ClaimLedger {
    path: PathBuf,
    file: File,
    entries: usize,
}

impl ClaimLedger {
    /// Create the ledger, truncating whatever a previous run left there
    pub async fn create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .await
            .map_err(|source| ClaimError::LedgerOpen {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Opened ledger {} (truncated)", path.display());
        Ok(Self {
            path,
            file,
            entries: 0,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of entries appended through this handle
    pub fn entries(&self) -> usize {
        self.entries
    }

    async fn write_line(&mut self, bucket: &str) -> std::io::Result<()> {
        let mut line = String::with_capacity(bucket.len() + 1);
        line.push_str(bucket);
        line.push('\n');
        self.file.write_all(line.as_bytes()).await?;
        self.file.flush().await?;
        self.file.sync_data().await
    }
}

#[async_trait]
impl LedgerWriter for ClaimLedger {
    async fn append(&mut self, bucket: &str) -> Result<()> {
        self.write_line(bucket)
            .await
            .map_err(|source| ClaimError::LedgerAppend {
                bucket: bucket.to_string(),
                source,
            })?;
        self.entries += 1;
        tracing::debug!("Recorded {} in {}", bucket, self.path.display());
        Ok(())
    }
}

/// Read every entry of a ledger, in the order they were written
pub async fn read_ledger(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content = fs::read(path)
        .await
        .map_err(|source| ClaimError::LedgerRead {
            path: path.to_path_buf(),
            source,
        })?;

    let entries: Vec<String> = String::from_utf8_lossy(&content)
        .lines()
        .map(str::to_string)
        .collect();

    tracing::debug!("Read {} ledger entries from {}", entries.len(), path.display());
    Ok(entries)
}
