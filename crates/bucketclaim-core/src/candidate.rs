//! Candidate hostnames to probe

use crate::claim::PROBE_SCHEME;
use crate::error::{ClaimError, Result};
use serde::Serialize;
use std::fmt;
use std::path::Path;
use tokio::fs;

/// A hostname suspected to point at a deprovisioned bucket.
///
/// Taken verbatim from its source line; blank or malformed entries are
/// kept and fail later at the probe step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Candidate(String);

impl Candidate {
    pub fn new(host: impl Into<String>) -> Self {
        Self(host.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL requested to provoke the provider's error document
    pub fn probe_url(&self) -> String {
        format!("{}{}", PROBE_SCHEME, self.0)
    }
}

impl fmt::Display for Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Candidate {
    fn from(host: &str) -> Self {
        Self::new(host)
    }
}

/// Load candidates from a line-oriented file, one per line, in file order.
///
/// Lines end at `\n` with an optional preceding `\r`. Duplicates are kept.
pub async fn load_candidates(path: impl AsRef<Path>) -> Result<Vec<Candidate>> {
    let path = path.as_ref();
    let content = fs::read(path)
        .await
        .map_err(|source| ClaimError::CandidateSource {
            path: path.to_path_buf(),
            source,
        })?;

    let candidates: Vec<Candidate> = String::from_utf8_lossy(&content)
        .lines()
        .map(Candidate::from)
        .collect();

    tracing::debug!(
        "Loaded {} candidates from {}",
        candidates.len(),
        path.display()
    );
    Ok(candidates)
}
