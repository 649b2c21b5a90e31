//! Claim orchestrator
//!
//! For each candidate, strictly in order: probe over HTTPS, extract the
//! bucket name from the error document, try to create that bucket, and
//! record it in the ledger when the create succeeds. A failing candidate
//! never stops the batch; only a ledger append failure does.

use crate::candidate::Candidate;
use crate::error::Result;
use crate::error_response::ErrorResponse;
use crate::ledger::{LedgerWriter, is_recordable};
use crate::provider::{BucketProvider, Fetcher};
use crate::validate::validate_bucket_name;
use serde::Serialize;

/// Scheme prepended to every candidate to build the probe URL
pub const PROBE_SCHEME: &str = "https://";

/// Result of processing one candidate
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ClaimOutcome {
    /// Bucket created and recorded in the ledger
    Claimed,
    /// Probe request failed
    FetchFailed { reason: String },
    /// Response carried no usable bucket name
    ExtractionFailed,
    /// Extracted name failed the naming rules
    Rejected { reason: String },
    /// Provider refused the create
    CreateFailed { reason: String },
}

impl ClaimOutcome {
    pub fn is_claimed(&self) -> bool {
        matches!(self, ClaimOutcome::Claimed)
    }
}

impl std::fmt::Display for ClaimOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClaimOutcome::Claimed => write!(f, "claimed"),
            ClaimOutcome::FetchFailed { reason } => write!(f, "fetch failed: {}", reason),
            ClaimOutcome::ExtractionFailed => write!(f, "no bucket name in response"),
            ClaimOutcome::Rejected { reason } => write!(f, "rejected: {}", reason),
            ClaimOutcome::CreateFailed { reason } => write!(f, "create failed: {}", reason),
        }
    }
}

/// One candidate's pass through the pipeline
#[derive(Debug, Clone, Serialize)]
pub struct ClaimAttempt {
    pub candidate: Candidate,

    /// Bucket name extracted from the error document, if any
    pub bucket_name: Option<String>,

    /// Provider error code from the document (e.g. "NoSuchBucket")
    pub error_code: Option<String>,

    pub outcome: ClaimOutcome,
}

impl ClaimAttempt {
    fn fetch_failed(candidate: &Candidate, reason: String) -> Self {
        Self {
            candidate: candidate.clone(),
            bucket_name: None,
            error_code: None,
            outcome: ClaimOutcome::FetchFailed { reason },
        }
    }

    fn from_response(
        candidate: &Candidate,
        response: &ErrorResponse,
        outcome: ClaimOutcome,
    ) -> Self {
        Self {
            candidate: candidate.clone(),
            bucket_name: response.bucket_name().map(str::to_string),
            error_code: (!response.code.is_empty()).then(|| response.code.clone()),
            outcome,
        }
    }
}

/// Outcome of a whole takeover run
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClaimReport {
    /// Attempts in candidate order
    pub attempts: Vec<ClaimAttempt>,

    /// Total execution time in milliseconds
    pub duration_ms: u64,
}

impl ClaimReport {
    /// Bucket names claimed, in ledger order
    pub fn claimed(&self) -> Vec<&str> {
        self.attempts
            .iter()
            .filter(|a| a.outcome.is_claimed())
            .filter_map(|a| a.bucket_name.as_deref())
            .collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &ClaimAttempt> {
        self.attempts.iter().filter(|a| !a.outcome.is_claimed())
    }

    pub fn claimed_count(&self) -> usize {
        self.attempts.iter().filter(|a| a.outcome.is_claimed()).count()
    }

    pub fn failed_count(&self) -> usize {
        self.attempts.len() - self.claimed_count()
    }
}

/// Sequential takeover pass over a candidate list
pub struct ClaimOrchestrator<'a> {
    provider: &'a dyn BucketProvider,
    fetcher: &'a dyn Fetcher,
    validate_names: bool,
}

impl<'a> ClaimOrchestrator<'a> {
    pub fn new(provider: &'a dyn BucketProvider, fetcher: &'a dyn Fetcher) -> Self {
        Self {
            provider,
            fetcher,
            validate_names: false,
        }
    }

    /// Reject extracted names that break the S3 naming rules before
    /// calling the provider. Off by default.
    pub fn with_name_validation(mut self, enabled: bool) -> Self {
        self.validate_names = enabled;
        self
    }

    /// Process every candidate in order.
    ///
    /// Returns `Err` only when a claimed bucket cannot be written to the
    /// ledger; every other failure is reported in the returned attempts.
    pub async fn run(
        &self,
        candidates: &[Candidate],
        ledger: &mut dyn LedgerWriter,
    ) -> Result<ClaimReport> {
        let start = std::time::Instant::now();
        let mut report = ClaimReport::default();

        tracing::info!(
            "Probing {} candidates via {}",
            candidates.len(),
            self.provider.name()
        );

        for candidate in candidates {
            let attempt = self.attempt(candidate, ledger).await?;
            report.attempts.push(attempt);
        }

        report.duration_ms = start.elapsed().as_millis() as u64;
        tracing::info!(
            "Takeover pass finished: {} claimed, {} failed",
            report.claimed_count(),
            report.failed_count()
        );
        Ok(report)
    }

    async fn attempt(
        &self,
        candidate: &Candidate,
        ledger: &mut dyn LedgerWriter,
    ) -> Result<ClaimAttempt> {
        let url = candidate.probe_url();
        tracing::debug!("Probing {}", url);

        let body = match self.fetcher.fetch(&url).await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("Failed to fetch {}: {}", url, e);
                return Ok(ClaimAttempt::fetch_failed(candidate, e.to_string()));
            }
        };

        let response = ErrorResponse::parse(&body);
        let Some(bucket) = response.bucket_name() else {
            tracing::warn!("No bucket name in response from {}", candidate);
            return Ok(ClaimAttempt::from_response(
                candidate,
                &response,
                ClaimOutcome::ExtractionFailed,
            ));
        };
        tracing::debug!("{} expects bucket {}", candidate, bucket);

        if !is_recordable(bucket) {
            tracing::warn!(
                "Skipping bucket {:?} from {}: contains a line break",
                bucket,
                candidate
            );
            return Ok(ClaimAttempt::from_response(
                candidate,
                &response,
                ClaimOutcome::Rejected {
                    reason: "bucket name contains a line break".to_string(),
                },
            ));
        }

        if self.validate_names {
            if let Err(e) = validate_bucket_name(bucket) {
                tracing::warn!("Skipping bucket {} from {}: {}", bucket, candidate, e);
                return Ok(ClaimAttempt::from_response(
                    candidate,
                    &response,
                    ClaimOutcome::Rejected {
                        reason: e.to_string(),
                    },
                ));
            }
        }

        let outcome = match self.provider.create_bucket(bucket).await {
            Ok(()) => {
                ledger.append(bucket).await?;
                tracing::info!("Claimed bucket {} for {}", bucket, candidate);
                ClaimOutcome::Claimed
            }
            Err(e) => {
                tracing::warn!("Could not create bucket {}: {}", bucket, e);
                ClaimOutcome::CreateFailed {
                    reason: e.to_string(),
                }
            }
        };

        Ok(ClaimAttempt::from_response(candidate, &response, outcome))
    }
}
