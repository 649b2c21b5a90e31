use crate::config::RunConfig;
use bucketclaim_aws::{HttpFetcher, S3Provider};
use bucketclaim_core::{ClaimLedger, ClaimOrchestrator, ClaimOutcome, ClaimReport, load_candidates};
use colored::Colorize;
use std::path::Path;

pub async fn handle(
    config: &RunConfig,
    list: &Path,
    validate_names: bool,
    json: bool,
) -> anyhow::Result<()> {
    let candidates = load_candidates(list).await?;
    let mut ledger = ClaimLedger::create(&config.ledger_path).await?;

    if !json {
        println!(
            "{}",
            format!("Probing {} candidates...", candidates.len()).blue()
        );
        println!("Ledger: {}", ledger.path().display().to_string().cyan());
    }

    let report = if candidates.is_empty() {
        ClaimReport::default()
    } else {
        let provider = S3Provider::connect(&config.s3).await;
        let fetcher = HttpFetcher::new(&config.transport)?;
        ClaimOrchestrator::new(&provider, &fetcher)
            .with_name_validation(validate_names)
            .run(&candidates, &mut ledger)
            .await?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report, &ledger);
    }

    Ok(())
}

fn print_report(report: &ClaimReport, ledger: &ClaimLedger) {
    println!();
    for attempt in &report.attempts {
        let host = attempt.candidate.as_str();
        let bucket = attempt.bucket_name.as_deref().unwrap_or("");
        match &attempt.outcome {
            ClaimOutcome::Claimed => {
                println!("  ✓ {} → {}", host, bucket.green());
            }
            ClaimOutcome::FetchFailed { reason } => {
                println!("  ⚠ {}: {}", host, reason.dimmed());
            }
            ClaimOutcome::ExtractionFailed => {
                let code = attempt.error_code.as_deref().unwrap_or("no error document");
                println!("  ℹ {}: no bucket name ({})", host, code);
            }
            ClaimOutcome::Rejected { reason } => {
                println!("  ⚠ {}: skipped bucket {} ({})", host, bucket.yellow(), reason);
            }
            ClaimOutcome::CreateFailed { reason } => {
                println!(
                    "  ⚠ {}: could not create bucket {} ({})",
                    host,
                    bucket.yellow(),
                    reason
                );
            }
        }
    }

    println!();
    let summary = format!(
        "✓ {} claimed, {} not claimed ({} ms)",
        report.claimed_count(),
        report.failed_count(),
        report.duration_ms
    );
    println!("{}", summary.green().bold());
    if ledger.entries() > 0 {
        println!(
            "{}",
            format!(
                "  Recorded {} in {}. Run `bucketclaim undo` to release them.",
                ledger.entries(),
                ledger.path().display()
            )
            .dimmed()
        );
    }
}
