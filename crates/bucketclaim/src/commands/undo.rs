use crate::config::RunConfig;
use bucketclaim_aws::S3Provider;
use bucketclaim_core::{DeleteOutcome, RollbackOrchestrator, RollbackReport, read_ledger};
use colored::Colorize;

pub async fn handle(config: &RunConfig, json: bool) -> anyhow::Result<()> {
    let buckets = read_ledger(&config.ledger_path).await?;

    let report = if buckets.is_empty() {
        RollbackReport::default()
    } else {
        let provider = S3Provider::connect(&config.s3).await;
        RollbackOrchestrator::new(&provider)
            .delete_all(&buckets)
            .await
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.entries.is_empty() {
        println!(
            "{}",
            format!(
                "ℹ {} is empty, nothing to roll back",
                config.ledger_path.display()
            )
            .yellow()
        );
        return Ok(());
    }

    for entry in &report.entries {
        match &entry.outcome {
            DeleteOutcome::Deleted => println!("  ✓ {}", entry.bucket_name.green()),
            DeleteOutcome::Failed { reason } => {
                println!(
                    "  ⚠ could not delete bucket {} ({})",
                    entry.bucket_name.yellow(),
                    reason
                )
            }
        }
    }

    println!();
    let summary = format!(
        "{} deleted, {} failed ({} ms)",
        report.deleted_count(),
        report.failed_count(),
        report.duration_ms
    );
    if report.is_success() {
        println!("{}", format!("✓ {}", summary).green().bold());
    } else {
        println!("{}", format!("⚠ {}", summary).yellow().bold());
    }

    Ok(())
}
