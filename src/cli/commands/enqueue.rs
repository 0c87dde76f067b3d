//! Enqueue command implementation
//!
//! Incremental selection: finds qualifying publications not yet in the
//! tracking store, inserts them as pending entries, and rolls straight
//! into a submission once the pending count reaches the configured
//! threshold.

use crate::config::load_config;
use crate::core::{Pipeline, RunOutcome};
use clap::Args;

/// Arguments for the enqueue command
#[derive(Args, Debug)]
pub struct EnqueueArgs {
    /// Track new entries but never proceed into the submit step
    #[arg(long)]
    pub no_submit: bool,

    /// Dry run mode - report what would be tracked without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Override the submission threshold
    #[arg(long)]
    pub threshold: Option<u64>,
}

impl EnqueueArgs {
    /// Execute the enqueue command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting enqueue command");

        let mut config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Configuration error");
                eprintln!("Configuration error: {e}");
                return Ok(2);
            }
        };

        if self.dry_run {
            tracing::info!("Enabling dry-run mode from CLI");
            config.application.dry_run = true;
        }
        if let Some(threshold) = self.threshold {
            tracing::info!(threshold, "Overriding submission threshold from CLI");
            config.submission.threshold = threshold;
        }

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - No tracking writes or uploads will happen");
            println!();
        }

        let dry_run = config.application.dry_run;
        let pipeline = match Pipeline::new(config).await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize pipeline");
                eprintln!("Failed to initialize pipeline: {e}");
                return Ok(4);
            }
        };

        if let Err(e) = pipeline.check_connections().await {
            tracing::error!(error = %e, "Database connection check failed");
            eprintln!("Database connection check failed: {e}");
            return Ok(4);
        }

        let summary = match pipeline.run_enqueue(self.no_submit).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Enqueue run failed");
                eprintln!("Enqueue run failed: {e}");
                return Ok(5);
            }
        };

        if summary.outcome == RunOutcome::NothingToDo {
            println!("No new qualifying publications found.");
            return Ok(1);
        }

        println!();
        println!("📊 Enqueue Summary:");
        println!("  New entries tracked: {}", summary.new_entries);
        println!("  Pending entries: {}", summary.pending);
        if summary.uploaded {
            println!("  Files uploaded: {}", summary.files.len());
            for file in &summary.files {
                println!("    {file}");
            }
        } else if !summary.files.is_empty() {
            println!("  Files written (not uploaded): {}", summary.files.len());
        } else if dry_run {
            println!("  Submission: skipped (dry run)");
        } else {
            println!("  Submission: held (below threshold or --no-submit)");
        }
        println!();

        Ok(0)
    }
}
