//! Resubmit command implementation
//!
//! Regenerates resource files for every tracked item and redelivers the
//! full set. PubMed ingests a resubmission as a replace-by-id, so this
//! is the recovery path after a bad upload or a LinkOut-side reset. Run
//! cadence (the old biweekly gate) belongs to the external scheduler.

use crate::config::load_config;
use crate::core::{Pipeline, RunOutcome};
use clap::Args;

/// Arguments for the resubmit command
#[derive(Args, Debug)]
pub struct ResubmitArgs {
    /// Dry run mode - write resource files locally but skip the upload
    #[arg(long)]
    pub dry_run: bool,

    /// Override the page size (records per resource file)
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl ResubmitArgs {
    /// Execute the resubmit command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting resubmit command");

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
        if let Some(page_size) = self.page_size {
            if page_size == 0 {
                eprintln!("Page size must be greater than zero");
                return Ok(2);
            }
            tracing::info!(page_size, "Overriding page size from CLI");
            config.submission.page_size = page_size;
        }

        if config.application.dry_run {
            println!("🔍 DRY RUN MODE - Resource files will not be uploaded");
            println!();
        }

        let pipeline = match Pipeline::new(config).await {
            Ok(p) => p,
            Err(e) => {
                tracing::error!(error = %e, "Failed to initialize pipeline");
                eprintln!("Failed to initialize pipeline: {e}");
                return Ok(4);
            }
        };

        let summary = match pipeline.run_resubmit().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Resubmit run failed");
                eprintln!("Resubmit run failed: {e}");
                return Ok(5);
            }
        };

        if summary.outcome == RunOutcome::NothingToDo {
            println!("Tracking store is empty; nothing to resubmit.");
            return Ok(1);
        }

        println!();
        println!("📊 Resubmit Summary:");
        println!("  Records resubmitted: {}", summary.records);
        println!("  Resource files: {}", summary.files.len());
        for file in &summary.files {
            println!("    {file}");
        }
        println!(
            "  Uploaded: {}",
            if summary.uploaded { "yes" } else { "no (dry run)" }
        );
        println!();

        Ok(0)
    }
}
