//! Submit command implementation
//!
//! Builds resource files for every pending tracking entry, uploads them
//! to the LinkOut FTP drop, and marks the entries submitted.

use crate::config::load_config;
use crate::core::{Pipeline, RunOutcome};
use clap::Args;

/// Arguments for the submit command
#[derive(Args, Debug)]
pub struct SubmitArgs {
    /// Dry run mode - write resource files locally but skip the upload
    #[arg(long)]
    pub dry_run: bool,

    /// Override the page size (records per resource file)
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl SubmitArgs {
    /// Execute the submit command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Starting submit command");

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

        let summary = match pipeline.run_submit().await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Submit run failed");
                eprintln!("Submit run failed: {e}");
                return Ok(5);
            }
        };

        if summary.outcome == RunOutcome::NothingToDo {
            println!("Nothing pending to submit.");
            return Ok(1);
        }

        println!();
        println!("📊 Submit Summary:");
        println!("  Records submitted: {}", summary.records);
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
