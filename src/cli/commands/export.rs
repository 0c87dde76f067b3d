//! Export command implementation
//!
//! One-shot run straight from the source database to the FTP drop,
//! without requiring anything in the tracking store first. With
//! `--incremental`, already-tracked items are excluded and the exported
//! records are tracked (and marked submitted) after the upload.

use crate::config::load_config;
use crate::core::{Pipeline, RunOutcome};
use clap::Args;

/// Arguments for the export command
#[derive(Args, Debug)]
pub struct ExportArgs {
    /// Exclude already-tracked items and track the exported ones
    #[arg(long)]
    pub incremental: bool,

    /// Dry run mode - write resource files locally but skip the upload
    #[arg(long)]
    pub dry_run: bool,

    /// Override the page size (records per resource file)
    #[arg(long)]
    pub page_size: Option<usize>,
}

impl ExportArgs {
    /// Execute the export command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(incremental = self.incremental, "Starting export command");

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

        let summary = match pipeline.run_export(self.incremental).await {
            Ok(s) => s,
            Err(e) => {
                tracing::error!(error = %e, "Export run failed");
                eprintln!("Export run failed: {e}");
                return Ok(5);
            }
        };

        if summary.outcome == RunOutcome::NothingToDo {
            println!("No qualifying publications to export.");
            return Ok(1);
        }

        println!();
        println!("📊 Export Summary:");
        println!("  Records exported: {}", summary.records);
        println!("  Resource files: {}", summary.files.len());
        for file in &summary.files {
            println!("    {file}");
        }
        if self.incremental {
            println!("  New entries tracked: {}", summary.new_entries);
        }
        println!(
            "  Uploaded: {}",
            if summary.uploaded { "yes" } else { "no (dry run)" }
        );
        println!();

        Ok(0)
    }
}
