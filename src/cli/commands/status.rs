//! Status command implementation
//!
//! Displays tracking store counts and the most recent submission. A
//! growing pending count across runs means entries are stuck below the
//! threshold or a delivery keeps failing.

use crate::adapters::tracking::TrackingStore;
use crate::config::load_config;
use clap::Args;

/// Arguments for the status command
#[derive(Args, Debug)]
pub struct StatusArgs {}

impl StatusArgs {
    /// Execute the status command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!("Checking submission status");

        println!("📊 LinkOut Submission Status");
        println!();

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                println!("❌ Failed to load configuration file");
                println!("   Error: {}", e);
                return Ok(2);
            }
        };

        let tracking = match TrackingStore::new(config.tracking).await {
            Ok(t) => t,
            Err(e) => {
                println!("❌ Failed to connect to tracking store");
                println!("   Error: {}", e);
                return Ok(4);
            }
        };

        let stats = match tracking.stats().await {
            Ok(s) => s,
            Err(e) => {
                println!("❌ Failed to read tracking store");
                println!("   Error: {}", e);
                return Ok(5);
            }
        };

        if stats.total == 0 {
            println!("No submission history found.");
            println!("Run 'linkout enqueue' to start tracking publications.");
            return Ok(0);
        }

        println!("  Tracked entries: {}", stats.total);
        println!("  Submitted: {}", stats.submitted);
        println!("  Pending: {}", stats.pending);

        match (&stats.last_submitted_at, &stats.last_output_filename) {
            (Some(at), Some(filename)) => {
                println!();
                println!(
                    "  Last submission: {} ({})",
                    at.format("%Y-%m-%d %H:%M:%S UTC"),
                    filename
                );
            }
            (Some(at), None) => {
                println!();
                println!("  Last submission: {}", at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            _ => {
                println!();
                println!("  Last submission: never");
            }
        }
        println!();

        Ok(0)
    }
}
