//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for the linkout
//! pipeline using clap.

pub mod commands;

use clap::{Parser, Subcommand};

/// linkout - PubMed LinkOut submission pipeline
#[derive(Parser, Debug)]
#[command(name = "linkout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "linkout.toml", env = "LINKOUT_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LINKOUT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Track newly qualifying publications and submit once enough accumulate
    Enqueue(commands::enqueue::EnqueueArgs),

    /// Build and upload resource files for all pending tracking entries
    Submit(commands::submit::SubmitArgs),

    /// Regenerate and upload resource files for the full holdings
    Resubmit(commands::resubmit::ResubmitArgs),

    /// One-shot export from the source database to the FTP drop
    Export(commands::export::ExportArgs),

    /// Show tracking store counts and the most recent submission
    Status(commands::status::StatusArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_enqueue() {
        let cli = Cli::parse_from(["linkout", "enqueue"]);
        assert_eq!(cli.config, "linkout.toml");
        assert!(matches!(cli.command, Commands::Enqueue(_)));
    }

    #[test]
    fn test_cli_parse_with_config() {
        let cli = Cli::parse_from(["linkout", "--config", "custom.toml", "submit"]);
        assert_eq!(cli.config, "custom.toml");
        assert!(matches!(cli.command, Commands::Submit(_)));
    }

    #[test]
    fn test_cli_parse_with_log_level() {
        let cli = Cli::parse_from(["linkout", "--log-level", "debug", "status"]);
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }

    #[test]
    fn test_cli_parse_enqueue_no_submit() {
        let cli = Cli::parse_from(["linkout", "enqueue", "--no-submit"]);
        match cli.command {
            Commands::Enqueue(args) => assert!(args.no_submit),
            _ => panic!("expected enqueue"),
        }
    }

    #[test]
    fn test_cli_parse_export_incremental() {
        let cli = Cli::parse_from(["linkout", "export", "--incremental"]);
        match cli.command {
            Commands::Export(args) => assert!(args.incremental),
            _ => panic!("expected export"),
        }
    }

    #[test]
    fn test_cli_parse_validate_config() {
        let cli = Cli::parse_from(["linkout", "validate-config"]);
        assert!(matches!(cli.command, Commands::ValidateConfig(_)));
    }

    #[test]
    fn test_cli_parse_init() {
        let cli = Cli::parse_from(["linkout", "init"]);
        assert!(matches!(cli.command, Commands::Init(_)));
    }
}
