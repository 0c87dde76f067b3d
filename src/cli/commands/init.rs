//! Init command implementation
//!
//! This module implements the `init` command for generating a sample
//! configuration file.

use clap::Args;
use std::fs;
use std::path::Path;

/// Arguments for the init command
#[derive(Args, Debug)]
pub struct InitArgs {
    /// Path where to create the configuration file
    #[arg(short, long, default_value = "linkout.toml")]
    pub output: String,

    /// Include example values and comments
    #[arg(long)]
    pub with_examples: bool,

    /// Overwrite existing file
    #[arg(long)]
    pub force: bool,
}

impl InitArgs {
    /// Execute the init command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(output = %self.output, "Initializing configuration file");

        println!("📝 Initializing linkout configuration");
        println!();

        if Path::new(&self.output).exists() && !self.force {
            println!("❌ Configuration file already exists: {}", self.output);
            println!("   Use --force to overwrite");
            return Ok(2);
        }

        let config_content = if self.with_examples {
            Self::generate_config_with_examples()
        } else {
            Self::generate_minimal_config()
        };

        match fs::write(&self.output, config_content) {
            Ok(_) => {
                println!("✅ Configuration file created: {}", self.output);
                println!();
                println!("Next steps:");
                println!("  1. Edit {} with your settings", self.output);
                println!("  2. Create a .env file with your credentials:");
                println!("     - Set LINKOUT_SOURCE_DB_URL and LINKOUT_TRACKING_DB_URL");
                println!("     - Set LINKOUT_FTP_PASS (your NCBI LinkOut account)");
                println!("  3. Validate configuration: linkout validate-config");
                println!("  4. Run: linkout enqueue");
                println!();
                Ok(0)
            }
            Err(e) => {
                println!("❌ Failed to write configuration file");
                println!("   Error: {}", e);
                Ok(5)
            }
        }
    }

    /// Generate minimal configuration
    fn generate_minimal_config() -> String {
        r#"# linkout Configuration File
# PubMed LinkOut submission pipeline

[application]
log_level = "info"
dry_run = false

[source]
connection_string = "${LINKOUT_SOURCE_DB_URL}"
# Leading characters of the item id to drop in LinkSet output
strip_prefix_len = 0

[tracking]
connection_string = "${LINKOUT_TRACKING_DB_URL}"

[linkset]
provider_id = "7383"
icon_url = "https://escholarship.org/images/pubmed_linkback.png"
base_url = "https://escholarship.org/uc/item/"

[submission]
page_size = 15000
threshold = 1000
output_dir = "output"
filename_stub = "linkout_resource"

[ftp]
host = "ftp-private.ncbi.nlm.nih.gov"
username = "${LINKOUT_FTP_USER}"
password = "${LINKOUT_FTP_PASS}"
remote_dir = "holdings"
"#
        .to_string()
    }

    /// Generate configuration with examples and comments
    fn generate_config_with_examples() -> String {
        r#"# linkout Configuration File
# PubMed LinkOut submission pipeline
#
# Selects publications with PubMed IDs from the repository database,
# builds LinkOut resource files, uploads them to the NCBI FTP drop, and
# records every submitted item in the tracking store.

[application]
# Log level: trace, debug, info, warn, error
log_level = "info"
# Dry run: build resource files but skip uploads and tracking writes
dry_run = false

[source]
# Read-only repository database
connection_string = "${LINKOUT_SOURCE_DB_URL}"
# Leading characters of the item id to drop in LinkSet output
# (2 for identifier schemes with a two-character namespace prefix)
strip_prefix_len = 0
max_connections = 10
connection_timeout_seconds = 30
statement_timeout_seconds = 60
# The selection query may be overridden per deployment. It must emit
# item_id and pmid columns, pmid digits-only, ordered by addition date.
#query = """
#SELECT i.id AS item_id, local_id ->> 'id' AS pmid
#FROM items i,
#     LATERAL jsonb_array_elements(i.attrs -> 'local_ids') AS local_id
#WHERE local_id ->> 'type' = 'pmid' AND local_id ->> 'id' ~ '^[0-9]+$'
#ORDER BY i.added
#"""

[tracking]
# Submission log database (schema is created on first run)
connection_string = "${LINKOUT_TRACKING_DB_URL}"
max_connections = 10

[linkset]
# NLM-assigned LinkOut provider id
provider_id = "7383"
# Declared as the icon.url / base.url DOCTYPE entities
icon_url = "https://escholarship.org/images/pubmed_linkback.png"
base_url = "https://escholarship.org/uc/item/"
url_name = "Full text from University of California eScholarship"
attribute = "full-text PDF"

[submission]
# Records per resource file
page_size = 15000
# Minimum pending entries before enqueue proceeds to submission
threshold = 1000
output_dir = "output"
filename_stub = "linkout_resource"

[ftp]
host = "ftp-private.ncbi.nlm.nih.gov"
port = 21
username = "${LINKOUT_FTP_USER}"
password = "${LINKOUT_FTP_PASS}"
remote_dir = "holdings"

[email]
# Post-upload notification (optional)
enabled = false
smtp_host = "smtp.example.edu"
smtp_port = 587
smtp_tls = true
from = "oapolicy@example.edu"
to = ["linkout-maintainers@example.edu"]
subject = "New .xml file added to LinkOut FTP"

[logging]
local_enabled = true
local_path = "logs"
# daily or hourly
local_rotation = "daily"
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_parses() {
        let content = InitArgs::generate_minimal_config();
        let parsed: toml::Value = toml::from_str(&content).unwrap();
        assert!(parsed.get("source").is_some());
        assert!(parsed.get("ftp").is_some());
    }

    #[test]
    fn test_example_config_parses() {
        let content = InitArgs::generate_config_with_examples();
        let parsed: toml::Value = toml::from_str(&content).unwrap();
        assert_eq!(
            parsed["linkset"]["provider_id"].as_str(),
            Some("7383")
        );
        assert_eq!(parsed["submission"]["threshold"].as_integer(), Some(1000));
    }
}
