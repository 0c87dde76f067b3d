//! Configuration management
//!
//! TOML-based configuration with environment variable substitution,
//! `LINKOUT_*` overrides, and validation. Connection strings and
//! passwords are held in [`SecretString`] so they never appear in debug
//! output or logs.

pub mod loader;
pub mod schema;
pub mod secret;

pub use loader::load_config;
pub use schema::{
    ApplicationConfig, EmailConfig, FtpConfig, LinkSetConfig, LinkoutConfig, LoggingConfig,
    SourceConfig, SubmissionConfig, TrackingConfig,
};
pub use secret::{secret_string, SecretString, SecretValue};
