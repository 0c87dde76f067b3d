// Linkout - PubMed LinkOut Submission Pipeline
// Copyright (c) 2025 Linkout Contributors
// Licensed under the MIT License

//! # linkout - PubMed LinkOut submission pipeline
//!
//! linkout keeps an institutional repository's full-text links visible on
//! PubMed. It selects publications carrying PubMed IDs from the repository
//! database, builds NLM LinkOut resource files, uploads them to the
//! provider's private NCBI FTP drop, and records every submitted item in a
//! tracking store so nothing is submitted twice.
//!
//! ## Overview
//!
//! This library provides the core functionality for:
//! - **Selecting** qualifying publications (non-empty, digits-only PubMed
//!   IDs) from the repository database
//! - **Diffing** against the tracking store so only new items are enqueued
//! - **Building** paged LinkSet XML resource files with the DOCTYPE entity
//!   declarations PubMed expects
//! - **Delivering** the files over FTP and acknowledging them in the
//!   tracking store only after the whole batch lands
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Business logic (pagination, selection, LinkSet rendering,
//!   pipeline coordination)
//! - [`adapters`] - External integrations (source DB, tracking store, FTP,
//!   SMTP)
//! - [`domain`] - Core domain types and models
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use linkout::config::load_config;
//! use linkout::core::Pipeline;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("linkout.toml")?;
//!     let pipeline = Pipeline::new(config).await?;
//!
//!     let summary = pipeline.run_enqueue(false).await?;
//!     println!("Tracked {} new publications", summary.new_entries);
//!     Ok(())
//! }
//! ```

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
