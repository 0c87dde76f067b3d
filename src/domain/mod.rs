//! Domain models and types for linkout.
//!
//! The domain layer provides:
//! - **Strongly-typed identifiers** ([`ItemId`], [`Pmid`])
//! - **Pipeline models** ([`PublicationRecord`], [`TrackingEntry`])
//! - **Error types** ([`LinkoutError`])
//! - **Result type alias** ([`Result`])
//!
//! # Type Safety
//!
//! Identifiers use the newtype pattern so a repository id can never be passed
//! where a PMID is expected:
//!
//! ```rust
//! use linkout::domain::{ItemId, Pmid};
//!
//! # fn example() -> Result<(), String> {
//! let item_id = ItemId::new("qt4x95w9fp")?;
//! let pmid = Pmid::new("31346828")?;
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod ids;
pub mod record;
pub mod result;

// Re-export commonly used types for convenience
pub use errors::LinkoutError;
pub use ids::{ItemId, Pmid};
pub use record::{PublicationRecord, TrackingEntry, TrackingStats};
pub use result::Result;
