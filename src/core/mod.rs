//! Core pipeline logic
//!
//! Pure building blocks (pagination, selection, LinkSet rendering) plus
//! the coordinator that wires them to the adapters.

pub mod linkset;
pub mod page;
pub mod pipeline;
pub mod select;

pub use pipeline::{Pipeline, RunOutcome, RunSummary};
