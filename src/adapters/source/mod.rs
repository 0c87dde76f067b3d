//! Source repository adapter

pub mod client;

pub use client::SourceClient;
