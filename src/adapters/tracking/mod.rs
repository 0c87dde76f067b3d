//! Tracking store adapter

pub mod store;

pub use store::TrackingStore;
