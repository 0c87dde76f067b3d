//! Command implementations

pub mod enqueue;
pub mod export;
pub mod init;
pub mod resubmit;
pub mod status;
pub mod submit;
pub mod validate;
