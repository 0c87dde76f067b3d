//! External system adapters
//!
//! Clients for everything outside the process: the source repository
//! database, the tracking store, the PubMed LinkOut FTP drop, and the
//! notification mail relay.

pub mod ftp;
pub mod mail;
pub mod source;
pub mod tracking;
