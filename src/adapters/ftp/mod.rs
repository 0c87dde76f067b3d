//! PubMed LinkOut FTP delivery
//!
//! Uploads generated resource files to the provider's private FTP drop.
//! suppaftp's FtpStream is blocking, so the whole session runs inside
//! `spawn_blocking`: connect, login, change into the configured remote
//! directory, store every file under its base filename, quit. Any
//! failure aborts the session and is fatal to the run; the next
//! scheduled invocation retries the still-pending entries.

use crate::config::FtpConfig;
use crate::domain::{LinkoutError, Result};
use secrecy::ExposeSecret;
use std::fs::File;
use std::path::PathBuf;
use suppaftp::FtpStream;

/// FTP delivery conduit
pub struct FtpDelivery {
    host: String,
    port: u16,
    username: String,
    password: String,
    remote_dir: String,
}

impl FtpDelivery {
    pub fn new(config: &FtpConfig) -> Self {
        Self {
            host: config.host.clone(),
            port: config.port,
            username: config.username.clone(),
            password: config.password.expose_secret().as_ref().to_string(),
            remote_dir: config.remote_dir.clone(),
        }
    }

    /// Uploads every file in one FTP session
    ///
    /// Files are stored under their base filename in the configured
    /// remote directory. Returns the base filenames actually stored.
    pub async fn deliver(&self, files: Vec<PathBuf>) -> Result<Vec<String>> {
        let host = self.host.clone();
        let port = self.port;
        let username = self.username.clone();
        let password = self.password.clone();
        let remote_dir = self.remote_dir.clone();

        tracing::info!(host = %host, remote_dir = %remote_dir, count = files.len(), "Starting FTP delivery");

        let stored = tokio::task::spawn_blocking(move || -> Result<Vec<String>> {
            let mut ftp = FtpStream::connect((host.as_str(), port))
                .map_err(|e| LinkoutError::Ftp(format!("Failed to connect to {}: {}", host, e)))?;

            ftp.login(&username, &password)
                .map_err(|e| LinkoutError::Ftp(format!("Login failed: {}", e)))?;

            ftp.cwd(&remote_dir).map_err(|e| {
                LinkoutError::Ftp(format!("Failed to change to directory {}: {}", remote_dir, e))
            })?;

            let mut stored = Vec::with_capacity(files.len());
            for path in &files {
                let base_name = path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .ok_or_else(|| {
                        LinkoutError::Ftp(format!("Invalid output path: {}", path.display()))
                    })?
                    .to_string();

                let mut reader = File::open(path).map_err(|e| {
                    LinkoutError::Ftp(format!("Failed to open {}: {}", path.display(), e))
                })?;

                ftp.put_file(&base_name, &mut reader).map_err(|e| {
                    LinkoutError::Ftp(format!("Failed to store {}: {}", base_name, e))
                })?;

                tracing::info!(file = %base_name, "Stored resource file");
                stored.push(base_name);
            }

            ftp.quit()
                .map_err(|e| LinkoutError::Ftp(format!("Failed to close FTP session: {}", e)))?;

            Ok(stored)
        })
        .await
        .map_err(|e| LinkoutError::Ftp(format!("FTP task panicked: {}", e)))??;

        tracing::info!(count = stored.len(), "FTP delivery complete");
        Ok(stored)
    }
}
