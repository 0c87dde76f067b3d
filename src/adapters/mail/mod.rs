//! Submission notification email
//!
//! Sends a short message to the LinkOut maintainers after a successful
//! upload, listing the resource files that landed on the FTP drop.
//! Notification failure is reported by the caller as a warning, never as
//! a run failure.

use crate::config::EmailConfig;
use crate::domain::{LinkoutError, Result};
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use secrecy::ExposeSecret;

/// SMTP notifier for completed submissions
pub struct Notifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    to: Vec<Mailbox>,
    subject: String,
}

impl Notifier {
    /// Builds a notifier from configuration
    ///
    /// Returns `None` when email notification is disabled.
    pub fn from_config(config: &EmailConfig) -> Result<Option<Self>> {
        if !config.enabled {
            return Ok(None);
        }

        let mut builder = if config.smtp_tls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host).map_err(
                |e| LinkoutError::Notification(format!("Invalid SMTP relay configuration: {}", e)),
            )?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.smtp_host)
        };
        builder = builder.port(config.smtp_port);

        if let (Some(username), Some(password)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(
                username.clone(),
                password.expose_secret().as_ref().to_string(),
            ));
        }

        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| LinkoutError::Notification(format!("Invalid from address: {}", e)))?;

        let to = config
            .to
            .iter()
            .map(|addr| {
                addr.parse().map_err(|e| {
                    LinkoutError::Notification(format!("Invalid recipient address {}: {}", addr, e))
                })
            })
            .collect::<Result<Vec<Mailbox>>>()?;

        Ok(Some(Self {
            transport: builder.build(),
            from,
            to,
            subject: config.subject.clone(),
        }))
    }

    /// Sends the post-upload notification
    pub async fn send_submission_notice(
        &self,
        filenames: &[String],
        record_count: usize,
    ) -> Result<()> {
        let mut body = format!(
            "The PubMed LinkOut pipeline uploaded {} resource file(s) covering {} publication(s):\n\n",
            filenames.len(),
            record_count
        );
        for filename in filenames {
            body.push_str(filename);
            body.push('\n');
        }

        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(self.subject.clone());
        for recipient in &self.to {
            builder = builder.to(recipient.clone());
        }

        let message = builder
            .body(body)
            .map_err(|e| LinkoutError::Notification(format!("Failed to build message: {}", e)))?;

        self.transport
            .send(message)
            .await
            .map_err(|e| LinkoutError::Notification(format!("Failed to send email: {}", e)))?;

        tracing::info!(recipients = self.to.len(), "Notification email sent");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_config_disabled_returns_none() {
        let config = EmailConfig::default();
        assert!(Notifier::from_config(&config).unwrap().is_none());
    }

    #[test]
    fn test_from_config_rejects_bad_from_address() {
        let config = EmailConfig {
            enabled: true,
            smtp_host: "smtp.example.edu".to_string(),
            smtp_tls: false,
            from: "not an address".to_string(),
            to: vec!["oapolicy@example.edu".to_string()],
            ..Default::default()
        };
        assert!(Notifier::from_config(&config).is_err());
    }
}
