//! Outgoing mail for the contact form.
//!
//! [`Mailer`] is the seam the contact relay sends through; [`ResendMailer`]
//! delivers via the Resend HTTP API.

use std::time::Duration;

use chapel_cms::BoxFuture;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, warn};

/// Resend's send endpoint.
pub const RESEND_ENDPOINT: &str = "https://api.resend.com/emails";

const SEND_TIMEOUT: Duration = Duration::from_secs(15);

/// Errors returned by a [`Mailer`].
#[derive(Debug, Error)]
pub enum MailError {
    /// The provider could not be reached.
    #[error("mail request failed: {0}")]
    Network(String),

    /// The provider answered with an error status.
    #[error("mail provider rejected the message ({status}): {body}")]
    Rejected { status: u16, body: String },

    /// The mailer could not be constructed.
    #[error("mail client setup failed: {0}")]
    Setup(String),
}

/// A plain-text message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutgoingEmail {
    pub from: String,
    pub to: String,
    pub reply_to: String,
    pub subject: String,
    pub text: String,
}

/// Something that can deliver an [`OutgoingEmail`].
pub trait Mailer: Send + Sync {
    fn send(&self, email: OutgoingEmail) -> BoxFuture<'_, Result<(), MailError>>;
}

/// Delivers mail through the Resend API.
#[derive(Debug, Clone)]
pub struct ResendMailer {
    http_client: reqwest::Client,
    api_key: String,
    endpoint: String,
}

#[derive(Serialize)]
struct ResendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    reply_to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl ResendMailer {
    pub fn new(api_key: impl Into<String>) -> Result<Self, MailError> {
        let http_client = reqwest::Client::builder()
            .timeout(SEND_TIMEOUT)
            .build()
            .map_err(|e| MailError::Setup(e.to_string()))?;
        Ok(Self {
            http_client,
            api_key: api_key.into(),
            endpoint: RESEND_ENDPOINT.to_string(),
        })
    }

    /// Builder method to send to a different endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    async fn deliver(&self, email: OutgoingEmail) -> Result<(), MailError> {
        let body = ResendRequest {
            from: &email.from,
            to: [&email.to],
            reply_to: &email.reply_to,
            subject: &email.subject,
            text: &email.text,
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MailError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "mail provider returned an error status");
            return Err(MailError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(to = %email.to, "message accepted by mail provider");
        Ok(())
    }
}

impl Mailer for ResendMailer {
    fn send(&self, email: OutgoingEmail) -> BoxFuture<'_, Result<(), MailError>> {
        Box::pin(self.deliver(email))
    }
}
