//! Contact form relay: `POST /api/contact`.
//!
//! Validates the submitted form and forwards it as a plain-text email to the
//! configured recipient. Every failure answers with `{"error": "..."}`.

use std::sync::Arc;

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::{error, info};

use crate::mail::{MailError, Mailer, OutgoingEmail};
use crate::state::AppState;

/// The submitted form. Missing or non-string fields count as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactRequest {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
}

impl ContactRequest {
    /// Parses a request body. Only malformed JSON is an error.
    pub fn parse(body: &[u8]) -> Result<Self, ContactError> {
        let value: Value = serde_json::from_slice(body).map_err(|_| ContactError::InvalidJson)?;
        Ok(serde_json::from_value(value).unwrap_or_default())
    }
}

/// Why a submission was not relayed.
#[derive(Debug, Error)]
pub enum ContactError {
    #[error("Invalid JSON body.")]
    InvalidJson,

    #[error("Please provide name, email, and message.")]
    MissingFields,

    #[error("Email service not configured (missing RESEND_API_KEY).")]
    NotConfigured,

    #[error("Missing CONTACT_TO_EMAIL environment variable.")]
    MissingRecipient,

    #[error("Failed to send message. Please try again later.")]
    SendFailed(#[source] MailError),
}

impl ContactError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson | Self::MissingFields => StatusCode::BAD_REQUEST,
            Self::NotConfigured | Self::MissingRecipient | Self::SendFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ContactError {
    fn into_response(self) -> Response {
        (self.status(), Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Delivery settings for contact messages.
#[derive(Clone)]
pub struct ContactRelay {
    mailer: Option<Arc<dyn Mailer>>,
    to: Option<String>,
    from: String,
}

impl std::fmt::Debug for ContactRelay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactRelay")
            .field("mailer", &self.mailer.is_some())
            .field("to", &self.to)
            .field("from", &self.from)
            .finish()
    }
}

impl ContactRelay {
    /// Creates a relay sending as `from`, with no mailer and no recipient.
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            mailer: None,
            to: None,
            from: from.into(),
        }
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn Mailer>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    /// Builder method to set the recipient; blank addresses are ignored.
    pub fn with_recipient(mut self, to: impl Into<String>) -> Self {
        let to = to.into();
        self.to = (!to.trim().is_empty()).then_some(to);
        self
    }

    /// Validates `request` and sends it.
    pub async fn relay(&self, request: ContactRequest) -> Result<(), ContactError> {
        let field = |v: &Option<String>| {
            v.as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let (Some(name), Some(email), Some(message)) = (
            field(&request.full_name),
            field(&request.email),
            field(&request.message),
        ) else {
            return Err(ContactError::MissingFields);
        };

        let mailer = self.mailer.as_ref().ok_or(ContactError::NotConfigured)?;
        let to = self.to.clone().ok_or(ContactError::MissingRecipient)?;

        let outgoing = compose(&self.from, &to, &name, &email, &message);
        mailer.send(outgoing).await.map_err(|e| {
            error!(error = %e, "error sending contact email");
            ContactError::SendFailed(e)
        })?;

        info!(from = %email, "contact message relayed");
        Ok(())
    }
}

/// Builds the email for one submission.
pub fn compose(from: &str, to: &str, name: &str, email: &str, message: &str) -> OutgoingEmail {
    OutgoingEmail {
        from: from.to_string(),
        to: to.to_string(),
        reply_to: email.to_string(),
        subject: format!("New contact from {}", name),
        text: format!("Name: {}\nEmail: {}\n\nMessage:\n{}", name, email, message),
    }
}

/// `POST /api/contact`
pub async fn submit(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    let result = match ContactRequest::parse(&body) {
        Ok(request) => state.contact.relay(request).await,
        Err(e) => Err(e),
    };
    match result {
        Ok(()) => Json(json!({ "ok": true })).into_response(),
        Err(e) => e.into_response(),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use chapel_cms::BoxFuture;
    use std::sync::Mutex;

    /// Records every message instead of sending it.
    #[derive(Default)]
    pub(crate) struct RecordingMailer {
        pub sent: Mutex<Vec<OutgoingEmail>>,
        pub fail: bool,
    }

    impl RecordingMailer {
        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Default::default()
            }
        }

        pub fn sent(&self) -> Vec<OutgoingEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl Mailer for RecordingMailer {
        fn send(&self, email: OutgoingEmail) -> BoxFuture<'_, Result<(), MailError>> {
            Box::pin(async move {
                if self.fail {
                    return Err(MailError::Rejected {
                        status: 422,
                        body: "invalid from".into(),
                    });
                }
                self.sent.lock().unwrap().push(email);
                Ok(())
            })
        }
    }

    fn request(name: &str, email: &str, message: &str) -> ContactRequest {
        ContactRequest {
            full_name: Some(name.into()),
            email: Some(email.into()),
            message: Some(message.into()),
        }
    }

    mod parsing {
        use super::*;

        #[test]
        fn camel_case_fields() {
            let req = ContactRequest::parse(
                br#"{"fullName":"Ann","email":"ann@example.org","message":"Hi"}"#,
            )
            .unwrap();
            assert_eq!(req, request("Ann", "ann@example.org", "Hi"));
        }

        #[test]
        fn malformed_json_is_rejected() {
            let err = ContactRequest::parse(b"{fullName:").unwrap_err();
            assert!(matches!(err, ContactError::InvalidJson));
            assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        }

        #[test]
        fn wrong_shapes_are_empty_requests() {
            assert_eq!(ContactRequest::parse(b"[1,2]").unwrap(), ContactRequest::default());
            assert_eq!(
                ContactRequest::parse(br#"{"fullName": 5}"#).unwrap(),
                ContactRequest::default()
            );
        }
    }

    mod relaying {
        use super::*;

        #[tokio::test]
        async fn sends_trimmed_message() {
            let mailer = Arc::new(RecordingMailer::default());
            let relay = ContactRelay::new("no-reply@example.com")
                .with_mailer(mailer.clone())
                .with_recipient("office@example.org");

            relay
                .relay(request(" Ann ", "ann@example.org ", "Hello\nthere "))
                .await
                .unwrap();

            let sent = mailer.sent();
            assert_eq!(sent.len(), 1);
            assert_eq!(sent[0].subject, "New contact from Ann");
            assert_eq!(sent[0].reply_to, "ann@example.org");
            assert_eq!(sent[0].to, "office@example.org");
            assert_eq!(sent[0].from, "no-reply@example.com");
            assert_eq!(
                sent[0].text,
                "Name: Ann\nEmail: ann@example.org\n\nMessage:\nHello\nthere"
            );
        }

        #[tokio::test]
        async fn blank_field_is_rejected_before_configuration() {
            let relay = ContactRelay::new("no-reply@example.com");
            let err = relay.relay(request("Ann", "  ", "Hi")).await.unwrap_err();
            assert!(matches!(err, ContactError::MissingFields));
        }

        #[tokio::test]
        async fn missing_mailer() {
            let relay = ContactRelay::new("no-reply@example.com").with_recipient("office@example.org");
            let err = relay.relay(request("Ann", "a@b.c", "Hi")).await.unwrap_err();
            assert_eq!(
                err.to_string(),
                "Email service not configured (missing RESEND_API_KEY)."
            );
            assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        }

        #[tokio::test]
        async fn missing_recipient() {
            let relay = ContactRelay::new("no-reply@example.com")
                .with_mailer(Arc::new(RecordingMailer::default()))
                .with_recipient(" ");
            let err = relay.relay(request("Ann", "a@b.c", "Hi")).await.unwrap_err();
            assert_eq!(err.to_string(), "Missing CONTACT_TO_EMAIL environment variable.");
        }

        #[tokio::test]
        async fn provider_failure() {
            let relay = ContactRelay::new("no-reply@example.com")
                .with_mailer(Arc::new(RecordingMailer::failing()))
                .with_recipient("office@example.org");
            let err = relay.relay(request("Ann", "a@b.c", "Hi")).await.unwrap_err();
            assert_eq!(
                err.to_string(),
                "Failed to send message. Please try again later."
            );
            assert!(matches!(err, ContactError::SendFailed(_)));
        }
    }
}
