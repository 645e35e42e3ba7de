//! SMTP mail for inbox notifications, sent through `lettre`.

use async_trait::async_trait;

use crate::bus::SiteEvent;

#[derive(Debug, thiserror::Error)]
pub enum EmailError {
    #[error("SMTP delivery failed: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    #[error("Invalid mailbox: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The message itself was malformed.
    #[error("Could not compose email: {0}")]
    Build(String),
}

const SMTP_SUBMISSION_PORT: u16 = 587;

const FALLBACK_SENDER: &str = "noreply@siliconedge.local";

/// Where and how to relay notification mail.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub from_address: String,
    /// Username and password, only used when both are present.
    pub smtp_user: Option<String>,
    pub smtp_password: Option<String>,
}

impl EmailConfig {
    /// Reads `SMTP_HOST`, `SMTP_PORT`, `SMTP_FROM`, `SMTP_USER` and
    /// `SMTP_PASSWORD`. Mail is disabled (`None`) without a host.
    pub fn from_env() -> Option<Self> {
        let env = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());

        let smtp_host = env("SMTP_HOST")?;
        let smtp_port = match env("SMTP_PORT").map(|raw| raw.parse::<u16>()) {
            Some(Ok(port)) => port,
            Some(Err(_)) => {
                tracing::warn!("SMTP_PORT is not a port number, using {SMTP_SUBMISSION_PORT}");
                SMTP_SUBMISSION_PORT
            }
            None => SMTP_SUBMISSION_PORT,
        };

        Some(Self {
            smtp_host,
            smtp_port,
            from_address: env("SMTP_FROM").unwrap_or_else(|| FALLBACK_SENDER.to_owned()),
            smtp_user: env("SMTP_USER"),
            smtp_password: env("SMTP_PASSWORD"),
        })
    }
}

// ---------------------------------------------------------------------------
// Mailer seam
// ---------------------------------------------------------------------------

/// Sends one email about one event.
#[async_trait]
pub trait EventMailer: Send + Sync {
    async fn deliver(&self, to_email: &str, event: &SiteEvent) -> Result<(), EmailError>;
}

/// Subject line for an event email.
pub fn subject_for(event: &SiteEvent) -> String {
    let detail = match event.event_type.as_str() {
        crate::bus::CONTACT_RECEIVED => event.payload["subject"].as_str(),
        crate::bus::APPLICATION_RECEIVED => event.payload["job_title"].as_str(),
        _ => None,
    };
    match detail {
        Some(detail) => format!("[SiliconEdge] {}: {}", event.event_type, detail),
        None => format!("[SiliconEdge] {}", event.event_type),
    }
}

/// Plain-text body: one `key: value` line per payload field.
pub fn body_for(event: &SiteEvent) -> String {
    let mut body = format!("Event: {}\nTime: {}\n", event.event_type, event.timestamp);
    if let Some(id) = &event.source_id {
        body.push_str(&format!("Id: {id}\n"));
    }
    if let Some(fields) = event.payload.as_object() {
        body.push('\n');
        for (key, value) in fields {
            let text = match value {
                serde_json::Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            body.push_str(&format!("{key}: {text}\n"));
        }
    }
    body
}

// ---------------------------------------------------------------------------
// EmailDelivery
// ---------------------------------------------------------------------------

/// Sends event emails via SMTP.
pub struct EmailDelivery {
    config: EmailConfig,
}

impl EmailDelivery {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl EventMailer for EmailDelivery {
    async fn deliver(&self, to_email: &str, event: &SiteEvent) -> Result<(), EmailError> {
        use lettre::message::header::ContentType;
        use lettre::transport::smtp::authentication::Credentials;
        use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

        let cfg = &self.config;
        let message = Message::builder()
            .from(cfg.from_address.parse()?)
            .to(to_email.parse()?)
            .subject(subject_for(event))
            .header(ContentType::TEXT_PLAIN)
            .body(body_for(event))
            .map_err(|e| EmailError::Build(e.to_string()))?;

        let relay = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&cfg.smtp_host)?
            .port(cfg.smtp_port);
        let relay = match (&cfg.smtp_user, &cfg.smtp_password) {
            (Some(user), Some(password)) => {
                relay.credentials(Credentials::new(user.clone(), password.clone()))
            }
            _ => relay,
        };

        relay.build().send(message).await?;
        tracing::info!(to = to_email, event_type = %event.event_type, "Inbox notification sent");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::bus::{APPLICATION_RECEIVED, CONTACT_RECEIVED};

    #[test]
    fn subject_names_the_contact_subject() {
        let event = SiteEvent::new(CONTACT_RECEIVED).with_payload(json!({ "subject": "Inquiry" }));
        assert_eq!(
            subject_for(&event),
            "[SiliconEdge] contact.received: Inquiry"
        );
    }

    #[test]
    fn subject_without_detail() {
        let event = SiteEvent::new(APPLICATION_RECEIVED);
        assert_eq!(subject_for(&event), "[SiliconEdge] application.received");
    }

    #[test]
    fn body_lists_payload_fields() {
        let event = SiteEvent::new(CONTACT_RECEIVED)
            .with_source("m1")
            .with_payload(json!({ "name": "Jane", "email": "jane@x.com" }));
        let body = body_for(&event);
        assert!(body.contains("Id: m1\n"));
        assert!(body.contains("name: Jane\n"));
        assert!(body.contains("email: jane@x.com\n"));
    }

    #[test]
    fn build_error_message() {
        let err = EmailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Could not compose email: missing body");
    }
}
