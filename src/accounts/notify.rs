// src/accounts/notify.rs
//
// Welcome emails are fire-and-forget: the outcome is logged and never fed
// back into account creation.
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinHandle;
use tracing::{error, info};

pub const EMAILJS_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

#[derive(Clone, PartialEq, Serialize)]
pub struct WelcomeEmail {
    pub to_name: String,
    pub to_email: String,
    pub to_password: String,
}

impl fmt::Debug for WelcomeEmail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WelcomeEmail")
            .field("to_name", &self.to_name)
            .field("to_email", &self.to_email)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("email transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("email service rejected request ({status}): {body}")]
    Rejected { status: u16, body: String },
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone)]
pub struct EmailJsConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

pub struct EmailJsNotifier {
    client: reqwest::Client,
    endpoint: String,
    config: EmailJsConfig,
}

#[derive(Serialize)]
struct EmailJsRequest<'a> {
    service_id: &'a str,
    template_id: &'a str,
    user_id: &'a str,
    template_params: &'a WelcomeEmail,
}

impl EmailJsNotifier {
    pub fn new(config: EmailJsConfig) -> Result<Self, NotifyError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client, endpoint: EMAILJS_ENDPOINT.to_string(), config })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl Notifier for EmailJsNotifier {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), NotifyError> {
        let request = EmailJsRequest {
            service_id: &self.config.service_id,
            template_id: &self.config.template_id,
            user_id: &self.config.public_key,
            template_params: email,
        };

        let response = self.client.post(&self.endpoint).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected { status: status.as_u16(), body });
        }
        Ok(())
    }
}

/// Used when no email service is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), NotifyError> {
        info!(to = %email.to_email, "Email service not configured; welcome email skipped");
        Ok(())
    }
}

/// Sends the welcome email on a detached task. The handle yields nothing;
/// callers may drop it.
pub fn dispatch_welcome(notifier: Arc<dyn Notifier>, email: WelcomeEmail) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.send_welcome(&email).await {
            Ok(()) => info!(to = %email.to_email, "Welcome email sent"),
            Err(e) => error!(to = %email.to_email, error = %e, "Welcome email failed"),
        }
    })
}
