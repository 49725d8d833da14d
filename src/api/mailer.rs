//! Confirmation-mail delivery.
//!
//! Notification is a collaborator behind the [`Mailer`] trait: registration
//! behaves the same whether mail goes out over HTTP or only into the log.

use crate::config::MailConfig;
use crate::error::LiftError;
use async_trait::async_trait;
use backon::{ExponentialBuilder, Retryable};
use serde::Serialize;
use std::time::Duration;
use tracing::{error, info};
use url::Url;

/// Brevo-style transactional endpoint used when none is configured.
const DEFAULT_MAIL_ENDPOINT: &str = "https://api.brevo.com/v3/smtp/email";

const CONFIRMATION_SUBJECT: &str = "Account Validation - Workout Tracker";

fn default_retry_policy() -> ExponentialBuilder {
    ExponentialBuilder::default()
        .with_min_delay(Duration::from_secs(1))
        .with_max_delay(Duration::from_secs(3))
        .with_max_times(3)
        .with_jitter()
}

/// Outbound notification seam.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Delivers the account-confirmation message for `link` to `email`.
    async fn send_confirmation(
        &self,
        email: &str,
        first_name: &str,
        link: &Url,
    ) -> Result<(), LiftError>;
}

#[derive(Serialize)]
struct MailAddress<'a> {
    email: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<&'a str>,
}

#[derive(Serialize)]
struct SendMailBody<'a> {
    sender: MailAddress<'a>,
    to: Vec<MailAddress<'a>>,
    subject: &'a str,
    #[serde(rename = "textContent")]
    text_content: String,
}

/// Posts confirmation mail to a Brevo-style HTTP API, retrying server-side
/// failures with exponential backoff.
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    sender: String,
}

impl HttpMailer {
    /// Builds a mailer from config; `None` when mail is not configured.
    pub fn from_config(cfg: &MailConfig) -> Result<Option<Self>, LiftError> {
        let (Some(api_key), Some(sender)) = (cfg.api_key.clone(), cfg.sender.clone()) else {
            return Ok(None);
        };
        let endpoint = match &cfg.endpoint {
            Some(url) => url.clone(),
            None => Url::parse(DEFAULT_MAIL_ENDPOINT)?,
        };
        Ok(Some(Self {
            client: reqwest::Client::new(),
            endpoint,
            api_key,
            sender,
        }))
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send_confirmation(
        &self,
        email: &str,
        first_name: &str,
        link: &Url,
    ) -> Result<(), LiftError> {
        let body = SendMailBody {
            sender: MailAddress {
                email: &self.sender,
                name: None,
            },
            to: vec![MailAddress {
                email,
                name: Some(first_name),
            }],
            subject: CONFIRMATION_SUBJECT,
            text_content: format!(
                "Hi {first_name},\n\nPlease validate your account by clicking the link below:\n{link}\n\nIf you did not register, you can safely ignore this email."
            ),
        };

        let retry_policy = default_retry_policy();
        let resp = (|| async {
            let resp = self
                .client
                .post(self.endpoint.clone())
                .header("api-key", &self.api_key)
                .json(&body)
                .send()
                .await?;
            if resp.status().is_server_error() {
                let status = resp.status();
                let err = resp.error_for_status().unwrap_err();
                error!("mail API server error (will retry): {}", status);
                return Err(err);
            }
            Ok(resp)
        })
        .retry(retry_policy)
        .await?;

        // 4xx means the request itself is wrong; no point retrying
        resp.error_for_status()?;
        info!(to = %email, "confirmation mail dispatched");
        Ok(())
    }
}

/// Fallback when mail is unconfigured: the link lands in the log so the
/// confirmation flow stays usable in development.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_confirmation(
        &self,
        email: &str,
        _first_name: &str,
        link: &Url,
    ) -> Result<(), LiftError> {
        info!(to = %email, link = %link, "mail transport unconfigured, logging confirmation link");
        Ok(())
    }
}
