//! Environment-driven configuration.
//!
//! Values come from `LIFTLOG_`-prefixed environment variables; `__` separates
//! nested sections, so `LIFTLOG_MAIL__API_KEY` maps to `mail.api_key`.
//! Everything except the token-signing secret has a workable default.

use figment::Figment;
use figment::providers::Env;
use serde::Deserialize;
use url::Url;

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_database_url() -> String {
    "sqlite:liftlog.db".to_string()
}

fn default_loglevel() -> String {
    "info".to_string()
}

fn default_public_base_url() -> Url {
    Url::parse("http://localhost:3000").expect("default public_base_url is a valid url")
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Socket address the HTTP listener binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// SQLite connection string, `sqlite:<path>`.
    #[serde(default = "default_database_url")]
    pub database_url: String,

    /// Log filter directive, same grammar as `RUST_LOG`.
    #[serde(default = "default_loglevel")]
    pub loglevel: String,

    /// Secret for signing session tokens. No default; startup fails when unset.
    pub jwt_secret: String,

    /// Base URL embedded in account confirmation links.
    #[serde(default = "default_public_base_url")]
    pub public_base_url: Url,

    #[serde(default)]
    pub mail: MailConfig,
}

/// Outbound-mail settings. When incomplete, confirmation links are logged
/// instead of sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MailConfig {
    /// Transactional-mail API endpoint. Falls back to the Brevo v3 endpoint.
    pub endpoint: Option<Url>,

    /// API key sent in the `api-key` request header.
    pub api_key: Option<String>,

    /// Sender address for confirmation mail.
    pub sender: Option<String>,
}

impl MailConfig {
    /// The mail API needs at least a key and a sender address.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some() && self.sender.is_some()
    }
}

impl Config {
    pub fn load() -> Result<Self, figment::Error> {
        Figment::new()
            .merge(Env::prefixed("LIFTLOG_").split("__"))
            .extract()
    }
}
