//! Sender settings loaded from the process environment.
//!
//! - `MOVIDER_API_KEY` / `MOVIDER_API_SECRET` (required)
//! - `MOVIDER_ALLOWED_RECIPIENTS`: comma-separated allow-list (optional)
//! - `MOVIDER_API_URL`: API base URL override (optional)

use crate::client::{MoviderError, Sender};
use crate::domain::Credentials;

pub const API_KEY_VAR: &str = "MOVIDER_API_KEY";
pub const API_SECRET_VAR: &str = "MOVIDER_API_SECRET";
pub const ALLOWED_RECIPIENTS_VAR: &str = "MOVIDER_ALLOWED_RECIPIENTS";
pub const API_URL_VAR: &str = "MOVIDER_API_URL";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} environment variable is required")]
    Missing { var: &'static str },
}

#[derive(Debug, Clone)]
pub struct SenderConfig {
    pub credentials: Credentials,
    pub allowed_recipients: Vec<String>,
    pub base_url: Option<String>,
}

impl SenderConfig {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |var: &'static str| lookup(var).ok_or(ConfigError::Missing { var });

        let credentials = Credentials::new(required(API_KEY_VAR)?, required(API_SECRET_VAR)?);
        let allowed_recipients = lookup(ALLOWED_RECIPIENTS_VAR)
            .map(|raw| parse_recipient_list(&raw))
            .unwrap_or_default();
        let base_url = lookup(API_URL_VAR).filter(|url| !url.trim().is_empty());

        Ok(Self {
            credentials,
            allowed_recipients,
            base_url,
        })
    }

    pub fn into_sender(self) -> Result<Sender, MoviderError> {
        let mut builder =
            Sender::builder(self.credentials).allowed_recipients(self.allowed_recipients);
        if let Some(base_url) = self.base_url {
            builder = builder.base_url(base_url);
        }
        builder.build()
    }
}

/// Split a comma-separated list, trimming entries and dropping empty ones.
pub fn parse_recipient_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|it| !it.is_empty())
        .map(str::to_owned)
        .collect()
}
