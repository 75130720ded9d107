use crate::domain::validation::{PhoneParseError, ValidationError};
use crate::domain::value::{Credentials, MAX_PHONE_LENGTH, normalize_phone_numbers};

/// Form field name of the comma-joined recipient list.
pub const TO_FIELD: &str = "to";
/// Form field name of the message text.
pub const TEXT_FIELD: &str = "text";

#[derive(Debug, Clone)]
/// A single send: credentials, recipients, and the message text.
///
/// Built fresh for every call. [`validate`](Self::validate) checks the raw
/// input; [`normalize`](Self::normalize) then rewrites recipients in place.
pub struct SendMessageRequest {
    credentials: Credentials,
    to: Vec<String>,
    text: String,
}

impl SendMessageRequest {
    pub fn new(credentials: Credentials, to: Vec<String>, text: impl Into<String>) -> Self {
        Self {
            credentials,
            to,
            text: text.into(),
        }
    }

    /// Check recipients and text without touching them.
    ///
    /// Recipients are checked one by one (blank, then too long) and the first
    /// failure wins. Text is only checked once every recipient passes.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.to.is_empty() {
            return Err(ValidationError::NoDestination);
        }
        for dest in &self.to {
            if dest.trim().is_empty() {
                return Err(ValidationError::NoDestination);
            }
            if dest.len() > MAX_PHONE_LENGTH {
                return Err(ValidationError::InvalidDestination {
                    input: dest.clone(),
                    max: MAX_PHONE_LENGTH,
                });
            }
        }
        if self.text.trim().is_empty() {
            return Err(ValidationError::NoText);
        }
        Ok(())
    }

    /// Rewrite every recipient into country-code-prefixed digits.
    pub fn normalize(&mut self) -> Result<(), PhoneParseError> {
        normalize_phone_numbers(&mut self.to)
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn to(&self) -> &[String] {
        &self.to
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}
