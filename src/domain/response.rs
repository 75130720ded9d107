/// Business-level failure reported by Movider inside a well-formed response.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("code: {code}, name: {name}, desc: {description}")]
pub struct ProviderError {
    pub code: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SendMessageResponse {
    pub remaining_balance: f64,
    pub total_sms: i64,
    pub error: Option<ProviderError>,
}

/// Result of a send that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Movider accepted the request.
    Sent(SendMessageResponse),
    /// The first recipient is not on the allow-list; nothing was sent.
    Skipped { recipient: String },
}

impl SendOutcome {
    pub fn response(&self) -> Option<&SendMessageResponse> {
        match self {
            Self::Sent(response) => Some(response),
            Self::Skipped { .. } => None,
        }
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Self::Skipped { .. })
    }
}
