use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    NoDestination,
    InvalidDestination { input: String, max: usize },
    NoText,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoDestination => write!(f, "no destination number"),
            Self::InvalidDestination { input, max } => {
                write!(f, "recipient number is more than {max} characters: {input}")
            }
            Self::NoText => write!(f, "no text message"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// A recipient could not be parsed as a phone number for the default region.
#[derive(Debug, thiserror::Error)]
#[error("invalid phone number {input:?}: {source}")]
pub struct PhoneParseError {
    pub input: String,
    #[source]
    pub source: phonenumber::ParseError,
}
