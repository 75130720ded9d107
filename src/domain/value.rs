use std::fmt;

use phonenumber::country;

use crate::domain::validation::PhoneParseError;

/// Longest recipient string accepted before normalization.
pub const MAX_PHONE_LENGTH: usize = 15;

/// Region used to interpret numbers without an explicit country code.
pub const DEFAULT_REGION: country::Id = country::Id::PH;

/// Country calling code of [`DEFAULT_REGION`]. Recipients starting with it are
/// treated as already normalized.
pub const COUNTRY_PREFIX: &str = "63";

#[derive(Clone, PartialEq, Eq, Hash)]
/// Movider API credentials.
///
/// Both values are opaque and sent to the provider verbatim.
pub struct Credentials {
    api_key: String,
    api_secret: String,
}

impl Credentials {
    /// Form field name of the key (`api_key`).
    pub const KEY_FIELD: &'static str = "api_key";
    /// Form field name of the secret (`api_secret`).
    pub const SECRET_FIELD: &'static str = "api_secret";

    pub fn new(api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_secret: api_secret.into(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn api_secret(&self) -> &str {
        &self.api_secret
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("api_secret", &"<redacted>")
            .finish()
    }
}

/// Convert a recipient into E.164 digits without the leading `+`.
///
/// Numbers that already start with [`COUNTRY_PREFIX`] are returned unchanged.
/// Everything else is parsed against [`DEFAULT_REGION`], so a national number
/// such as `092623456789` becomes `6392623456789`.
pub fn normalize_phone_number(input: &str) -> Result<String, PhoneParseError> {
    if input.starts_with(COUNTRY_PREFIX) {
        return Ok(input.to_owned());
    }

    let parsed = phonenumber::parse(Some(DEFAULT_REGION), input).map_err(|source| {
        PhoneParseError {
            input: input.to_owned(),
            source,
        }
    })?;

    let e164 = phonenumber::format(&parsed)
        .mode(phonenumber::Mode::E164)
        .to_string();

    Ok(e164.strip_prefix('+').unwrap_or(&e164).to_owned())
}

/// Normalize every recipient in place. Stops at the first number that fails
/// to parse, leaving earlier entries already rewritten.
pub fn normalize_phone_numbers(phones: &mut [String]) -> Result<(), PhoneParseError> {
    for phone in phones.iter_mut() {
        *phone = normalize_phone_number(phone)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn national_and_international_numbers_are_normalized_in_place() {
        let mut phones = vec![
            "092623456789".to_owned(),
            "095823456789".to_owned(),
            "6395823456788".to_owned(),
            "+6395823456787".to_owned(),
        ];

        normalize_phone_numbers(&mut phones).unwrap();

        assert_eq!(
            phones,
            vec![
                "6392623456789",
                "6395823456789",
                "6395823456788",
                "6395823456787",
            ]
        );
    }

    #[test]
    fn prefixed_numbers_are_left_untouched() {
        let once = normalize_phone_number("639123456789").unwrap();
        let twice = normalize_phone_number(&once).unwrap();
        assert_eq!(once, "639123456789");
        assert_eq!(twice, once);
    }

    #[test]
    fn unparseable_number_keeps_input_in_error() {
        let err = normalize_phone_number("not a phone").unwrap_err();
        assert_eq!(err.input, "not a phone");
    }

    #[test]
    fn credentials_debug_hides_values() {
        let creds = Credentials::new("apikey", "apisecret");
        let rendered = format!("{creds:?}");
        assert!(!rendered.contains("apikey"));
        assert!(!rendered.contains("apisecret"));
        assert_eq!(creds.api_key(), "apikey");
        assert_eq!(creds.api_secret(), "apisecret");
    }
}
