use serde::Deserialize;

use crate::domain::{
    Credentials, ProviderError, SendMessageRequest, SendMessageResponse, TEXT_FIELD, TO_FIELD,
};

// Absent and `null` fields both decode to the zero value.
#[derive(Debug, Clone, Deserialize)]
struct SendMessageJsonResponse {
    #[serde(default)]
    remaining_balance: Option<f64>,
    #[serde(default)]
    total_sms: Option<i64>,
    #[serde(default)]
    error: Option<ProviderJsonError>,
}

#[derive(Debug, Clone, Deserialize)]
struct ProviderJsonError {
    #[serde(default)]
    code: Option<i64>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<ProviderJsonError> for ProviderError {
    fn from(value: ProviderJsonError) -> Self {
        Self {
            code: value.code.unwrap_or_default(),
            name: value.name.unwrap_or_default(),
            description: value.description.unwrap_or_default(),
        }
    }
}

/// Build the `application/x-www-form-urlencoded` body for `POST /sms`.
///
/// Field order is fixed. Credentials and the comma-joined recipients go out
/// as-is; only the text is form-escaped (spaces become `+`).
pub fn encode_send_message_body(request: &SendMessageRequest) -> String {
    let creds = request.credentials();
    let to = request.to().join(",");
    let text: String = url::form_urlencoded::byte_serialize(request.text().as_bytes()).collect();

    format!(
        "{}={}&{}={}&{TO_FIELD}={to}&{TEXT_FIELD}={text}",
        Credentials::KEY_FIELD,
        creds.api_key(),
        Credentials::SECRET_FIELD,
        creds.api_secret(),
    )
}

/// Byte form of [`encode_send_message_body`], ready to use as the POST body.
pub fn encode_send_message_request(request: &SendMessageRequest) -> Vec<u8> {
    encode_send_message_body(request).into_bytes()
}

pub fn decode_send_message_json_response(
    json: &str,
) -> Result<SendMessageResponse, serde_json::Error> {
    let parsed: SendMessageJsonResponse = serde_json::from_str(json)?;

    Ok(SendMessageResponse {
        remaining_balance: parsed.remaining_balance.unwrap_or_default(),
        total_sms: parsed.total_sms.unwrap_or_default(),
        error: parsed.error.map(Into::into),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const CREDS: &str = "api_key=apikey&api_secret=apisecret";

    fn request(to: &[&str], text: &str) -> SendMessageRequest {
        SendMessageRequest::new(
            Credentials::new("apikey", "apisecret"),
            to.iter().map(|it| (*it).to_owned()).collect(),
            text,
        )
    }

    #[test]
    fn encode_keeps_field_order_and_escapes_spaces_as_plus() {
        let cases = [
            (vec!["639123456789"], "test", "&to=639123456789&text=test"),
            (
                vec!["639123456789", "639123456788"],
                "test",
                "&to=639123456789,639123456788&text=test",
            ),
            (vec!["639123456789"], "test only", "&to=639123456789&text=test+only"),
            (
                vec!["639123456789"],
                "test only now",
                "&to=639123456789&text=test+only+now",
            ),
        ];

        for (to, text, tail) in cases {
            let body = encode_send_message_body(&request(&to, text));
            assert_eq!(body, format!("{CREDS}{tail}"));
        }
    }

    #[test]
    fn encode_escapes_reserved_characters_in_text_only() {
        let body = encode_send_message_body(&request(&["639123456789"], "a&b=c?"));
        assert_eq!(body, format!("{CREDS}&to=639123456789&text=a%26b%3Dc%3F"));
    }

    #[test]
    fn encode_request_returns_body_bytes() {
        let bytes = encode_send_message_request(&request(&["639123456789"], "test only"));
        assert_eq!(
            bytes,
            b"api_key=apikey&api_secret=apisecret&to=639123456789&text=test+only"
        );
    }

    #[test]
    fn decode_success_response() {
        let json = r#"{"remaining_balance": 12.5, "total_sms": 2, "error": null}"#;
        let resp = decode_send_message_json_response(json).unwrap();
        assert_eq!(resp.remaining_balance, 12.5);
        assert_eq!(resp.total_sms, 2);
        assert_eq!(resp.error, None);
    }

    #[test]
    fn decode_provider_error() {
        let json = r#"
        {
          "error": {
            "code": 409,
            "name": "InsufficientBalance",
            "description": "Not enough balance"
          }
        }
        "#;
        let resp = decode_send_message_json_response(json).unwrap();
        assert_eq!(
            resp.error,
            Some(ProviderError {
                code: 409,
                name: "InsufficientBalance".to_owned(),
                description: "Not enough balance".to_owned(),
            })
        );
        assert_eq!(resp.total_sms, 0);
    }

    #[test]
    fn decode_treats_null_fields_as_zero_values() {
        let json = r#"
        {
          "remaining_balance": null,
          "total_sms": null,
          "error": {
            "code": 401,
            "name": null,
            "description": "Invalid API key or API secret"
          }
        }
        "#;
        let resp = decode_send_message_json_response(json).unwrap();
        assert_eq!(resp.remaining_balance, 0.0);
        assert_eq!(resp.total_sms, 0);
        assert_eq!(
            resp.error,
            Some(ProviderError {
                code: 401,
                name: String::new(),
                description: "Invalid API key or API secret".to_owned(),
            })
        );

        let resp = decode_send_message_json_response(
            r#"{"error": {"code": null, "name": null, "description": null}}"#,
        )
        .unwrap();
        assert_eq!(
            resp.error,
            Some(ProviderError {
                code: 0,
                name: String::new(),
                description: String::new(),
            })
        );
    }

    #[test]
    fn decode_accepts_negative_sms_count() {
        let resp = decode_send_message_json_response(r#"{"total_sms": -1}"#).unwrap();
        assert_eq!(resp.total_sms, -1);
    }

    #[test]
    fn decode_rejects_malformed_json() {
        assert!(decode_send_message_json_response("{ not json }").is_err());
    }
}
