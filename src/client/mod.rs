//! Client layer: orchestrates validation, the allow-list gate, and the HTTP call.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::domain::{
    AllowList, Credentials, PhoneParseError, ProviderError, SendMessageRequest, SendOutcome,
    ValidationError,
};

/// Movider API base URL.
pub const MOVIDER_API_URL: &str = "https://api.movider.co/v1";

/// Path of the send endpoint relative to the base URL.
pub const SEND_MESSAGE_PATH: &str = "/sms";

const REQUEST_HEADERS: &[(&str, &str)] = &[
    ("accept", "application/json"),
    ("content-type", "application/x-www-form-urlencoded"),
];

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
type BoxError = Box<dyn StdError + Send + Sync>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

#[derive(Debug)]
enum HttpError {
    Send(BoxError),
    Timeout,
    Body(BoxError),
}

trait HttpTransport: Send + Sync {
    fn post<'a>(
        &'a self,
        url: &'a str,
        headers: &'static [(&'static str, &'static str)],
        body: Vec<u8>,
        timeout: Option<Duration>,
    ) -> BoxFuture<'a, Result<HttpResponse, HttpError>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post<'a>(
        &'a self,
        url: &'a str,
        headers: &'static [(&'static str, &'static str)],
        body: Vec<u8>,
        timeout: Option<Duration>,
    ) -> BoxFuture<'a, Result<HttpResponse, HttpError>> {
        Box::pin(async move {
            let mut request = self.client.post(url).body(body);
            for (name, value) in headers {
                request = request.header(*name, *value);
            }
            if let Some(timeout) = timeout {
                request = request.timeout(timeout);
            }

            let response = request.send().await.map_err(|err| {
                if err.is_timeout() {
                    HttpError::Timeout
                } else {
                    HttpError::Send(Box::new(err))
                }
            })?;
            let status = response.status().as_u16();
            let body = response.text().await.map_err(|err| {
                if err.is_timeout() {
                    HttpError::Timeout
                } else {
                    HttpError::Body(Box::new(err))
                }
            })?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`Sender`].
///
/// Validation and phone-number errors are raised before any network activity.
/// An allow-list rejection is not an error; see [`SendOutcome::Skipped`].
pub enum MoviderError {
    /// Recipients or text failed the local checks.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A recipient could not be normalized into an international number.
    #[error("phone number error: {0}")]
    PhoneParse(#[from] PhoneParseError),

    /// HTTP client / connection failure (DNS, TLS, refused, etc).
    #[error("transport error: {0}")]
    Transport(#[source] BoxError),

    /// The request did not complete before its deadline.
    #[error("request timed out")]
    Timeout,

    /// The response body stream failed mid-read.
    #[error("failed to read response body: {0}")]
    BodyRead(#[source] BoxError),

    /// The response body was not the expected JSON.
    #[error("invalid JSON response (HTTP {status}): {source}")]
    Decode {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// Movider reported a business-level failure.
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// The configured API URL is not a valid absolute URL.
    #[error("invalid API URL {url:?}: {source}")]
    InvalidEndpoint {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

fn map_http_error(err: HttpError) -> MoviderError {
    match err {
        HttpError::Send(err) => MoviderError::Transport(err),
        HttpError::Timeout => MoviderError::Timeout,
        HttpError::Body(err) => MoviderError::BodyRead(err),
    }
}

#[derive(Debug, Clone)]
/// Builder for [`Sender`].
///
/// Use this when you need a custom endpoint, an allow-list, a timeout, or a user-agent.
pub struct SenderBuilder {
    credentials: Credentials,
    api_url: String,
    allow_list: AllowList,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl SenderBuilder {
    /// Create a builder with the default endpoint and no allow-list.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_url: format!("{MOVIDER_API_URL}{SEND_MESSAGE_PATH}"),
            allow_list: AllowList::default(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the API base URL; [`SEND_MESSAGE_PATH`] is appended.
    pub fn base_url(mut self, base_url: impl AsRef<str>) -> Self {
        let base = base_url.as_ref().trim_end_matches('/');
        self.api_url = format!("{base}{SEND_MESSAGE_PATH}");
        self
    }

    /// Override the full send endpoint URL.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_url = endpoint.into();
        self
    }

    /// Restrict delivery to these recipients. An empty list means no restriction.
    pub fn allowed_recipients<I, S>(mut self, recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_list = AllowList::new(recipients);
        self
    }

    /// Set an HTTP client timeout applied to every request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`Sender`].
    pub fn build(self) -> Result<Sender, MoviderError> {
        url::Url::parse(&self.api_url).map_err(|source| MoviderError::InvalidEndpoint {
            url: self.api_url.clone(),
            source,
        })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| MoviderError::Transport(Box::new(err)))?;

        Ok(Sender {
            credentials: self.credentials,
            api_url: self.api_url,
            allow_list: self.allow_list,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// Movider SMS sender.
///
/// Configuration is fixed at construction, so one `Sender` can be shared and
/// used from many tasks at once. Each call builds its own request.
pub struct Sender {
    credentials: Credentials,
    api_url: String,
    allow_list: AllowList,
    http: Arc<dyn HttpTransport>,
}

impl Sender {
    /// Create a sender for the default endpoint.
    ///
    /// For more customization, use [`Sender::builder`].
    pub fn new<I, S>(credentials: Credentials, allowed_recipients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            credentials,
            api_url: format!("{MOVIDER_API_URL}{SEND_MESSAGE_PATH}"),
            allow_list: AllowList::new(allowed_recipients),
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a sender with custom settings.
    pub fn builder(credentials: Credentials) -> SenderBuilder {
        SenderBuilder::new(credentials)
    }

    /// Full URL requests are posted to.
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    pub fn allow_list(&self) -> &AllowList {
        &self.allow_list
    }

    /// Send one SMS to `recipients`.
    ///
    /// Recipients are validated, then normalized to country-code-prefixed
    /// digits. Only the first normalized recipient is checked against the
    /// allow-list; if it is not allowed nothing is sent and
    /// [`SendOutcome::Skipped`] is returned.
    ///
    /// Dropping the returned future aborts the request.
    ///
    /// Errors:
    /// - [`MoviderError::Validation`] / [`MoviderError::PhoneParse`] before any I/O,
    /// - [`MoviderError::Transport`], [`MoviderError::Timeout`], [`MoviderError::BodyRead`]
    ///   for HTTP failures,
    /// - [`MoviderError::Decode`] when the body is not the expected JSON,
    /// - [`MoviderError::Provider`] when Movider reports an error in the body.
    pub async fn send_message<I, S>(
        &self,
        recipients: I,
        text: impl Into<String>,
    ) -> Result<SendOutcome, MoviderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send(collect_recipients(recipients), text.into(), None)
            .await
    }

    /// Like [`Sender::send_message`], failing with [`MoviderError::Timeout`]
    /// if the exchange takes longer than `timeout`.
    pub async fn send_message_with_timeout<I, S>(
        &self,
        recipients: I,
        text: impl Into<String>,
        timeout: Duration,
    ) -> Result<SendOutcome, MoviderError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.send(collect_recipients(recipients), text.into(), Some(timeout))
            .await
    }

    async fn send(
        &self,
        recipients: Vec<String>,
        text: String,
        timeout: Option<Duration>,
    ) -> Result<SendOutcome, MoviderError> {
        let mut request = SendMessageRequest::new(self.credentials.clone(), recipients, text);
        request.validate()?;
        request.normalize()?;

        let first = request
            .to()
            .first()
            .ok_or(ValidationError::NoDestination)?;
        if !self.allow_list.is_allowed(first) {
            info!(recipient = %first, "SMS not sent to recipient");
            return Ok(SendOutcome::Skipped {
                recipient: first.clone(),
            });
        }

        let body = crate::transport::encode_send_message_request(&request);
        debug!(
            url = %self.api_url,
            recipients = request.to().len(),
            "sending SMS"
        );
        let response = self
            .http
            .post(&self.api_url, REQUEST_HEADERS, body, timeout)
            .await
            .map_err(map_http_error)?;

        let mut parsed = crate::transport::decode_send_message_json_response(&response.body)
            .map_err(|source| MoviderError::Decode {
                status: response.status,
                source,
            })?;

        if let Some(err) = parsed.error.take() {
            return Err(MoviderError::Provider(err));
        }

        Ok(SendOutcome::Sent(parsed))
    }
}

fn collect_recipients<I, S>(recipients: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    recipients.into_iter().map(Into::into).collect()
}
