//! HTTP Transport
//!
//! One JSON round trip per call against a configured base URL. Sets the JSON
//! content type on every request and the bearer credential when an API key is
//! configured. Responses are buffered in full before they are interpreted:
//!
//! - 2xx: body parsed as JSON, an empty body becomes `{}`
//! - other statuses: [`ApiError::Server`] with the status and parsed body
//! - unparseable 2xx body: [`ApiError::Parse`]
//! - connection failures: [`ApiError::Transport`]; expiry: [`ApiError::Timeout`]
//!
//! Nothing is retried.

use crate::config::ClientSettings;
use crate::error::ApiError;
use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Method, Url};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::debug;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// A path under the base URL plus query parameters.
///
/// Segments are percent-encoded individually and appended to the base URL's
/// path, so a base of `http://host/api` keeps its `/api` prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Endpoint {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            segments: segments.into_iter().map(Into::into).collect(),
            query: Vec::new(),
        }
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn query_pairs(&self) -> &[(String, String)] {
        &self.query
    }

    /// Value of the first query parameter named `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Join onto `base`.
    pub fn resolve(&self, base: &Url) -> Result<Url, ApiError> {
        let mut url = base.clone();
        {
            let mut path = url.path_segments_mut().map_err(|_| {
                ApiError::InvalidUrl(format!("{} cannot be used as a base URL", base))
            })?;
            path.pop_if_empty();
            path.extend(self.segments.iter());
        }
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    /// Encoded path and query, e.g. `/invoices?business_id=biz_1&limit=100`.
    pub fn path(&self) -> String {
        let resolved = Url::parse("http://localhost/")
            .ok()
            .and_then(|base| self.resolve(&base).ok());
        match resolved {
            Some(url) => match url.query() {
                Some(query) => format!("{}?{}", url.path(), query),
                None => url.path().to_string(),
            },
            None => format!("/{}", self.segments.join("/")),
        }
    }
}

/// One request: method, endpoint, optional JSON body, and which
/// Authorization header to send.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub endpoint: Endpoint,
    pub body: Option<Value>,
    pub authorization: Authorization,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: Endpoint) -> Self {
        Self {
            method,
            endpoint,
            body: None,
            authorization: Authorization::Configured,
        }
    }

    pub fn get(endpoint: Endpoint) -> Self {
        Self::new(Method::GET, endpoint)
    }

    pub fn post(endpoint: Endpoint) -> Self {
        Self::new(Method::POST, endpoint)
    }

    pub fn patch(endpoint: Endpoint) -> Self {
        Self::new(Method::PATCH, endpoint)
    }

    pub fn delete(endpoint: Endpoint) -> Self {
        Self::new(Method::DELETE, endpoint)
    }

    pub fn with_authorization(mut self, authorization: Authorization) -> Self {
        self.authorization = authorization;
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Serialize `body` as the JSON payload.
    pub fn with_json<T: serde::Serialize>(self, body: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(body)
            .map_err(|e| ApiError::InvalidInput(format!("Request body is not serializable: {}", e)))?;
        Ok(self.with_body(value))
    }
}

/// Which Authorization header a request carries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Authorization {
    /// Bearer from the configured API key, when there is one
    #[default]
    Configured,
    /// No Authorization header
    Omit,
    /// This exact header value
    Raw(String),
}

/// Status and parsed body, with no status interpretation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Value,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The seam between the API client and the network.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one round trip, resolving to the parsed body of a 2xx response.
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError>;
}

/// Parse a buffered body; blank bodies are `{}`.
pub fn decode_body(text: &str) -> Result<Value, ApiError> {
    if text.trim().is_empty() {
        return Ok(Value::Object(serde_json::Map::new()));
    }
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Turn a status and buffered body into the call outcome.
pub fn interpret_response(status: u16, text: &str) -> Result<Value, ApiError> {
    let success = (200..300).contains(&status);
    match decode_body(text) {
        Ok(body) if success => Ok(body),
        Ok(body) => Err(ApiError::from_status(status, body)),
        Err(e) if success => Err(e),
        // Non-JSON error pages (proxies, gateways) still report the status.
        Err(_) => Err(ApiError::from_status(status, Value::String(text.to_string()))),
    }
}

fn map_http_error(error: reqwest::Error, timeout: Duration) -> ApiError {
    if error.is_timeout() {
        ApiError::Timeout(timeout)
    } else if error.is_connect() {
        ApiError::Transport(format!("Connection error: {}", error))
    } else if error.is_builder() {
        ApiError::InvalidUrl(error.to_string())
    } else {
        ApiError::Transport(format!("HTTP error: {}", error))
    }
}

/// reqwest-backed transport over HTTP or HTTPS, chosen by the base URL's scheme.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(base_url: &str, api_key: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(format!(
                "{} cannot be used as a base URL",
                base_url
            )));
        }
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(format!("Failed to create HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url,
            api_key,
            timeout,
        })
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self, ApiError> {
        Self::new(&settings.api_url, settings.api_key.clone(), settings.timeout())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn api_key_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// `Bearer <publicKey>:<secretKey>` when a key is configured.
    pub fn bearer(&self) -> Option<String> {
        self.api_key.as_ref().map(|key| format!("Bearer {}", key))
    }

    /// Build the outgoing request with URL, headers, and body applied.
    pub fn build_request(&self, request: &ApiRequest) -> Result<reqwest::Request, ApiError> {
        let url = request.endpoint.resolve(&self.base_url)?;
        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .header(CONTENT_TYPE, JSON_CONTENT_TYPE);

        let header = match request.authorization {
            Authorization::Configured => self.bearer(),
            Authorization::Omit => None,
            Authorization::Raw(ref value) => Some(value.clone()),
        };
        if let Some(value) = header {
            builder = builder.header(AUTHORIZATION, value);
        }

        if let Some(ref body) = request.body {
            let bytes = serde_json::to_vec(body).map_err(|e| {
                ApiError::InvalidInput(format!("Request body is not serializable: {}", e))
            })?;
            builder = builder.body(bytes);
        }

        builder
            .build()
            .map_err(|e| map_http_error(e, self.timeout))
    }

    async fn round_trip(&self, request: &ApiRequest) -> Result<(u16, String), ApiError> {
        let outgoing = self.build_request(request)?;
        let url = outgoing.url().clone();
        let started = Instant::now();

        let response = self
            .client
            .execute(outgoing)
            .await
            .map_err(|e| map_http_error(e, self.timeout))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| map_http_error(e, self.timeout))?;

        debug!(
            method = %request.method,
            url = %url,
            status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "API round trip"
        );
        Ok((status, text))
    }

    /// One round trip returning the raw status and parsed body.
    pub async fn exchange(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let (status, text) = self.round_trip(&request).await?;
        let body = match decode_body(&text) {
            Ok(body) => body,
            Err(e) if (200..300).contains(&status) => return Err(e),
            Err(_) => Value::String(text),
        };
        Ok(RawResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<Value, ApiError> {
        let (status, text) = self.round_trip(&request).await?;
        interpret_response(status, &text)
    }
}
