//! HTTP utilities for the edgecli client.
//!
//! This module provides the transport seam used by the API client: plain
//! request/response values, the [`HttpClient`] trait and the production
//! [`ReqwestClient`] implementation. Keeping the trait in between lets tests
//! drive the whole update flow with a recording mock.

use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;
use tracing::trace;

pub const DEFAULT_USER_AGENT: &str = concat!("edgecli/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_ACCEPT: &str = "application/json; version=3";

/// Error type for HTTP transport operations.
///
/// Only failures where no HTTP response was obtained end up here; a response
/// with a failing status is still a successful transport round trip.
#[derive(Debug, Error)]
pub enum HttpError {
    /// Network connection failed (DNS, refused connection, TLS...)
    #[error("Connection error: {0}")]
    Connection(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The server did not respond within the configured timeout period
    #[error("Request timed out")]
    Timeout,

    /// The request could not be built locally; nothing was sent
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Configuration for HTTP requests with common settings
#[derive(Debug, Clone)]
pub struct HttpRequestConfig {
    /// Default headers to include with all requests
    pub default_headers: HashMap<String, String>,
    /// Request timeout in seconds
    pub timeout: u64,
}

impl Default for HttpRequestConfig {
    fn default() -> Self {
        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), DEFAULT_USER_AGENT.to_string());
        default_headers.insert("Accept".to_string(), DEFAULT_ACCEPT.to_string());

        Self {
            default_headers,
            timeout: crate::configuration::DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl HttpRequestConfig {
    pub fn from_configuration(configuration: &crate::configuration::Configuration) -> Self {
        Self {
            timeout: configuration.timeout(),
            ..Self::default()
        }
    }
}

/// An HTTP request to be sent.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: http::Method,
    pub url: url::Url,
    pub headers: http::HeaderMap,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// Creates a new HTTP request with empty headers and no body.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    #[must_use]
    pub fn get(url: url::Url) -> Self {
        Self::new(http::Method::GET, url)
    }

    #[must_use]
    pub fn patch(url: url::Url) -> Self {
        Self::new(http::Method::PATCH, url)
    }

    /// Sets a JSON body and the matching content type.
    #[must_use]
    pub fn with_json_body(mut self, body: Vec<u8>) -> Self {
        self.headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        self.body = Some(body);
        self
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }
}

/// An HTTP response with a fully buffered body.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: http::StatusCode,
    pub headers: http::HeaderMap,
    pub body: Vec<u8>,
}

impl HttpResponse {
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Trait for making HTTP requests.
///
/// The API client only ever talks to this trait, so a test double can record
/// every request and answer with canned responses.
pub trait HttpClient: Send + Sync {
    /// Sends an HTTP request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] when no response could be obtained.
    fn request(
        &self,
        req: HttpRequest,
    ) -> impl std::future::Future<Output = Result<HttpResponse, HttpError>> + Send;
}

/// Production HTTP client using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestClient {
    inner: reqwest::Client,
    config: HttpRequestConfig,
}

impl ReqwestClient {
    /// Create a new HTTP client with the given configuration
    pub fn new(config: HttpRequestConfig) -> Result<Self, HttpError> {
        let inner = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(|e| HttpError::Connection(Box::new(e)))?;

        Ok(Self { inner, config })
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, req: HttpRequest) -> Result<HttpResponse, HttpError> {
        trace!("{} {}", req.method, req.url);

        let mut builder = self.inner.request(req.method, req.url.as_str());

        for (key, value) in &self.config.default_headers {
            builder = builder.header(key, value);
        }

        for (name, value) in &req.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = req.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                HttpError::Timeout
            } else if e.is_builder() {
                HttpError::InvalidRequest(e.to_string())
            } else {
                HttpError::Connection(Box::new(e))
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    HttpError::Timeout
                } else {
                    HttpError::Connection(Box::new(e))
                }
            })?
            .to_vec();

        trace!("Response status: {}", status);
        Ok(HttpResponse::new(status, headers, body))
    }
}
