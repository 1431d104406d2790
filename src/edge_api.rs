//! Client for the edge platform REST API.
//!
//! Only the endpoints the CLI needs are covered. Every call performs exactly
//! one HTTP request; nothing is retried.

use crate::configuration::{Configuration, ConfigurationError};
use crate::http_utils::{
    HttpClient, HttpError, HttpRequest, HttpRequestConfig, HttpResponse, ReqwestClient,
};
use crate::model::{CacheSetting, EdgeApplication, Envelope};
use crate::patch::{CacheSettingsPatch, UpdateTarget};
use serde::de::DeserializeOwned;
use tracing::{debug, error, trace};
use url::Url;

/// Error emitted by the edge platform API, classified by where it failed.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The API answered with a 5xx status
    #[error("internal server error ({status}) from the edge platform API: {body}")]
    Server { status: http::StatusCode, body: String },

    /// The API rejected the request (4xx, or any other non-success status)
    #[error("request rejected by the edge platform API ({status}): {body}")]
    Client { status: http::StatusCode, body: String },

    /// No response was obtained (connection failure or timeout)
    #[error("edge platform API unavailable: {0}")]
    Unavailable(HttpError),

    /// The request could not be built; nothing was sent
    #[error("failed to build the API request: {0}")]
    InvalidRequest(String),

    #[error("invalid response from the edge platform API: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("failed to encode the update payload: {0}")]
    InvalidPayload(#[source] serde_json::Error),

    #[error("the API token contains characters that are not allowed in a header")]
    InvalidToken,

    #[error("invalid resource URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<HttpError> for ApiError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::InvalidRequest(message) => ApiError::InvalidRequest(message),
            other => ApiError::Unavailable(other),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> Option<http::StatusCode> {
        match self {
            ApiError::Server { status, .. } | ApiError::Client { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(http::StatusCode::NOT_FOUND)
    }
}

pub struct EdgeApiClient<C: HttpClient> {
    http: C,
    base_url: Url,
    token: Option<String>,
}

impl EdgeApiClient<ReqwestClient> {
    /// Builds the production client from the loaded configuration.
    pub fn from_configuration(configuration: &Configuration) -> Result<Self, ConfigurationError> {
        let http = ReqwestClient::new(HttpRequestConfig::from_configuration(configuration))
            .map_err(|e| ConfigurationError::FailedToLoadData { cause: Box::new(e) })?;
        Ok(Self::new(
            http,
            configuration.api_base_url()?,
            configuration.token(),
        ))
    }
}

impl<C: HttpClient> EdgeApiClient<C> {
    pub fn new(http: C, base_url: Url, token: Option<String>) -> Self {
        Self {
            http,
            base_url,
            token,
        }
    }

    pub fn http(&self) -> &C {
        &self.http
    }

    /// `GET edge_applications/{id}`
    pub async fn get_edge_application(&self, application_id: u64) -> Result<EdgeApplication, ApiError> {
        debug!("Fetching edge application {}...", application_id);
        let url = self.url(&format!("edge_applications/{application_id}"))?;
        let response = self.send(HttpRequest::get(url)).await?;
        Self::decode::<EdgeApplication>(&response)
    }

    /// `GET edge_applications/{id}/cache_settings/{id}`
    pub async fn get_cache_setting(&self, target: &UpdateTarget) -> Result<CacheSetting, ApiError> {
        debug!("Fetching cache setting {}...", target.cache_setting_id);
        let url = self.url(&target.path())?;
        let response = self.send(HttpRequest::get(url)).await?;
        Self::decode::<CacheSetting>(&response)
    }

    /// `PATCH edge_applications/{id}/cache_settings/{id}` with the given payload.
    pub async fn update_cache_setting(
        &self,
        target: &UpdateTarget,
        patch: &CacheSettingsPatch,
    ) -> Result<CacheSetting, ApiError> {
        let url = self.url(&target.path())?;
        let body = patch.to_json().map_err(ApiError::InvalidPayload)?;
        trace!("Patch payload: {}", String::from_utf8_lossy(&body));

        let response = self
            .send(HttpRequest::patch(url).with_json_body(body))
            .await?;
        Self::decode::<CacheSetting>(&response)
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base_url.join(path)?)
    }

    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let request = match &self.token {
            Some(token) => match http::HeaderValue::from_str(&format!("Token {token}")) {
                Ok(value) => request.with_header(http::header::AUTHORIZATION, value),
                Err(_) => return Err(ApiError::InvalidToken),
            },
            None => request,
        };

        let method = request.method.clone();
        let url = request.url.clone();
        let response = self.http.request(request).await?;
        debug!("{} {} -> {}", method, url, response.status);

        Self::classify(response)
    }

    fn classify(response: HttpResponse) -> Result<HttpResponse, ApiError> {
        let status = response.status;
        if status.is_success() {
            Ok(response)
        } else if status.is_server_error() {
            Err(ApiError::Server {
                status,
                body: response.body_text(),
            })
        } else {
            Err(ApiError::Client {
                status,
                body: response.body_text(),
            })
        }
    }

    fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
        match serde_json::from_slice::<Envelope<T>>(&response.body) {
            Ok(envelope) => Ok(envelope.results),
            Err(e) => {
                error!(
                    "Failed to deserialize response: {}. Raw response: {}",
                    e,
                    response.body_text()
                );
                Err(ApiError::InvalidResponse(e))
            }
        }
    }
}
