//! Authenticated request executor for the Capacities API
//!
//! [`ApiClient::execute`] is the single place that talks to the network. It
//! resolves the credential, layers the default headers underneath any caller
//! headers, sends exactly one request, and turns non-success statuses into
//! [`CapacitiesError::Api`]. Successful responses are handed back unread so the
//! caller can decide between [`ApiResponse::json`] and [`ApiResponse::text`].

use crate::config::{ApiConfig, CredentialSource, EnvCredentials};
use crate::error::{CapacitiesError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;

/// Method, body and extra headers for a single API request
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOptions {
    method: Method,
    body: Option<String>,
    headers: Vec<(String, String)>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self::get()
    }
}

impl RequestOptions {
    /// A `GET` request without body
    pub fn get() -> Self {
        Self::with_method(Method::GET)
    }

    /// A `POST` request; add a body with [`RequestOptions::json_body`]
    pub fn post() -> Self {
        Self::with_method(Method::POST)
    }

    /// A request with an arbitrary method
    pub fn with_method(method: Method) -> Self {
        Self {
            method,
            body: None,
            headers: Vec::new(),
        }
    }

    /// Set a raw body
    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serialize `value` as the request body
    pub fn json_body(self, value: &Value) -> Result<Self> {
        let body = serde_json::to_string(value)?;
        Ok(self.body(body))
    }

    /// Add a header; it replaces any default header with the same name
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// HTTP method
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Serialized body, if any
    pub fn body_text(&self) -> Option<&str> {
        self.body.as_deref()
    }

    /// Caller supplied headers in insertion order
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }
}

/// A successful (2xx) response whose body has not been read yet
#[derive(Debug)]
pub struct ApiResponse {
    response: reqwest::Response,
}

impl ApiResponse {
    /// HTTP status of the response
    pub fn status(&self) -> StatusCode {
        self.response.status()
    }

    /// Read the body as text; an empty body yields an empty string
    pub async fn text(self) -> Result<String> {
        Ok(self.response.text().await?)
    }

    /// Read the body and parse it as JSON
    pub async fn json(self) -> Result<Value> {
        let text = self.text().await?;
        Ok(serde_json::from_str(&text)?)
    }
}

/// Client for the Capacities REST API
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: ApiConfig,
    credentials: Arc<dyn CredentialSource>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Create a client from explicit configuration and a credential source
    pub fn new(config: ApiConfig, credentials: Arc<dyn CredentialSource>) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            credentials,
        }
    }

    /// Create a client configured from the environment.
    ///
    /// The API key is read from `CAPACITIES_API_KEY` on every request, not here.
    pub fn from_env() -> Self {
        Self::new(ApiConfig::from_env(), Arc::new(EnvCredentials::new()))
    }

    /// The configuration this client was built with
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Full URL for an endpoint path; the path is appended verbatim
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}{}", self.config.base_url, endpoint)
    }

    /// Send one request to `endpoint` and classify the response.
    ///
    /// # Errors
    ///
    /// - [`CapacitiesError::Configuration`] when no API key is available; nothing is sent
    /// - [`CapacitiesError::InvalidHeader`] when a caller header cannot be encoded
    /// - [`CapacitiesError::Transport`] when the request fails before a response arrives
    /// - [`CapacitiesError::Api`] when the response status is not 2xx; the reason
    ///   text is the canonical phrase for the code, empty when the code has none
    pub async fn execute(&self, endpoint: &str, options: RequestOptions) -> Result<ApiResponse> {
        let api_key = self.credentials.api_key()?;
        let headers = build_headers(&api_key, options.headers())?;
        let url = self.url_for(endpoint);

        tracing::debug!(method = %options.method, %url, "Sending Capacities API request");

        let mut request = self
            .http
            .request(options.method.clone(), &url)
            .headers(headers);
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await?;
            tracing::warn!(status = status.as_u16(), %url, "Capacities API returned an error");
            return Err(CapacitiesError::Api {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or_default().to_string(),
                body,
            });
        }

        tracing::debug!(status = status.as_u16(), %url, "Capacities API request succeeded");
        Ok(ApiResponse { response })
    }
}

/// Default headers first, caller headers on top
fn build_headers(api_key: &str, extra: &[(String, String)]) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    let bearer = HeaderValue::from_str(&format!("Bearer {api_key}"))
        .map_err(|_| CapacitiesError::InvalidHeader("Authorization".to_string()))?;
    headers.insert(AUTHORIZATION, bearer);
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

    for (name, value) in extra {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| CapacitiesError::InvalidHeader(name.clone()))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| CapacitiesError::InvalidHeader(name.to_string()))?;
        headers.insert(name, value);
    }

    Ok(headers)
}
