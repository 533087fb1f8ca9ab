//! Thin client for the marketplace REST backend.
//!
//! Every call returns raw JSON; entity modules under `models` turn it into
//! typed records through the mapping helpers in [`wire`]. The backend is the
//! system of record, so nothing here caches or retries.

pub mod wire;

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use thiserror::Error;

pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";
const NETWORK_ERROR: &str = "Unable to reach the server. Please check your connection and try again.";
const SESSION_EXPIRED: &str = "Your session has expired. Please log in again.";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Backend rejected credentials (401)")]
    Unauthorized,

    #[error("Backend returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ApiError {
    /// Text shown to the user in a banner or flash message.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Unauthorized => SESSION_EXPIRED.to_string(),
            ApiError::Status { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::Status { status: 404, .. } => "The requested item was not found.".to_string(),
            ApiError::Status { status: 403, .. } => "You are not allowed to do that.".to_string(),
            ApiError::Network(_) => NETWORK_ERROR.to_string(),
            _ => GENERIC_ERROR.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Shared HTTP client bound to one backend base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(5))
            .build()?;

        log::info!("API client initialized for {base_url}");

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET with bearer token.
    pub async fn get(&self, token: &str, path: &str) -> Result<Value, ApiError> {
        self.request(Method::GET, Some(token), path, None).await
    }

    pub async fn post(&self, token: &str, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(Method::POST, Some(token), path, Some(body)).await
    }

    pub async fn put(&self, token: &str, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(Method::PUT, Some(token), path, Some(body)).await
    }

    pub async fn patch(&self, token: &str, path: &str, body: Option<&Value>) -> Result<Value, ApiError> {
        self.request(Method::PATCH, Some(token), path, body).await
    }

    pub async fn delete(&self, token: &str, path: &str) -> Result<Value, ApiError> {
        self.request(Method::DELETE, Some(token), path, None).await
    }

    /// POST without credentials (login).
    pub async fn post_public(&self, path: &str, body: &Value) -> Result<Value, ApiError> {
        self.request(Method::POST, None, path, Some(body)).await
    }

    async fn request(
        &self,
        method: Method,
        token: Option<&str>,
        path: &str,
        body: Option<&Value>,
    ) -> Result<Value, ApiError> {
        log::debug!("→ {method} {path}");

        let mut req = self.http.request(method.clone(), self.url(path));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req.send().await.map_err(|e| {
            log::warn!("{method} {path} failed: {e}");
            ApiError::Network(e)
        })?;

        let status = response.status();
        let text = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            log::info!("{method} {path} → 401");
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = extract_message(&text).unwrap_or_default();
            log::warn!("{method} {path} → {}: {message}", status.as_u16());
            return Err(ApiError::Status { status: status.as_u16(), message });
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&text).map_err(|e| ApiError::Decode(format!("{method} {path}: {e}")))
    }
}

/// Pull a human-readable message out of an error body.
/// Accepts `{"message": ..}`, `{"error": ..}`, `{"msg": ..}` and `{"error": {"message": ..}}`.
pub fn extract_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let obj = value.as_object()?;
    for key in ["message", "error", "msg"] {
        match obj.get(key) {
            Some(Value::String(s)) if !s.trim().is_empty() => return Some(s.clone()),
            Some(Value::Object(inner)) => {
                if let Some(Value::String(s)) = inner.get("message") {
                    return Some(s.clone());
                }
            }
            _ => {}
        }
    }
    None
}
