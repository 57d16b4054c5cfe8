// =============================================================================
// Lumen Web - Hosted Service Clients
// =============================================================================
// Table of Contents:
// 1. Submodules
// 2. Error Types
// 3. API Client
// =============================================================================

pub mod documents;
pub mod identity;

pub use documents::HostedDocuments;
pub use identity::HostedIdentity;

use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;

// -----------------------------------------------------------------------------
// 2. Error Types
// -----------------------------------------------------------------------------

/// API error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("{message}")]
    Server { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Not found")]
    NotFound,
}

impl ApiError {
    /// Message to show a user, without the transport prefix for server
    /// errors so provider messages come through verbatim.
    pub fn provider_message(&self) -> String {
        match self {
            ApiError::Server { message, .. } | ApiError::Unauthorized(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Error body shared by the hosted REST services:
/// `{"error": {"code": 400, "message": "EMAIL_EXISTS", ...}}`.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

/// Pull the provider's message out of an error body, falling back to the
/// raw text.
pub(crate) fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_else(|_| body.trim().to_string())
}

pub(crate) fn classify(status: u16, body: &str) -> ApiError {
    let message = error_message(body);
    match status {
        401 | 403 => ApiError::Unauthorized(message),
        404 => ApiError::NotFound,
        _ => ApiError::Server { status, message },
    }
}

// -----------------------------------------------------------------------------
// 3. API Client
// -----------------------------------------------------------------------------

/// Verbs the hosted services are called with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Method {
    Post,
    Patch,
}

impl Method {
    fn as_str(self) -> &'static str {
        match self {
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

/// HTTP client for one hosted REST service.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Build a request with common headers.
    fn build_request(&self, method: Method, endpoint: &str, bearer: Option<&str>) -> RequestBuilder {
        let url = self.url(endpoint);
        let mut req = match method {
            Method::Post => Request::post(&url),
            Method::Patch => Request::patch(&url),
        };

        if let Some(token) = bearer {
            req = req.header("Authorization", &format!("Bearer {}", token));
        }

        req.header("Content-Type", "application/json")
    }

    /// Handle API response.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();

        match status {
            200..=299 => response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Deserialize(e.to_string())),
            _ => {
                let body = response.text().await.unwrap_or_default();
                Err(classify(status, &body))
            }
        }
    }

    async fn send_json<T: DeserializeOwned, B: Serialize>(
        &self,
        method: Method,
        endpoint: &str,
        body: &B,
        bearer: Option<&str>,
    ) -> Result<T, ApiError> {
        log::debug!("{} {}", method.as_str(), endpoint.split('?').next().unwrap_or_default());
        let response = self
            .build_request(method, endpoint, bearer)
            .json(body)
            .map_err(|e| ApiError::Deserialize(e.to_string()))?
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Self::handle_response(response).await
    }

    /// POST request with JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        self.send_json(Method::Post, endpoint, body, None).await
    }

    /// PATCH request with JSON body, authorized by an ID token.
    pub async fn patch_authorized<T: DeserializeOwned, B: Serialize>(
        &self,
        endpoint: &str,
        body: &B,
        token: &str,
    ) -> Result<T, ApiError> {
        self.send_json(Method::Patch, endpoint, body, Some(token)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_from_envelope() {
        let body = r#"{"error":{"code":400,"message":"EMAIL_EXISTS","errors":[]}}"#;
        assert_eq!(error_message(body), "EMAIL_EXISTS");
    }

    #[test]
    fn test_error_message_falls_back_to_text() {
        assert_eq!(error_message("  upstream timeout \n"), "upstream timeout");
    }

    #[test]
    fn test_classify() {
        let weak = r#"{"error":{"code":400,"message":"WEAK_PASSWORD : Password should be at least 6 characters"}}"#;
        assert_eq!(
            classify(400, weak),
            ApiError::Server {
                status: 400,
                message: "WEAK_PASSWORD : Password should be at least 6 characters".to_string()
            }
        );
        assert!(matches!(classify(403, "{}"), ApiError::Unauthorized(_)));
        assert_eq!(classify(404, ""), ApiError::NotFound);
    }

    #[test]
    fn test_provider_message_is_verbatim() {
        let err = ApiError::Server {
            status: 400,
            message: "EMAIL_EXISTS".to_string(),
        };
        assert_eq!(err.provider_message(), "EMAIL_EXISTS");
        assert_eq!(err.to_string(), "EMAIL_EXISTS");
    }

    #[test]
    fn test_request_url_and_verbs() {
        let client = ApiClient::new("https://identitytoolkit.googleapis.com/v1");
        assert_eq!(
            client.url("/accounts:signUp?key=k"),
            "https://identitytoolkit.googleapis.com/v1/accounts:signUp?key=k"
        );
        assert_eq!(Method::Post.as_str(), "POST");
        assert_eq!(Method::Patch.as_str(), "PATCH");
    }
}
