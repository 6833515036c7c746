//! Server error types.

use std::io;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use sync2cal_providers::ProviderError;
use thiserror::Error;
use tracing::{debug, error};

/// Result type for server operations.
pub type ServerResult<T> = Result<T, ServerError>;

/// Errors that can occur while starting or running the server.
#[derive(Debug, Error)]
pub enum ServerError {
    /// IO error (listener, config file, etc.).
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The listen address could not be bound.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// No integration is registered under the given id.
    #[error("Unknown integration: {0}")]
    UnknownIntegration(String),

    /// An integration could not be set up or failed outside a request.
    #[error(transparent)]
    Provider(#[from] ProviderError),

    /// JSON encoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ServerError {
    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Creates a bind error.
    pub fn bind(addr: impl Into<String>, source: io::Error) -> Self {
        Self::Bind {
            addr: addr.into(),
            source,
        }
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// An error returned from a request handler.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    detail: String,
}

impl ApiError {
    pub fn new(status: StatusCode, detail: impl Into<String>) -> Self {
        Self {
            status,
            detail: detail.into(),
        }
    }

    pub fn bad_request(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, detail)
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn detail(&self) -> &str {
        &self.detail
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        let status =
            StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        if status.is_server_error() {
            error!(error = %err, "Integration request failed");
        } else {
            debug!(error = %err, "Integration request rejected");
        }
        Self::new(status, err.message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            detail: self.detail,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn provider_status_is_kept() {
        let err: ApiError = ProviderError::upstream_status(404, "Weather API error: city not found")
            .with_provider("daily-weather-forecast")
            .into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.detail(), "Weather API error: city not found");

        let err: ApiError = ProviderError::network("Weather API request failed: timeout").into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn server_error_display() {
        let err = ServerError::config("invalid CORS origin");
        assert_eq!(err.to_string(), "Configuration error: invalid CORS origin");

        let err = ServerError::bind(
            "127.0.0.1:80",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().starts_with("Failed to bind 127.0.0.1:80"));
    }
}
