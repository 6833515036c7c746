//! Error types for integration operations.
//!
//! Every failure an integration can report is a [`ProviderError`]. The code
//! classifies the failure and decides the HTTP status the routing layer
//! answers with; upstream APIs that embed their own status code in a response
//! body keep that status through [`ProviderError::upstream_status`].

use std::fmt;
use thiserror::Error;

/// The category of a provider error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProviderErrorCode {
    /// The caller sent invalid or missing input.
    BadRequest,
    /// The service is missing required configuration (e.g. an API key).
    ConfigurationError,
    /// The upstream rejected our credentials.
    AuthenticationFailed,
    /// The upstream refused access to the resource.
    AuthorizationFailed,
    /// The requested resource does not exist upstream.
    NotFound,
    /// The upstream rate limit was hit.
    RateLimited,
    /// The upstream answered with something we cannot interpret.
    InvalidResponse,
    /// Connection failure, timeout or an HTTP error without a usable body.
    NetworkError,
    /// The upstream reported a server-side failure.
    ServerError,
    /// The upstream reported some other status of its own.
    UpstreamError,
    /// Anything we did not anticipate.
    InternalError,
}

impl ProviderErrorCode {
    /// Returns a machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BadRequest => "bad_request",
            Self::ConfigurationError => "configuration_error",
            Self::AuthenticationFailed => "authentication_failed",
            Self::AuthorizationFailed => "authorization_failed",
            Self::NotFound => "not_found",
            Self::RateLimited => "rate_limited",
            Self::InvalidResponse => "invalid_response",
            Self::NetworkError => "network_error",
            Self::ServerError => "server_error",
            Self::UpstreamError => "upstream_error",
            Self::InternalError => "internal_error",
        }
    }

    /// The HTTP status this category maps to when no explicit status is attached.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::BadRequest => 400,
            Self::AuthenticationFailed => 401,
            Self::AuthorizationFailed => 403,
            Self::NotFound => 404,
            Self::RateLimited => 429,
            Self::ConfigurationError | Self::InvalidResponse | Self::InternalError => 500,
            Self::NetworkError | Self::ServerError | Self::UpstreamError => 502,
        }
    }

    /// Classifies an HTTP status reported by an upstream.
    pub fn from_http_status(status: u16) -> Self {
        match status {
            400 => Self::BadRequest,
            401 => Self::AuthenticationFailed,
            403 => Self::AuthorizationFailed,
            404 => Self::NotFound,
            429 => Self::RateLimited,
            500..=599 => Self::ServerError,
            _ => Self::UpstreamError,
        }
    }
}

impl fmt::Display for ProviderErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error that occurred while fetching events from an integration.
#[derive(Debug, Error)]
pub struct ProviderError {
    code: ProviderErrorCode,
    message: String,
    /// The integration that generated this error.
    provider: Option<String>,
    /// Explicit HTTP status, overriding the one derived from `code`.
    status: Option<u16>,
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl ProviderError {
    /// Creates a new provider error with the given code and message.
    pub fn new(code: ProviderErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            provider: None,
            status: None,
            source: None,
        }
    }

    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::BadRequest, message)
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::ConfigurationError, message)
    }

    /// Creates an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::AuthenticationFailed, message)
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NotFound, message)
    }

    /// Creates a rate limit error.
    pub fn rate_limited(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::RateLimited, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InvalidResponse, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::NetworkError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ProviderErrorCode::InternalError, message)
    }

    /// Creates an error carrying a status code reported by the upstream itself.
    pub fn upstream_status(status: u16, message: impl Into<String>) -> Self {
        let mut err = Self::new(ProviderErrorCode::from_http_status(status), message);
        err.status = Some(status);
        err
    }

    /// Sets the provider name for this error.
    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(provider.into());
        self
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> ProviderErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns the provider name, if set.
    pub fn provider(&self) -> Option<&str> {
        self.provider.as_deref()
    }

    /// Returns the HTTP status to answer with.
    pub fn status(&self) -> u16 {
        self.status.unwrap_or_else(|| self.code.http_status())
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ref provider) = self.provider {
            write!(f, "[{}] ", provider)?;
        }
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for provider operations.
pub type ProviderResult<T> = Result<T, ProviderError>;
