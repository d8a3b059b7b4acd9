// Error hierarchy: one error type shared by the service, the demos and the runner.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Discriminator for every failure the showcase can surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    // Completion service errors (from HTTP responses)
    Authentication,
    AccessDenied,
    NotFound,
    InvalidRequest,
    RateLimit,
    Server,
    Overloaded,

    // Client-side errors
    RequestTimeout,
    Network,
    InvalidResponse,
    Configuration,
    Interrupted,
}

impl ErrorKind {
    /// Returns `true` if the error was reported by the remote service itself.
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            Self::Authentication
                | Self::AccessDenied
                | Self::NotFound
                | Self::InvalidRequest
                | Self::RateLimit
                | Self::Server
                | Self::Overloaded
        )
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Authentication => "AuthenticationError",
            Self::AccessDenied => "PermissionDeniedError",
            Self::NotFound => "NotFoundError",
            Self::InvalidRequest => "BadRequestError",
            Self::RateLimit => "RateLimitError",
            Self::Server => "InternalServerError",
            Self::Overloaded => "OverloadedError",
            Self::RequestTimeout => "APITimeoutError",
            Self::Network => "APIConnectionError",
            Self::InvalidResponse => "InvalidResponseError",
            Self::Configuration => "ConfigurationError",
            Self::Interrupted => "Interrupted",
        };
        f.write_str(name)
    }
}

/// The single error type for the workspace.
#[derive(Debug)]
pub struct Error {
    pub kind: ErrorKind,
    pub message: String,
    pub retryable: bool,
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    // Service error fields
    pub status_code: Option<u16>,
    pub error_code: Option<String>,
    pub retry_after: Option<Duration>,
    pub raw: Option<serde_json::Value>,
}

impl Error {
    fn bare(kind: ErrorKind, message: String, retryable: bool) -> Self {
        Self {
            kind,
            message,
            retryable,
            source: None,
            status_code: None,
            error_code: None,
            retry_after: None,
            raw: None,
        }
    }

    /// Construct from an HTTP status code returned by the completion service.
    pub fn from_http_status(
        status: u16,
        message: String,
        raw: Option<serde_json::Value>,
        retry_after: Option<Duration>,
    ) -> Self {
        let (kind, retryable) = match status {
            400 | 422 => (ErrorKind::InvalidRequest, false),
            401 => (ErrorKind::Authentication, false),
            403 => (ErrorKind::AccessDenied, false),
            404 => (ErrorKind::NotFound, false),
            408 => (ErrorKind::RequestTimeout, true),
            429 => (ErrorKind::RateLimit, true),
            529 => (ErrorKind::Overloaded, true),
            500..=599 => (ErrorKind::Server, true),
            _ => (ErrorKind::Server, true), // Unknown defaults to retryable
        };

        Self {
            status_code: Some(status),
            retry_after,
            raw,
            ..Self::bare(kind, message, retryable)
        }
    }

    /// Convenience: configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::bare(ErrorKind::Configuration, message.into(), false)
    }

    /// Convenience: network error with source.
    pub fn network(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::bare(ErrorKind::Network, message.into(), true)
        }
    }

    /// Convenience: request timed out on the client side.
    pub fn timeout(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            source: Some(Box::new(source)),
            ..Self::bare(ErrorKind::RequestTimeout, message.into(), true)
        }
    }

    /// Convenience: the service answered, but not with anything usable.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::bare(ErrorKind::InvalidResponse, message.into(), false)
    }

    /// Convenience: the run was stopped by an external interrupt.
    pub fn interrupted() -> Self {
        Self::bare(ErrorKind::Interrupted, "run interrupted".into(), false)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(status) => write!(f, "{}: {} (HTTP {status})", self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}
