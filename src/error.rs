//! Client error types

use serde::Deserialize;
use thiserror::Error;

/// Error payload carried in the response envelope's `error` field.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    pub code: String,
    pub message: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    /// HTTP status of the response that carried this error.
    /// Not part of the wire payload; filled in by the HTTP client.
    #[serde(skip)]
    pub status: Option<u16>,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// Client-wide error type
#[derive(Error, Debug)]
pub enum ClientError {
    /// Backend-declared error, code propagated verbatim from the envelope.
    #[error("{0}")]
    Api(ApiError),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Token refresh failed; the session has been cleared and the caller
    /// should route to the login entry point.
    #[error("session expired: {0}")]
    SessionExpired(#[source] Box<ClientError>),

    /// A polling task was stopped before reaching a terminal status.
    #[error("operation cancelled")]
    Cancelled,

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ClientError {
    /// Stable error code for each failure class. Backend codes pass
    /// through untouched; local conditions get synthesized codes.
    pub fn error_code(&self) -> &str {
        match self {
            ClientError::Api(e) => &e.code,
            ClientError::Network(_) => "NETWORK_ERROR",
            ClientError::SessionExpired(_) => "SESSION_EXPIRED",
            ClientError::Cancelled => "CANCELLED",
            ClientError::Serialization(_) => "SERIALIZATION_ERROR",
            ClientError::Storage(_) => "STORAGE_ERROR",
            ClientError::Config(_) => "CONFIG_ERROR",
            ClientError::Io(_) => "IO_ERROR",
        }
    }

    /// HTTP status attached to the failure, when one exists.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api(e) => e.status,
            ClientError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_code_passes_through() {
        let err = ClientError::Api(ApiError {
            code: "PORTFOLIO_NOT_FOUND".to_string(),
            message: "no such portfolio".to_string(),
            details: None,
            status: Some(404),
        });
        assert_eq!(err.error_code(), "PORTFOLIO_NOT_FOUND");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn cancelled_has_local_code() {
        assert_eq!(ClientError::Cancelled.error_code(), "CANCELLED");
        assert_eq!(ClientError::Cancelled.status(), None);
    }
}
