//! # Client Error Types
//!
//! Errors raised while configuring the console or talking to the REST API.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Client Error Categories                           │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │     Fetch       │  │     Validation          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  FetchFailed    │  │  Validation             │ │
//! │  │  InvalidUrl     │  │  (transport,    │  │  (bad query parameter,  │ │
//! │  │  ConfigLoad/Save│  │  status, decode,│  │  nothing was sent)      │ │
//! │  │                 │  │  success:false) │  │                         │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no retry: a failed fetch is reported once and the next user
//! action fetches again.

use megapc_core::ValidationError;
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Invalid console configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),

    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Fetch Errors
    // =========================================================================
    /// Any failure between sending a request and decoding its `data`.
    #[error("Request to {endpoint} failed: {reason}")]
    FetchFailed { endpoint: String, reason: String },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ClientError {
    pub fn fetch(endpoint: impl Into<String>, reason: impl ToString) -> Self {
        ClientError::FetchFailed {
            endpoint: endpoint.into(),
            reason: reason.to_string(),
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ClientError::InvalidConfig(_)
                | ClientError::InvalidUrl(_)
                | ClientError::ConfigLoadFailed(_)
                | ClientError::ConfigSaveFailed(_)
        )
    }

    pub fn is_fetch_error(&self) -> bool {
        matches!(self, ClientError::FetchFailed { .. })
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::de::Error> for ClientError {
    fn from(err: toml::de::Error) -> Self {
        ClientError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ClientError {
    fn from(err: toml::ser::Error) -> Self {
        ClientError::ConfigSaveFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_failed_display() {
        let err = ClientError::fetch("/analytics/weekly", "HTTP 503 Service Unavailable");
        assert_eq!(
            err.to_string(),
            "Request to /analytics/weekly failed: HTTP 503 Service Unavailable"
        );
        assert!(err.is_fetch_error());
        assert!(!err.is_config_error());
    }

    #[test]
    fn test_validation_is_transparent() {
        let err: ClientError = ValidationError::MustBePositive {
            field: "days".into(),
        }
        .into();
        assert_eq!(err.to_string(), "days must be positive");
    }

    #[test]
    fn test_config_categories() {
        assert!(ClientError::InvalidUrl("nope".into()).is_config_error());
        let parse_err = url::Url::parse("::not a url").unwrap_err();
        assert!(ClientError::from(parse_err).is_config_error());
    }
}
