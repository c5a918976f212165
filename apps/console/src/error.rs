//! # Console Error Type
//!
//! What the operator sees when a command fails.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ValidationError ──► ClientError::Validation ──┐                        │
//! │  reqwest / status ─► ClientError::FetchFailed ─┼──► ConsoleError ──►    │
//! │  TOML / url ───────► ClientError::Invalid* ────┘    { code, message }   │
//! │                                                          │              │
//! │  LoadState::Failed("Failed to load ...") ────────────────┘              │
//! │                                                          ▼              │
//! │                                      stderr (text) or stdout (--json)   │
//! │                                      exit status from code              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## JSON Form
//! ```json
//! { "code": "LOAD_FAILED", "message": "Failed to load dashboard data" }
//! ```

use megapc_client::ClientError;
use megapc_core::ValidationError;
use serde::Serialize;

pub type ConsoleResult<T> = Result<T, ConsoleError>;

#[derive(Debug, Clone, Serialize)]
pub struct ConsoleError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// A request parameter was rejected before sending
    ValidationError,

    /// A page could not load its data
    LoadFailed,

    /// Config file or environment is unusable
    ConfigError,

    Internal,
}

impl ErrorCode {
    /// Process exit status for this code.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCode::ValidationError => 2,
            ErrorCode::LoadFailed => 3,
            ErrorCode::ConfigError => 4,
            ErrorCode::Internal => 1,
        }
    }
}

impl ConsoleError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ConsoleError {
            code,
            message: message.into(),
        }
    }

    pub fn load_failed(message: impl Into<String>) -> Self {
        ConsoleError::new(ErrorCode::LoadFailed, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ConsoleError::new(ErrorCode::ValidationError, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ConsoleError::new(ErrorCode::Internal, message)
    }
}

impl From<ClientError> for ConsoleError {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Validation(e) => ConsoleError::validation(e.to_string()),
            ClientError::FetchFailed { endpoint, reason } => {
                tracing::error!(%endpoint, %reason, "Request failed");
                ConsoleError::load_failed(format!("Could not reach {}", endpoint))
            }
            other if other.is_config_error() => {
                ConsoleError::new(ErrorCode::ConfigError, other.to_string())
            }
            other => ConsoleError::internal(other.to_string()),
        }
    }
}

impl From<ValidationError> for ConsoleError {
    fn from(err: ValidationError) -> Self {
        ConsoleError::validation(err.to_string())
    }
}

impl std::fmt::Display for ConsoleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ConsoleError {}
