//! # Error Types
//!
//! Domain-specific error types for megapc-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  megapc-core errors (this file)                                        │
//! │  └── ValidationError  - Query parameter failures                       │
//! │                                                                         │
//! │  megapc-client errors (separate crate)                                 │
//! │  └── ClientError      - Config and fetch failures                      │
//! │                                                                         │
//! │  console errors (in app)                                               │
//! │  └── ConsoleError     - What the operator sees                         │
//! │                                                                         │
//! │  Flow: ValidationError → ClientError → ConsoleError → Terminal         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The filter engine and the shaping layer never fail: empty or partial
//! input yields empty or zero output. Only request parameters are checked.

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when a request parameter doesn't meet the
/// constraints the REST API enforces. They are raised before any I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed URL).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "query".to_string(),
        };
        assert_eq!(err.to_string(), "query is required");

        let err = ValidationError::OutOfRange {
            field: "days".to_string(),
            min: 1,
            max: 365,
        };
        assert_eq!(err.to_string(), "days must be between 1 and 365");
    }

    #[test]
    fn test_too_long_message() {
        let err = ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        };
        assert_eq!(err.to_string(), "query must be at most 100 characters");
    }
}
