//! # Validation Module
//!
//! Query parameter checks for the REST API.
//!
//! ## Where Checks Happen
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI (clap)                                                   │
//! │  └── Type checks: numbers parse, flags exist                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Range checks the API would reject with 422                        │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: REST API                                                     │
//! │  └── Authoritative validation                                          │
//! │                                                                         │
//! │  A request that fails here is never sent.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use megapc_core::validation::{validate_search_query, validate_daily_days};
//!
//! assert!(validate_search_query("rtx 4060").is_ok());
//! assert!(validate_daily_days(400).is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};

/// Longest search term the console will send.
pub const MAX_QUERY_LEN: usize = 100;

/// Widest window of `/analytics/daily`.
pub const MAX_DAILY_DAYS: u32 = 365;

/// Largest page of `/sales/top-products`.
pub const MAX_TOP_PRODUCTS: u32 = 50;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a server-side product search term.
///
/// ## Rules
/// - Must not be blank
/// - At most 100 characters (counted as chars, not bytes)
///
/// ## Example
/// ```rust
/// use megapc_core::validation::validate_search_query;
///
/// assert!(validate_search_query("ASUS").is_ok());
/// assert!(validate_search_query("   ").is_err());
/// ```
pub fn validate_search_query(query: &str) -> ValidationResult<()> {
    if query.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "query".to_string(),
        });
    }

    if query.chars().count() > MAX_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_QUERY_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

fn in_range(field: &str, value: u32, min: u32, max: u32) -> ValidationResult<()> {
    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: i64::from(min),
            max: i64::from(max),
        });
    }
    Ok(())
}

fn positive(field: &str, value: u32) -> ValidationResult<()> {
    if value == 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Window of the daily analytics series: 1..=365.
pub fn validate_daily_days(days: u32) -> ValidationResult<()> {
    in_range("days", days, 1, MAX_DAILY_DAYS)
}

/// Window of the recent sales list: at least one day.
pub fn validate_recent_days(days: u32) -> ValidationResult<()> {
    positive("days", days)
}

/// Size of the top products table: 1..=50.
pub fn validate_top_limit(limit: u32) -> ValidationResult<()> {
    in_range("limit", limit, 1, MAX_TOP_PRODUCTS)
}

/// Optional cap on `/sales`; `None` means all sales.
pub fn validate_sales_limit(limit: Option<u32>) -> ValidationResult<()> {
    match limit {
        Some(limit) => positive("limit", limit),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_search_query() {
        assert!(validate_search_query("Legion").is_ok());
        assert!(validate_search_query(" rtx ").is_ok());
        assert!(validate_search_query(&"é".repeat(100)).is_ok());

        assert_eq!(
            validate_search_query(""),
            Err(ValidationError::Required {
                field: "query".to_string()
            })
        );
        assert!(validate_search_query("\t \n").is_err());
        assert_eq!(
            validate_search_query(&"a".repeat(101)),
            Err(ValidationError::TooLong {
                field: "query".to_string(),
                max: 100
            })
        );
    }

    #[test]
    fn test_validate_daily_days() {
        assert!(validate_daily_days(1).is_ok());
        assert!(validate_daily_days(30).is_ok());
        assert!(validate_daily_days(365).is_ok());
        assert!(validate_daily_days(0).is_err());
        assert!(validate_daily_days(366).is_err());
    }

    #[test]
    fn test_validate_recent_days() {
        assert!(validate_recent_days(7).is_ok());
        assert_eq!(
            validate_recent_days(0),
            Err(ValidationError::MustBePositive {
                field: "days".to_string()
            })
        );
    }

    #[test]
    fn test_validate_limits() {
        assert!(validate_top_limit(10).is_ok());
        assert!(validate_top_limit(50).is_ok());
        assert!(validate_top_limit(51).is_err());
        assert!(validate_top_limit(0).is_err());

        assert!(validate_sales_limit(None).is_ok());
        assert!(validate_sales_limit(Some(1)).is_ok());
        assert!(validate_sales_limit(Some(0)).is_err());
    }
}
