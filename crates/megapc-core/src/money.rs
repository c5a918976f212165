//! # Money Module
//!
//! Rounding and display helpers for Tunisian Dinar (DT) amounts.
//!
//! ## Where Amounts Come From
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  The REST API already computes every aggregate (sums, means, margins). │
//! │  Amounts arrive as JSON numbers and are only ever DISPLAYED here:      │
//! │                                                                         │
//! │    total_amount: 12345.678  ──► chart value   12345.68  (2 decimals)   │
//! │                             ──► table label   "12,346 DT" (whole)      │
//! │                             ──► stat card     "12,345.678 DT"          │
//! │                                                                         │
//! │  No arithmetic that feeds back into stored values happens on floats.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use megapc_core::money::{round_to, Dinars};
//!
//! assert_eq!(round_to(20.004, 2), 20.0);
//! assert_eq!(Dinars::new(12345.6).whole_label(), "12,346 DT");
//! assert_eq!(Dinars::new(1500.25).to_string(), "1,500.25 DT");
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency suffix shown after every amount.
pub const CURRENCY_SUFFIX: &str = "DT";

/// Maximum fraction digits kept by the stat-card format.
const DISPLAY_FRACTION_DIGITS: u32 = 3;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds `value` to `places` decimal places, half away from zero.
///
/// Non-finite input is returned as 0 so a bad aggregate never reaches a
/// chart as NaN.
///
/// ## Example
/// ```rust
/// use megapc_core::money::round_to;
///
/// assert_eq!(round_to(1.235, 0), 1.0);
/// assert_eq!(round_to(2.5, 0), 3.0);
/// assert_eq!(round_to(-2.5, 0), -3.0);
/// ```
pub fn round_to(value: f64, places: u32) -> f64 {
    if !value.is_finite() {
        return 0.0;
    }
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Inserts `,` between every group of three integer digits.
///
/// ## Example
/// ```rust
/// use megapc_core::money::group_thousands;
///
/// assert_eq!(group_thousands(1234567), "1,234,567");
/// assert_eq!(group_thousands(-1000), "-1,000");
/// assert_eq!(group_thousands(999), "999");
/// ```
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats a percentage with two decimals, e.g. `"12.35%"`.
pub fn format_percent(value: f64) -> String {
    format!("{:.2}%", round_to(value, 2))
}

// =============================================================================
// Dinars
// =============================================================================

/// An amount in Tunisian Dinars, as sent by the API.
///
/// ## Design Decisions
/// - **f64**: the backend aggregates with floating point; we keep its values
///   and only round at the display boundary
/// - **Transparent serde**: serializes as the bare number
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dinars(f64);

impl Dinars {
    /// Wraps a raw amount.
    #[inline]
    pub const fn new(amount: f64) -> Self {
        Dinars(amount)
    }

    /// Zero dinars.
    #[inline]
    pub const fn zero() -> Self {
        Dinars(0.0)
    }

    /// Returns the raw amount.
    #[inline]
    pub const fn amount(&self) -> f64 {
        self.0
    }

    /// Amount rounded to two decimals (chart values).
    pub fn rounded(&self) -> f64 {
        round_to(self.0, 2)
    }

    /// Integer-rounded label with thousands separators: `"12,346 DT"`.
    ///
    /// ## User Workflow
    /// ```text
    /// Top products table
    ///      │
    ///      ▼
    /// total_amount 12345.6 ──► whole_label() ──► "12,346 DT"
    /// ```
    pub fn whole_label(&self) -> String {
        let whole = round_to(self.0, 0) as i64;
        format!("{} {}", group_thousands(whole), CURRENCY_SUFFIX)
    }
}

impl From<f64> for Dinars {
    fn from(amount: f64) -> Self {
        Dinars(amount)
    }
}

/// Stat-card format: grouped integer part, up to three fraction digits with
/// trailing zeros dropped, then the currency suffix.
impl fmt::Display for Dinars {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scale = 10u64.pow(DISPLAY_FRACTION_DIGITS);
        let value = if self.0.is_finite() { self.0 } else { 0.0 };
        let scaled = (value.abs() * scale as f64).round() as u64;
        let whole = scaled / scale;
        let fraction = scaled % scale;

        if value < 0.0 && scaled != 0 {
            write!(f, "-")?;
        }
        write!(f, "{}", group_thousands(whole as i64))?;
        if fraction != 0 {
            let digits = format!("{:0width$}", fraction, width = DISPLAY_FRACTION_DIGITS as usize);
            write!(f, ".{}", digits.trim_end_matches('0'))?;
        }
        write!(f, " {}", CURRENCY_SUFFIX)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_two_places() {
        assert_eq!(round_to(20.004, 2), 20.0);
        assert_eq!(round_to(99.999, 2), 100.0);
        assert_eq!(round_to(12.345678, 2), 12.35);
        assert_eq!(round_to(-3.14159, 2), -3.14);
    }

    #[test]
    fn test_round_to_binary_half_case() {
        // 100.005 is stored just below the half, so both 100.00 and 100.01
        // would be acceptable; we pin what f64::round produces.
        let rounded = round_to(100.005, 2);
        assert!(rounded == 100.0 || rounded == 100.01);
    }

    #[test]
    fn test_round_to_non_finite_is_zero() {
        assert_eq!(round_to(f64::NAN, 2), 0.0);
        assert_eq!(round_to(f64::INFINITY, 2), 0.0);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(12), "12");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(12345), "12,345");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(-987654), "-987,654");
    }

    #[test]
    fn test_whole_label() {
        assert_eq!(Dinars::new(12345.6).whole_label(), "12,346 DT");
        assert_eq!(Dinars::new(999.4).whole_label(), "999 DT");
        assert_eq!(Dinars::zero().whole_label(), "0 DT");
    }

    #[test]
    fn test_display() {
        assert_eq!(Dinars::new(1500.0).to_string(), "1,500 DT");
        assert_eq!(Dinars::new(1500.25).to_string(), "1,500.25 DT");
        assert_eq!(Dinars::new(2999.1234).to_string(), "2,999.123 DT");
        assert_eq!(Dinars::new(-42.5).to_string(), "-42.5 DT");
        assert_eq!(Dinars::new(-0.0001).to_string(), "0 DT");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(12.3456), "12.35%");
        assert_eq!(format_percent(0.0), "0.00%");
    }

    #[test]
    fn test_serde_is_transparent() {
        let amount: Dinars = serde_json::from_str("149.9").unwrap();
        assert_eq!(amount.amount(), 149.9);
        assert_eq!(serde_json::to_string(&amount).unwrap(), "149.9");
    }
}
