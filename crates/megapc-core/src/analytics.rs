//! # Analytics Shaping
//!
//! Projects the backend's aggregate rows into chart-ready series.
//!
//! ## Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Raw record (API)                    Chart row (this module)            │
//! │  ────────────────────────────────    ─────────────────────────────────  │
//! │  DailyTrendDatum                     DailyTrendPoint                    │
//! │    date, total_amount, total_profit    date, revenue(2dp), profit(2dp)  │
//! │                                                                         │
//! │  SegmentStats (brand)                BrandSlice                         │
//! │    label, total_amount                 brand, value(2dp)                │
//! │                                                                         │
//! │  TopProductRaw                       TopProductRow                      │
//! │    product_name, quantity,             product, sales,                  │
//! │    total_amount                        revenue_label "12,346 DT"        │
//! │                                                                         │
//! │  MonthlyDatum[]        ──► compute_average_margin ──► f64 (0 if empty)  │
//! │  WeeklyDatum[] / ...   ──► find_peak(field)       ──► Option<&record>   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every function here is a pure projection: output order follows input
//! order and nothing is cached.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::chart::ChartField;
use crate::money::{round_to, Dinars};
use crate::types::{DailyTrendDatum, MonthlyDatum, SegmentStats, TopProductRaw};

// =============================================================================
// Chart Rows
// =============================================================================

/// Point on the dashboard revenue/profit trend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyTrendPoint {
    pub date: String,
    pub revenue: f64,
    pub profit: f64,
}

/// Slice of the revenue-by-brand pie.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BrandSlice {
    pub brand: String,
    pub value: f64,
}

/// Row of the top products table.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopProductRow {
    pub product: String,
    pub sales: u64,
    pub revenue_label: String,
}

// =============================================================================
// Projections
// =============================================================================

/// Renames `total_amount`/`total_profit` to `revenue`/`profit`, rounded to
/// two decimals.
pub fn shape_daily_trend(raw: &[DailyTrendDatum]) -> Vec<DailyTrendPoint> {
    raw.iter()
        .map(|d| DailyTrendPoint {
            date: d.date.clone(),
            revenue: round_to(d.total_amount, 2),
            profit: round_to(d.total_profit, 2),
        })
        .collect()
}

pub fn shape_brand_performance(raw: &[SegmentStats]) -> Vec<BrandSlice> {
    raw.iter()
        .map(|s| BrandSlice {
            brand: s.label.clone(),
            value: round_to(s.total_amount, 2),
        })
        .collect()
}

/// Keeps the sold quantity as is and labels revenue as a whole-dinar
/// amount with thousands separators.
pub fn shape_top_products(raw: &[TopProductRaw]) -> Vec<TopProductRow> {
    raw.iter()
        .map(|t| TopProductRow {
            product: t.product_name.clone(),
            sales: t.quantity,
            revenue_label: Dinars::new(t.total_amount).whole_label(),
        })
        .collect()
}

/// Mean profit margin across months; exactly 0 for no months.
pub fn compute_average_margin(monthly: &[MonthlyDatum]) -> f64 {
    if monthly.is_empty() {
        return 0.0;
    }
    let sum: f64 = monthly.iter().map(|m| m.profit_margin).sum();
    sum / monthly.len() as f64
}

/// Record with the largest value of `field`.
///
/// Ties go to the earliest record. `None` only for an empty slice.
///
/// ## Example
/// ```rust
/// use megapc_core::analytics::find_peak;
/// use megapc_core::chart::WeeklyField;
/// use megapc_core::WeeklyDatum;
///
/// let week = vec![
///     WeeklyDatum { day: "Monday".into(), quantity: 4.0, ..Default::default() },
///     WeeklyDatum { day: "Friday".into(), quantity: 9.0, ..Default::default() },
///     WeeklyDatum { day: "Saturday".into(), quantity: 9.0, ..Default::default() },
/// ];
/// let peak = find_peak(&week, WeeklyField::Quantity).unwrap();
/// assert_eq!(peak.day, "Friday");
/// ```
pub fn find_peak<R, F>(records: &[R], field: F) -> Option<&R>
where
    F: ChartField<R>,
{
    let mut records = records.iter();
    let first = records.next()?;
    let peak = records.fold(first, |best, candidate| {
        if field.value(candidate).total_cmp(&field.value(best)).is_gt() {
            candidate
        } else {
            best
        }
    });
    Some(peak)
}

// =============================================================================
// Unit Tests
// =============================================================================
