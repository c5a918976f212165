//! # Domain Types
//!
//! Read-only records received from the console REST API.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Wire Records                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Sale       │   │  DashboardData  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  name / brand   │   │  sale_date      │   │  stats          │       │
//! │  │  cpu / gpu      │   │  product_name   │   │  charts         │       │
//! │  │  price (HT/TTC) │   │  total_amount   │   │   daily_trend   │       │
//! │  │  stock_quantity │   │  total_profit   │   │   brand_perf.   │       │
//! │  │  profit_margin  │   │  quantity       │   │   top_products  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  Analytics rows: MonthlyDatum, WeeklyDatum, HourlyDatum,               │
//! │                  DailyTrendDatum, SegmentStats, TopProductRaw          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Partial Records
//! The backend builds these from CSV files, so columns can be absent or
//! `null`. Every field deserializes a missing or `null` value to its zero
//! value (empty string, `0`, `0.0`) instead of failing the whole payload.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

use crate::money::Dinars;

/// Default "low stock" threshold used across the console.
pub const DEFAULT_LOW_STOCK_THRESHOLD: u32 = 10;

/// Maps a missing or `null` JSON value to `T::default()`.
fn zero_if_null<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// =============================================================================
// Stock Level
// =============================================================================

/// Presentation-only stock classification.
///
/// ```text
///   0 ──────────► OutOfStock
///   1 .. t-1 ───► Low
///   t .. ───────► InStock        (t = low stock threshold, default 10)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    Low,
    InStock,
}

impl StockLevel {
    /// Classifies a stock quantity against a low-stock threshold.
    pub fn classify(quantity: u32, threshold: u32) -> Self {
        if quantity == 0 {
            StockLevel::OutOfStock
        } else if quantity < threshold {
            StockLevel::Low
        } else {
            StockLevel::InStock
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A laptop/PC in the catalogue.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Product {
    /// Display name. Sent as `product_name` by the API.
    #[serde(rename = "product_name", default, deserialize_with = "zero_if_null")]
    pub name: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub brand: String,

    /// Product line, e.g. "TUF Gaming".
    #[serde(default, deserialize_with = "zero_if_null")]
    pub series: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub model: String,

    /// Diagonal in inches.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub screen_size: f64,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub screen_resolution: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub screen_type: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub cpu: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub gpu: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub ram: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub storage: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub os: String,

    /// Selling price before tax (HT), in dinars.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub price: f64,

    /// Purchase price, in dinars.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub buying_price: f64,

    /// VAT percentage applied on top of `price`.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub tva_percentage: f64,

    /// Selling price including tax (TTC), in dinars.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub price_with_tva: f64,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub stock_quantity: u32,

    /// Profit margin in percent.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub profit_margin: f64,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub image_url: String,

    #[serde(default, deserialize_with = "zero_if_null")]
    pub product_url: String,
}

impl Product {
    /// Returns the pre-tax price.
    #[inline]
    pub fn price_ht(&self) -> Dinars {
        Dinars::new(self.price)
    }

    /// Returns the tax-inclusive price.
    #[inline]
    pub fn price_ttc(&self) -> Dinars {
        Dinars::new(self.price_with_tva)
    }

    /// VAT portion of the tax-inclusive price.
    pub fn tax_amount(&self) -> Dinars {
        Dinars::new(self.price_with_tva - self.price)
    }

    /// Classifies the current stock against `threshold`.
    #[inline]
    pub fn stock_level(&self, threshold: u32) -> StockLevel {
        StockLevel::classify(self.stock_quantity, threshold)
    }

    /// Checks if the product can't be ordered at all.
    #[inline]
    pub fn is_out_of_stock(&self) -> bool {
        self.stock_quantity == 0
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A single sale line as recorded by the backend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Timestamp of the sale, ISO-8601 without timezone.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub sale_date: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub product_name: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub brand: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub cpu: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub gpu: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub quantity: u32,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub unit_price: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_cost: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_profit: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub profit_margin: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub date: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub year: i32,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub month: u32,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub week: u32,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub day_of_week: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub hour: u32,
}

impl Sale {
    /// Parses `sale_date`, accepting the shapes pandas emits.
    ///
    /// Returns `None` when the timestamp is blank or unparseable.
    pub fn sold_at(&self) -> Option<NaiveDateTime> {
        let raw = self.sale_date.trim();
        const FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"];
        FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
            .or_else(|| {
                NaiveDate::parse_from_str(raw, "%Y-%m-%d")
                    .ok()
                    .and_then(|d| d.and_hms_opt(0, 0, 0))
            })
    }

    /// Human-readable sale timestamp, falling back to the raw string.
    pub fn sold_at_label(&self) -> String {
        match self.sold_at() {
            Some(ts) => ts.format("%d/%m/%Y %H:%M:%S").to_string(),
            None => self.sale_date.clone(),
        }
    }
}

// =============================================================================
// Summary Statistics
// =============================================================================

/// `/sales/summary` payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_sales: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_revenue: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_profit: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_cost: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub average_order_value: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub average_profit_margin: f64,
}

/// `/sales/today` payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TodaySales {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub count: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub revenue: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub profit: f64,
    /// Absent when there were no sales today.
    #[serde(default, deserialize_with = "zero_if_null")]
    pub avg_order_value: f64,
}

/// `/products/stats` payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductStats {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_products: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_brands: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_stock_value: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub average_price: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub average_profit_margin: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub low_stock_count: u64,
}

// =============================================================================
// Analytics Records
// =============================================================================

/// One day of aggregated sales (`/analytics/daily`, dashboard trend).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyTrendDatum {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub date: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_cost: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_profit: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub profit_margin: f64,
}

/// One month of aggregated sales, `period` is `YYYY-MM`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthlyDatum {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub period: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_profit: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub profit_margin: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub quantity: f64,
}

/// Sales per day of week (Monday..Sunday).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct WeeklyDatum {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub day: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_profit: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_amount: f64,
}

/// Sales per hour of day, `hour` is a label such as `"14h"`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct HourlyDatum {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub hour: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub quantity: f64,
}

/// Performance of one brand, GPU or CPU.
///
/// The API names the grouping column after the segment (`brand`, `gpu`,
/// `cpu`); all three land in `label`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SegmentStats {
    #[serde(alias = "brand", alias = "gpu", alias = "cpu", default, deserialize_with = "zero_if_null")]
    pub label: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_profit: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub quantity: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub profit_margin: f64,
}

/// Best-selling product row (`/sales/top-products`, dashboard table).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopProductRaw {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub product_name: String,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub quantity: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_amount: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_profit: f64,
}

// =============================================================================
// Dashboard
// =============================================================================

/// Headline figures of the `/dashboard` payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_revenue: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_profit: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_products: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub total_sales: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub today_sales: u64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub today_revenue: f64,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub today_profit: f64,
}

/// Raw chart collections of the `/dashboard` payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardCharts {
    #[serde(default, deserialize_with = "zero_if_null")]
    pub daily_trend: Vec<DailyTrendDatum>,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub brand_performance: Vec<SegmentStats>,
    #[serde(default, deserialize_with = "zero_if_null")]
    pub top_products: Vec<TopProductRaw>,
}

/// `/dashboard` payload.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardData {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub charts: DashboardCharts,
}

// =============================================================================
// Unit Tests
// =============================================================================
