//! # Chart Configuration
//!
//! Declarative chart descriptions over concrete record types.
//!
//! ## Model
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ChartSpec<R, F>                                                        │
//! │    title   "Monthly Revenue & Profit"                                   │
//! │    kind    Area                                                         │
//! │    x_axis  R::X_AXIS ("period")                                         │
//! │    series  [ (F::TotalAmount, #000000, "Revenue"),                      │
//! │              (F::TotalProfit, #666666, "Profit") ]                      │
//! │                                                                         │
//! │  records: &[R] ──► spec.points() ──► [ChartPoint { x, values }]         │
//! │                                                                         │
//! │  F is an enum of the numeric fields of R, so a series can only name a  │
//! │  field that exists on the record it is drawn from.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use std::marker::PhantomData;

use crate::analytics::{BrandSlice, DailyTrendPoint};
use crate::types::{HourlyDatum, MonthlyDatum, WeeklyDatum};

/// Palette used by the revenue-by-brand pie, cycled per slice.
pub const PIE_PALETTE: [&str; 4] = ["#000000", "#333333", "#666666", "#999999"];

const PRIMARY: &str = "#000000";
const SECONDARY: &str = "#666666";

// =============================================================================
// Traits
// =============================================================================

/// A record that can sit on a chart's category axis.
pub trait ChartRecord {
    /// Name of the category field, e.g. `"period"`.
    const X_AXIS: &'static str;

    fn x_value(&self) -> &str;
}

/// A numeric field of `R` that a series can plot.
pub trait ChartField<R>: Copy {
    /// Wire name of the field.
    fn key(&self) -> &'static str;

    fn value(&self, record: &R) -> f64;
}

// =============================================================================
// Field Enums
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DailyTrendField {
    Revenue,
    Profit,
}

impl ChartField<DailyTrendPoint> for DailyTrendField {
    fn key(&self) -> &'static str {
        match self {
            DailyTrendField::Revenue => "revenue",
            DailyTrendField::Profit => "profit",
        }
    }

    fn value(&self, record: &DailyTrendPoint) -> f64 {
        match self {
            DailyTrendField::Revenue => record.revenue,
            DailyTrendField::Profit => record.profit,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BrandSliceField {
    Value,
}

impl ChartField<BrandSlice> for BrandSliceField {
    fn key(&self) -> &'static str {
        "value"
    }

    fn value(&self, record: &BrandSlice) -> f64 {
        record.value
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MonthlyField {
    TotalAmount,
    TotalProfit,
    ProfitMargin,
    Quantity,
}

impl ChartField<MonthlyDatum> for MonthlyField {
    fn key(&self) -> &'static str {
        match self {
            MonthlyField::TotalAmount => "total_amount",
            MonthlyField::TotalProfit => "total_profit",
            MonthlyField::ProfitMargin => "profit_margin",
            MonthlyField::Quantity => "quantity",
        }
    }

    fn value(&self, record: &MonthlyDatum) -> f64 {
        match self {
            MonthlyField::TotalAmount => record.total_amount,
            MonthlyField::TotalProfit => record.total_profit,
            MonthlyField::ProfitMargin => record.profit_margin,
            MonthlyField::Quantity => record.quantity,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeeklyField {
    Quantity,
    TotalProfit,
    TotalAmount,
}

impl ChartField<WeeklyDatum> for WeeklyField {
    fn key(&self) -> &'static str {
        match self {
            WeeklyField::Quantity => "quantity",
            WeeklyField::TotalProfit => "total_profit",
            WeeklyField::TotalAmount => "total_amount",
        }
    }

    fn value(&self, record: &WeeklyDatum) -> f64 {
        match self {
            WeeklyField::Quantity => record.quantity,
            WeeklyField::TotalProfit => record.total_profit,
            WeeklyField::TotalAmount => record.total_amount,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HourlyField {
    Quantity,
}

impl ChartField<HourlyDatum> for HourlyField {
    fn key(&self) -> &'static str {
        "quantity"
    }

    fn value(&self, record: &HourlyDatum) -> f64 {
        record.quantity
    }
}

impl ChartRecord for DailyTrendPoint {
    const X_AXIS: &'static str = "date";

    fn x_value(&self) -> &str {
        &self.date
    }
}

impl ChartRecord for BrandSlice {
    const X_AXIS: &'static str = "brand";

    fn x_value(&self) -> &str {
        &self.brand
    }
}

impl ChartRecord for MonthlyDatum {
    const X_AXIS: &'static str = "period";

    fn x_value(&self) -> &str {
        &self.period
    }
}

impl ChartRecord for WeeklyDatum {
    const X_AXIS: &'static str = "day";

    fn x_value(&self) -> &str {
        &self.day
    }
}

impl ChartRecord for HourlyDatum {
    const X_AXIS: &'static str = "hour";

    fn x_value(&self) -> &str {
        &self.hour
    }
}

// =============================================================================
// Spec
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Line,
    Area,
    Bar,
    Pie,
}

/// One plotted field with its color and legend label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Series<F> {
    pub field: F,
    pub color: &'static str,
    pub label: &'static str,
}

/// Value of one series at one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesValue {
    pub key: &'static str,
    pub label: &'static str,
    pub value: f64,
}

/// Renderer-ready point: the category plus one value per series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartPoint {
    pub x: String,
    pub values: Vec<SeriesValue>,
}

/// A chart with its data attached, ready to print or serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartView {
    pub title: &'static str,
    pub kind: ChartKind,
    pub x_axis: &'static str,
    /// `(label, color)` per series.
    pub legend: Vec<(&'static str, &'static str)>,
    pub palette: &'static [&'static str],
    pub points: Vec<ChartPoint>,
}

impl ChartView {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSpec<R, F> {
    pub title: &'static str,
    pub kind: ChartKind,
    pub x_axis: &'static str,
    pub series: Vec<Series<F>>,
    /// Slice colors for pie charts; empty otherwise.
    pub palette: &'static [&'static str],
    #[serde(skip)]
    record: PhantomData<fn(&R)>,
}

impl<R, F> ChartSpec<R, F>
where
    R: ChartRecord,
    F: ChartField<R>,
{
    pub fn new(title: &'static str, kind: ChartKind) -> Self {
        ChartSpec {
            title,
            kind,
            x_axis: R::X_AXIS,
            series: Vec::new(),
            palette: &[],
            record: PhantomData,
        }
    }

    /// Adds a series drawn from `field`.
    pub fn series(mut self, field: F, color: &'static str, label: &'static str) -> Self {
        self.series.push(Series { field, color, label });
        self
    }

    pub fn with_palette(mut self, palette: &'static [&'static str]) -> Self {
        self.palette = palette;
        self
    }

    /// Projects `records` onto this chart, one point per record in order.
    pub fn points(&self, records: &[R]) -> Vec<ChartPoint> {
        records
            .iter()
            .map(|record| ChartPoint {
                x: record.x_value().to_string(),
                values: self
                    .series
                    .iter()
                    .map(|s| SeriesValue {
                        key: s.field.key(),
                        label: s.label,
                        value: s.field.value(record),
                    })
                    .collect(),
            })
            .collect()
    }

    /// Attaches `records` to this chart.
    pub fn view(&self, records: &[R]) -> ChartView {
        ChartView {
            title: self.title,
            kind: self.kind,
            x_axis: self.x_axis,
            legend: self.series.iter().map(|s| (s.label, s.color)).collect(),
            palette: self.palette,
            points: self.points(records),
        }
    }

    /// Color of the `index`-th slice, cycling through the palette.
    pub fn slice_color(&self, index: usize) -> Option<&'static str> {
        if self.palette.is_empty() {
            return None;
        }
        Some(self.palette[index % self.palette.len()])
    }
}

// =============================================================================
// Presets
// =============================================================================

/// Dashboard: revenue & profit per day.
pub fn revenue_profit_trend() -> ChartSpec<DailyTrendPoint, DailyTrendField> {
    ChartSpec::new("Revenue & Profit Trend", ChartKind::Line)
        .series(DailyTrendField::Revenue, PRIMARY, "Revenue")
        .series(DailyTrendField::Profit, SECONDARY, "Profit")
}

/// Dashboard: revenue share per brand.
pub fn revenue_by_brand() -> ChartSpec<BrandSlice, BrandSliceField> {
    ChartSpec::new("Revenue by Brand", ChartKind::Pie)
        .series(BrandSliceField::Value, PRIMARY, "Revenue")
        .with_palette(&PIE_PALETTE)
}

pub fn monthly_revenue_profit() -> ChartSpec<MonthlyDatum, MonthlyField> {
    ChartSpec::new("Monthly Revenue & Profit", ChartKind::Area)
        .series(MonthlyField::TotalAmount, PRIMARY, "Revenue")
        .series(MonthlyField::TotalProfit, SECONDARY, "Profit")
}

pub fn profit_margin_trend() -> ChartSpec<MonthlyDatum, MonthlyField> {
    ChartSpec::new("Profit Margin Trend", ChartKind::Line).series(
        MonthlyField::ProfitMargin,
        PRIMARY,
        "Margin %",
    )
}

pub fn weekly_sales_profit() -> ChartSpec<WeeklyDatum, WeeklyField> {
    ChartSpec::new("Weekly Sales & Profit", ChartKind::Bar)
        .series(WeeklyField::Quantity, PRIMARY, "Sales")
        .series(WeeklyField::TotalProfit, SECONDARY, "Profit")
}

pub fn sales_by_hour() -> ChartSpec<HourlyDatum, HourlyField> {
    ChartSpec::new("Sales by Hour", ChartKind::Bar).series(HourlyField::Quantity, PRIMARY, "Sales")
}

// =============================================================================
// Unit Tests
// =============================================================================
