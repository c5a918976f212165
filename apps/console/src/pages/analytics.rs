//! # Analytics
//!
//! Monthly, weekly and hourly series are requested together; the page
//! draws four charts from them and derives three insight cards.
//!
//! ## Requests
//! ```text
//!            ┌── /analytics/monthly ──┐
//! try_join! ─┼── /analytics/weekly  ──┼──► charts + insights
//!            ├── /analytics/hourly  ──┤
//!            ├── /analytics/daily?days=N     (--daily-days)
//!            └── /analytics/{brands,gpu,cpu} (--segment)
//! ```
//!
//! Any failure fails the whole page with one message.

use clap::ValueEnum;
use megapc_client::{ClientResult, ConsoleApi, LoadState};
use megapc_core::chart::{
    monthly_revenue_profit, profit_margin_trend, revenue_profit_trend, sales_by_hour,
    weekly_sales_profit, ChartView, HourlyField, WeeklyField,
};
use megapc_core::money::format_percent;
use megapc_core::{
    compute_average_margin, find_peak, shape_daily_trend, DailyTrendDatum, Dinars, HourlyDatum,
    MonthlyDatum, SegmentStats, WeeklyDatum,
};
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

use super::load_view;
use crate::error::ConsoleResult;
use crate::render::{self, StatCard};

pub const FAILURE: &str = "Failed to load analytics data";

/// Shown in an insight card when its series is empty.
pub const NOT_AVAILABLE: &str = "N/A";

/// Breakdown requested with `--segment`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Segment {
    Brand,
    Gpu,
    Cpu,
}

impl Segment {
    fn title(self) -> &'static str {
        match self {
            Segment::Brand => "Performance by Brand",
            Segment::Gpu => "Performance by GPU",
            Segment::Cpu => "Performance by CPU",
        }
    }

    fn column(self) -> &'static str {
        match self {
            Segment::Brand => "Brand",
            Segment::Gpu => "GPU",
            Segment::Cpu => "CPU",
        }
    }

    async fn fetch(self, api: &dyn ConsoleApi) -> ClientResult<Vec<SegmentStats>> {
        match self {
            Segment::Brand => api.brand_analytics().await,
            Segment::Gpu => api.gpu_analytics().await,
            Segment::Cpu => api.cpu_analytics().await,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AnalyticsOptions {
    /// Also draw the daily trend over this many days.
    pub daily_days: Option<u32>,
    pub segment: Option<Segment>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentRow {
    pub label: String,
    pub revenue: String,
    pub profit: String,
    pub quantity: f64,
    pub margin: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SegmentTable {
    pub segment: Segment,
    pub rows: Vec<SegmentRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsView {
    pub insights: Vec<StatCard>,
    pub monthly: ChartView,
    pub margin: ChartView,
    pub weekly: ChartView,
    pub hourly: ChartView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub daily: Option<ChartView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub segments: Option<SegmentTable>,
}

// =============================================================================
// Insights
// =============================================================================

/// Day of the week with the most units sold.
pub fn best_day(weekly: &[WeeklyDatum]) -> String {
    find_peak(weekly, WeeklyField::Quantity)
        .map(|d| d.day.as_str())
        .filter(|day| !day.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

/// Hour with the most units sold.
pub fn peak_hour(hourly: &[HourlyDatum]) -> String {
    find_peak(hourly, HourlyField::Quantity)
        .map(|h| h.hour.as_str())
        .filter(|hour| !hour.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}

fn insights(monthly: &[MonthlyDatum], weekly: &[WeeklyDatum], hourly: &[HourlyDatum]) -> Vec<StatCard> {
    vec![
        StatCard::new("Best Day", best_day(weekly)).with_caption("Highest sales"),
        StatCard::new("Peak Hour", peak_hour(hourly)).with_caption("Busiest time"),
        StatCard::new("Avg. Margin", format_percent(compute_average_margin(monthly)))
            .with_caption("Profit margin"),
    ]
}

fn segment_rows(stats: &[SegmentStats]) -> Vec<SegmentRow> {
    stats
        .iter()
        .map(|s| SegmentRow {
            label: s.label.clone(),
            revenue: Dinars::new(s.total_amount).whole_label(),
            profit: Dinars::new(s.total_profit).whole_label(),
            quantity: s.quantity,
            margin: format_percent(s.profit_margin),
        })
        .collect()
}

// =============================================================================
// Loading
// =============================================================================

pub fn build(
    monthly: &[MonthlyDatum],
    weekly: &[WeeklyDatum],
    hourly: &[HourlyDatum],
    daily: Option<&[DailyTrendDatum]>,
    segments: Option<(Segment, &[SegmentStats])>,
) -> AnalyticsView {
    AnalyticsView {
        insights: insights(monthly, weekly, hourly),
        monthly: monthly_revenue_profit().view(monthly),
        margin: profit_margin_trend().view(monthly),
        weekly: weekly_sales_profit().view(weekly),
        hourly: sales_by_hour().view(hourly),
        daily: daily.map(|raw| revenue_profit_trend().view(&shape_daily_trend(raw))),
        segments: segments.map(|(segment, stats)| SegmentTable {
            segment,
            rows: segment_rows(stats),
        }),
    }
}

pub async fn fetch(api: &dyn ConsoleApi, opts: &AnalyticsOptions) -> ConsoleResult<AnalyticsView> {
    debug!(daily_days = ?opts.daily_days, segment = ?opts.segment, "analytics page");
    let start = Instant::now();

    let daily = async {
        match opts.daily_days {
            Some(days) => api.daily_analytics(days).await.map(Some),
            None => Ok(None),
        }
    };
    let segment = async {
        match opts.segment {
            Some(segment) => segment.fetch(api).await.map(|stats| Some((segment, stats))),
            None => Ok(None),
        }
    };

    let (monthly, weekly, hourly, daily, segment) = tokio::try_join!(
        api.monthly_analytics(),
        api.weekly_analytics(),
        api.hourly_analytics(),
        daily,
        segment,
    )?;

    let view = build(
        &monthly,
        &weekly,
        &hourly,
        daily.as_deref(),
        segment.as_ref().map(|(s, stats)| (*s, stats.as_slice())),
    );

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        months = monthly.len(),
        weekdays = weekly.len(),
        hours = hourly.len(),
        "Analytics loaded"
    );
    Ok(view)
}

pub async fn load(api: &dyn ConsoleApi, opts: &AnalyticsOptions) -> LoadState<AnalyticsView> {
    load_view("analytics", FAILURE, fetch(api, opts)).await
}

impl fmt::Display for AnalyticsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::heading(f, "Analytics")?;
        render::cards(f, &self.insights)?;
        writeln!(f)?;

        writeln!(f, "{}", render::chart(&self.monthly))?;
        writeln!(f, "{}", render::chart(&self.margin))?;
        writeln!(f, "{}", render::chart(&self.weekly))?;
        write!(f, "{}", render::chart(&self.hourly))?;

        if let Some(daily) = &self.daily {
            writeln!(f)?;
            write!(f, "{}", render::chart(daily))?;
        }

        if let Some(table) = &self.segments {
            writeln!(f)?;
            writeln!(f, "{}", table.segment.title())?;
            let rows: Vec<Vec<String>> = table
                .rows
                .iter()
                .map(|r| {
                    vec![
                        r.label.clone(),
                        r.revenue.clone(),
                        r.profit.clone(),
                        r.quantity.to_string(),
                        r.margin.clone(),
                    ]
                })
                .collect();
            write!(
                f,
                "{}",
                render::table(
                    &[table.segment.column(), "Revenue", "Profit", "Units", "Margin"],
                    &rows
                )
            )?;
        }
        Ok(())
    }
}
