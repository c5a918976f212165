//! # Dashboard
//!
//! Headline totals, the daily revenue/profit trend, revenue split by brand
//! and the best sellers, all from one `/dashboard` request.
//!
//! ## Layout
//! ```text
//! ┌───────────────┬───────────────┬────────────────┬─────────────┐
//! │ Total Revenue │ Total Profit  │ Total Products │ Total Sales │
//! ├───────────────┴───────────────┼────────────────┴─────────────┤
//! │ Revenue & Profit Trend (line) │ Revenue by Brand (pie)       │
//! ├───────────────────────────────┴──────────────────────────────┤
//! │ Top Selling Products: Product │ Sales │ Revenue              │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use megapc_client::{ConsoleApi, LoadState};
use megapc_core::chart::{revenue_by_brand, revenue_profit_trend, ChartView};
use megapc_core::{
    shape_brand_performance, shape_daily_trend, shape_top_products, DashboardData, Dinars,
    TopProductRow,
};
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

use super::load_view;
use crate::error::ConsoleResult;
use crate::render::{self, StatCard};

pub const FAILURE: &str = "Failed to load dashboard data";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub cards: Vec<StatCard>,
    pub trend: ChartView,
    pub brands: ChartView,
    pub top_products: Vec<TopProductRow>,
}

/// Shapes the `/dashboard` payload for display.
pub fn build(data: &DashboardData) -> DashboardView {
    let stats = &data.stats;
    let cards = vec![
        StatCard::new("Total Revenue", Dinars::new(stats.total_revenue)),
        StatCard::new("Total Profit", Dinars::new(stats.total_profit)),
        StatCard::new("Total Products", stats.total_products),
        StatCard::new("Total Sales", stats.total_sales),
    ];

    DashboardView {
        cards,
        trend: revenue_profit_trend().view(&shape_daily_trend(&data.charts.daily_trend)),
        brands: revenue_by_brand().view(&shape_brand_performance(&data.charts.brand_performance)),
        top_products: shape_top_products(&data.charts.top_products),
    }
}

pub async fn fetch(api: &dyn ConsoleApi) -> ConsoleResult<DashboardView> {
    debug!("dashboard page");
    let start = Instant::now();

    let data = api.dashboard().await?;
    let view = build(&data);

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        trend_points = view.trend.points.len(),
        top_products = view.top_products.len(),
        "Dashboard loaded"
    );
    Ok(view)
}

pub async fn load(api: &dyn ConsoleApi) -> LoadState<DashboardView> {
    load_view("dashboard", FAILURE, fetch(api)).await
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::heading(f, "Dashboard")?;
        render::cards(f, &self.cards)?;
        writeln!(f)?;
        writeln!(f, "{}", render::chart(&self.trend))?;
        writeln!(f, "{}", render::chart(&self.brands))?;

        writeln!(f, "Top Selling Products")?;
        if self.top_products.is_empty() {
            return writeln!(f, "  No sales yet");
        }
        let rows: Vec<Vec<String>> = self
            .top_products
            .iter()
            .map(|row| {
                vec![
                    row.product.clone(),
                    row.sales.to_string(),
                    row.revenue_label.clone(),
                ]
            })
            .collect();
        write!(f, "{}", render::table(&["Product", "Sales", "Revenue"], &rows))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use megapc_client::FakeApi;
    use megapc_core::{DailyTrendDatum, DashboardStats, SegmentStats, TopProductRaw};

    fn seeded() -> FakeApi {
        let mut api = FakeApi::new();
        api.dashboard.stats = DashboardStats {
            total_revenue: 1_234_567.891,
            total_profit: 250_000.5,
            total_products: 148,
            total_sales: 3_120,
            ..DashboardStats::default()
        };
        api.dashboard.charts.daily_trend = vec![
            DailyTrendDatum {
                date: "2024-06-01".into(),
                total_amount: 5400.456,
                total_profit: 820.0,
                ..DailyTrendDatum::default()
            },
            DailyTrendDatum {
                date: "2024-06-02".into(),
                total_amount: 3100.0,
                total_profit: 410.129,
                ..DailyTrendDatum::default()
            },
        ];
        api.dashboard.charts.brand_performance = vec![
            SegmentStats {
                label: "ASUS".into(),
                total_amount: 52_000.0,
                ..SegmentStats::default()
            },
            SegmentStats {
                label: "Lenovo".into(),
                total_amount: 31_500.0,
                ..SegmentStats::default()
            },
        ];
        api.dashboard.charts.top_products = vec![TopProductRaw {
            product_name: "ASUS TUF Gaming F15".into(),
            quantity: 37,
            total_amount: 129_499.6,
            ..TopProductRaw::default()
        }];
        api
    }

    #[tokio::test]
    async fn test_dashboard_loads() {
        let api = seeded();
        let view = load(&api).await.into_result().unwrap();

        assert_eq!(view.cards[0].title, "Total Revenue");
        assert_eq!(view.cards[0].value, "1,234,567.891 DT");
        assert_eq!(view.cards[1].value, "250,000.5 DT");
        assert_eq!(view.cards[2].value, "148");
        assert_eq!(view.cards[3].value, "3120");

        assert_eq!(view.trend.points.len(), 2);
        assert_eq!(view.trend.points[0].values[0].value, 5400.46);
        assert_eq!(view.trend.points[1].values[1].value, 410.13);

        assert_eq!(view.brands.points[1].x, "Lenovo");
        assert_eq!(view.top_products[0].revenue_label, "129,500 DT");
        assert_eq!(api.calls().await, vec!["/dashboard"]);
    }

    #[tokio::test]
    async fn test_dashboard_failure_message() {
        let api = seeded();
        api.fail_on("/dashboard").await;

        let state = load(&api).await;
        assert_eq!(state, LoadState::Failed(FAILURE.to_string()));
    }

    #[tokio::test]
    async fn test_empty_dashboard_renders() {
        let api = FakeApi::new();
        let view = fetch(&api).await.unwrap();
        assert_eq!(view.cards[0].value, "0 DT");

        let text = view.to_string();
        assert!(text.contains("No data"));
        assert!(text.contains("No sales yet"));
    }

    #[tokio::test]
    async fn test_dashboard_json_shape() {
        let api = seeded();
        let view = fetch(&api).await.unwrap();
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["trend"]["kind"], "line");
        assert_eq!(json["brands"]["palette"][0], "#000000");
        assert_eq!(json["top_products"][0]["sales"], 37);
    }
}
