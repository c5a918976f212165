//! # Sales
//!
//! Today's figures next to the recent transaction list, requested
//! together.
//!
//! ## Requests
//! ```text
//!            ┌── /sales/today ───────────────────┐
//! try_join! ─┼── /sales/recent?days=N  or        ├──► cards + table
//!            │   /sales?limit=N        (--limit) │
//!            ├── /sales/summary        (--summary)
//!            └── /sales/top-products   (--top)
//! ```

use megapc_client::{ConsoleApi, LoadState};
use megapc_core::money::format_percent;
use megapc_core::{shape_top_products, Dinars, Sale, SalesSummary, TodaySales, TopProductRow};
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

use super::load_view;
use crate::error::ConsoleResult;
use crate::render::{self, StatCard};

pub const FAILURE: &str = "Failed to load sales data";

pub const DEFAULT_RECENT_DAYS: u32 = 7;

#[derive(Debug, Clone)]
pub struct SalesOptions {
    /// Window of the recent transactions list.
    pub days: u32,
    /// List the latest `n` sales instead of a day window.
    pub limit: Option<u32>,
    pub summary: bool,
    /// Also show the `n` best sellers.
    pub top: Option<u32>,
}

impl Default for SalesOptions {
    fn default() -> Self {
        SalesOptions {
            days: DEFAULT_RECENT_DAYS,
            limit: None,
            summary: false,
            top: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SaleRow {
    pub date: String,
    pub product: String,
    pub quantity: u32,
    pub revenue: String,
    pub profit: String,
}

impl From<&Sale> for SaleRow {
    fn from(sale: &Sale) -> Self {
        SaleRow {
            date: sale.sold_at_label(),
            product: sale.product_name.clone(),
            quantity: sale.quantity,
            revenue: Dinars::new(sale.total_amount).to_string(),
            profit: Dinars::new(sale.total_profit).to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesView {
    pub today: Vec<StatCard>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<Vec<StatCard>>,
    pub list_title: String,
    pub transactions: Vec<SaleRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_products: Option<Vec<TopProductRow>>,
}

fn today_cards(today: &TodaySales) -> Vec<StatCard> {
    vec![
        StatCard::new("Today's Sales", today.count).with_caption("transactions"),
        StatCard::new("Today's Revenue", Dinars::new(today.revenue)),
        StatCard::new("Today's Profit", Dinars::new(today.profit)),
        StatCard::new("Avg. Sale Value", Dinars::new(today.avg_order_value)),
    ]
}

fn summary_cards(summary: &SalesSummary) -> Vec<StatCard> {
    vec![
        StatCard::new("Total Sales", summary.total_sales),
        StatCard::new("Total Revenue", Dinars::new(summary.total_revenue)),
        StatCard::new("Total Profit", Dinars::new(summary.total_profit)),
        StatCard::new("Total Cost", Dinars::new(summary.total_cost)),
        StatCard::new("Avg. Order Value", Dinars::new(summary.average_order_value)),
        StatCard::new("Avg. Margin", format_percent(summary.average_profit_margin)),
    ]
}

pub async fn fetch(api: &dyn ConsoleApi, opts: &SalesOptions) -> ConsoleResult<SalesView> {
    debug!(days = opts.days, limit = ?opts.limit, top = ?opts.top, "sales page");
    let start = Instant::now();

    let transactions = async {
        match opts.limit {
            Some(limit) => api.sales(Some(limit)).await,
            None => api.recent_sales(opts.days).await,
        }
    };
    let summary = async {
        if opts.summary {
            api.sales_summary().await.map(Some)
        } else {
            Ok(None)
        }
    };
    let top = async {
        match opts.top {
            Some(limit) => api.top_products(limit).await.map(Some),
            None => Ok(None),
        }
    };

    let (today, sales, summary, top) =
        tokio::try_join!(api.today_sales(), transactions, summary, top)?;

    let list_title = match opts.limit {
        Some(limit) => format!("Latest {} Transactions", limit),
        None => "Recent Transactions".to_string(),
    };

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = sales.len(),
        today = today.count,
        "Sales loaded"
    );
    Ok(SalesView {
        today: today_cards(&today),
        summary: summary.as_ref().map(summary_cards),
        list_title,
        transactions: sales.iter().map(SaleRow::from).collect(),
        top_products: top.as_deref().map(shape_top_products),
    })
}

pub async fn load(api: &dyn ConsoleApi, opts: &SalesOptions) -> LoadState<SalesView> {
    load_view("sales", FAILURE, fetch(api, opts)).await
}

impl fmt::Display for SalesView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::heading(f, "Sales")?;
        render::cards(f, &self.today)?;

        if let Some(summary) = &self.summary {
            writeln!(f)?;
            writeln!(f, "All Time")?;
            render::cards(f, summary)?;
        }

        writeln!(f)?;
        writeln!(f, "{}", self.list_title)?;
        if self.transactions.is_empty() {
            writeln!(f, "  No transactions")?;
        } else {
            let rows: Vec<Vec<String>> = self
                .transactions
                .iter()
                .map(|t| {
                    vec![
                        t.date.clone(),
                        t.product.clone(),
                        t.quantity.to_string(),
                        t.revenue.clone(),
                        t.profit.clone(),
                    ]
                })
                .collect();
            write!(
                f,
                "{}",
                render::table(&["Date", "Product", "Qty", "Revenue", "Profit"], &rows)
            )?;
        }

        if let Some(top) = &self.top_products {
            writeln!(f)?;
            writeln!(f, "Top Selling Products")?;
            let rows: Vec<Vec<String>> = top
                .iter()
                .map(|r| vec![r.product.clone(), r.sales.to_string(), r.revenue_label.clone()])
                .collect();
            write!(f, "{}", render::table(&["Product", "Sales", "Revenue"], &rows))?;
        }
        Ok(())
    }
}
