//! # Products
//!
//! Inventory table. A non-blank `--search` goes to the server search
//! endpoint; a blank one reloads the full list. `--low-stock` lists only
//! products at or under the configured threshold.

use megapc_client::{ConsoleApi, LoadState};
use megapc_core::money::format_percent;
use megapc_core::{Dinars, Product, ProductStats, StockLevel};
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

use super::load_view;
use crate::error::ConsoleResult;
use crate::render::{self, StatCard};

pub const FAILURE: &str = "Failed to load products";

#[derive(Debug, Clone, Default)]
pub struct ProductsOptions {
    pub search: Option<String>,
    pub low_stock: bool,
    pub low_stock_threshold: u32,
}

/// Which list the table shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", content = "term", rename_all = "snake_case")]
pub enum ProductSource {
    All,
    Search(String),
    LowStock(u32),
}

impl ProductsOptions {
    pub fn source(&self) -> ProductSource {
        if self.low_stock {
            return ProductSource::LowStock(self.low_stock_threshold);
        }
        match self.search.as_deref().map(str::trim) {
            Some(term) if !term.is_empty() => ProductSource::Search(term.to_string()),
            _ => ProductSource::All,
        }
    }
}

/// Stock badge styling in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BadgeVariant {
    Destructive,
    Secondary,
    Default,
}

impl From<StockLevel> for BadgeVariant {
    fn from(level: StockLevel) -> Self {
        match level {
            StockLevel::OutOfStock => BadgeVariant::Destructive,
            StockLevel::Low => BadgeVariant::Secondary,
            StockLevel::InStock => BadgeVariant::Default,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRow {
    pub name: String,
    pub brand: String,
    pub cpu: String,
    pub gpu: String,
    pub price: String,
    pub stock: String,
    pub badge: BadgeVariant,
    pub margin: String,
}

impl ProductRow {
    pub fn new(product: &Product, low_stock_threshold: u32) -> Self {
        ProductRow {
            name: product.name.clone(),
            brand: product.brand.clone(),
            cpu: product.cpu.clone(),
            gpu: product.gpu.clone(),
            price: product.price_ht().to_string(),
            stock: format!("{} units", product.stock_quantity),
            badge: product.stock_level(low_stock_threshold).into(),
            margin: format_percent(product.profit_margin),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductsView {
    pub source: ProductSource,
    pub stats: Vec<StatCard>,
    pub rows: Vec<ProductRow>,
}

impl ProductsView {
    fn title(&self) -> String {
        match &self.source {
            ProductSource::All => "All Products".to_string(),
            ProductSource::Search(term) => format!("Search results for \"{}\"", term),
            ProductSource::LowStock(threshold) => format!("Low Stock (<= {} units)", threshold),
        }
    }
}

fn stat_cards(stats: &ProductStats) -> Vec<StatCard> {
    vec![
        StatCard::new("Products", stats.total_products),
        StatCard::new("Brands", stats.total_brands),
        StatCard::new("Stock Value", Dinars::new(stats.total_stock_value)),
        StatCard::new("Avg. Price", Dinars::new(stats.average_price)),
        StatCard::new("Avg. Margin", format_percent(stats.average_profit_margin)),
        StatCard::new("Low Stock", stats.low_stock_count),
    ]
}

pub async fn fetch(api: &dyn ConsoleApi, opts: &ProductsOptions) -> ConsoleResult<ProductsView> {
    let source = opts.source();
    debug!(source = ?source, "products page");
    let start = Instant::now();

    let list = async {
        match &source {
            ProductSource::All => api.products().await,
            ProductSource::Search(term) => api.search_products(term).await,
            ProductSource::LowStock(threshold) => api.low_stock(*threshold).await,
        }
    };
    let (products, stats) = tokio::try_join!(list, api.product_stats())?;

    let rows: Vec<ProductRow> = products
        .iter()
        .map(|p| ProductRow::new(p, opts.low_stock_threshold))
        .collect();

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = rows.len(),
        "Products loaded"
    );
    Ok(ProductsView {
        source,
        stats: stat_cards(&stats),
        rows,
    })
}

pub async fn load(api: &dyn ConsoleApi, opts: &ProductsOptions) -> LoadState<ProductsView> {
    load_view("products", FAILURE, fetch(api, opts)).await
}

impl fmt::Display for ProductsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::heading(f, "Products")?;
        render::cards(f, &self.stats)?;
        writeln!(f)?;

        writeln!(f, "{}", self.title())?;
        if self.rows.is_empty() {
            return writeln!(f, "  No products found");
        }
        let rows: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|r| {
                let stock = match r.badge {
                    BadgeVariant::Destructive => format!("{} !", r.stock),
                    _ => r.stock.clone(),
                };
                vec![
                    r.name.clone(),
                    r.brand.clone(),
                    r.cpu.clone(),
                    r.gpu.clone(),
                    r.price.clone(),
                    stock,
                    r.margin.clone(),
                ]
            })
            .collect();
        write!(
            f,
            "{}",
            render::table(
                &["Product Name", "Brand", "CPU", "GPU", "Price", "Stock", "Margin"],
                &rows
            )
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use megapc_client::FakeApi;

    fn laptop(name: &str, brand: &str, stock: u32) -> Product {
        Product {
            name: name.into(),
            brand: brand.into(),
            gpu: "RTX 4060".into(),
            price: 3899.0,
            stock_quantity: stock,
            profit_margin: 18.0,
            ..Product::default()
        }
    }

    fn seeded() -> FakeApi {
        let mut api = FakeApi::new();
        api.products = vec![
            laptop("Katana 15", "MSI", 3),
            laptop("Legion 5", "Lenovo", 25),
            laptop("Vivobook 16", "ASUS", 0),
            laptop("Nitro V", "Acer", 10),
        ];
        api.product_stats = ProductStats {
            total_products: 4,
            total_brands: 4,
            low_stock_count: 2,
            ..ProductStats::default()
        };
        api
    }

    fn opts(search: Option<&str>) -> ProductsOptions {
        ProductsOptions {
            search: search.map(String::from),
            low_stock: false,
            low_stock_threshold: 10,
        }
    }

    #[tokio::test]
    async fn test_lists_all_products() {
        let api = seeded();
        let view = fetch(&api, &opts(None)).await.unwrap();

        assert_eq!(view.source, ProductSource::All);
        assert_eq!(view.rows.len(), 4);
        assert_eq!(view.rows[0].price, "3,899 DT");
        assert_eq!(view.rows[0].stock, "3 units");
        assert_eq!(view.rows[0].margin, "18.00%");
        assert_eq!(view.stats[0].value, "4");

        let calls = api.calls().await;
        assert!(calls.contains(&"/products".to_string()));
        assert!(calls.contains(&"/products/stats".to_string()));
    }

    #[tokio::test]
    async fn test_badge_variants() {
        let api = seeded();
        let view = fetch(&api, &opts(None)).await.unwrap();
        let badges: Vec<BadgeVariant> = view.rows.iter().map(|r| r.badge).collect();
        assert_eq!(
            badges,
            vec![
                BadgeVariant::Secondary,
                BadgeVariant::Default,
                BadgeVariant::Destructive,
                BadgeVariant::Default,
            ]
        );
    }

    #[tokio::test]
    async fn test_search_uses_server_endpoint() {
        let api = seeded();
        let view = fetch(&api, &opts(Some("  legion "))).await.unwrap();

        assert_eq!(view.source, ProductSource::Search("legion".into()));
        assert_eq!(view.rows.len(), 1);
        assert!(api
            .calls()
            .await
            .contains(&"/products/search?q=legion".to_string()));
        assert!(view.to_string().contains("Search results for \"legion\""));
    }

    #[tokio::test]
    async fn test_blank_search_reloads_all() {
        let api = seeded();
        let view = fetch(&api, &opts(Some("   "))).await.unwrap();

        assert_eq!(view.source, ProductSource::All);
        assert_eq!(view.rows.len(), 4);
        assert!(!api.calls().await.iter().any(|c| c.starts_with("/products/search")));
    }

    #[tokio::test]
    async fn test_low_stock_list() {
        let api = seeded();
        let o = ProductsOptions {
            low_stock: true,
            ..opts(None)
        };
        let view = fetch(&api, &o).await.unwrap();

        let names: Vec<&str> = view.rows.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Katana 15", "Vivobook 16", "Nitro V"]);
        assert!(api
            .calls()
            .await
            .contains(&"/products/low-stock?threshold=10".to_string()));
    }

    #[tokio::test]
    async fn test_failure_message() {
        let api = seeded();
        api.fail_on("/products/stats").await;
        assert_eq!(
            load(&api, &opts(None)).await,
            LoadState::Failed(FAILURE.to_string())
        );
    }
}
