//! In-memory [`ConsoleApi`] for tests.
//!
//! Serves whatever records it was seeded with, validates parameters like
//! the real client, records every endpoint it was asked for and can be told
//! to fail specific paths.

use async_trait::async_trait;
use megapc_core::{
    DailyTrendDatum, DashboardData, HourlyDatum, MonthlyDatum, Product, ProductStats, Sale,
    SalesSummary, SegmentStats, TodaySales, TopProductRaw, WeeklyDatum,
};
use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::api::{ConsoleApi, Endpoint};
use crate::error::{ClientError, ClientResult};

#[derive(Default)]
pub struct FakeApi {
    pub dashboard: DashboardData,
    pub products: Vec<Product>,
    pub product_stats: ProductStats,
    pub sales: Vec<Sale>,
    pub sales_summary: SalesSummary,
    pub today_sales: TodaySales,
    pub top_products: Vec<TopProductRaw>,
    pub daily: Vec<DailyTrendDatum>,
    pub monthly: Vec<MonthlyDatum>,
    pub weekly: Vec<WeeklyDatum>,
    pub hourly: Vec<HourlyDatum>,
    pub brand_stats: Vec<SegmentStats>,
    pub gpu_stats: Vec<SegmentStats>,
    pub cpu_stats: Vec<SegmentStats>,
    /// Delay added to every call, to exercise concurrent fetches.
    pub latency: Duration,
    pub fetch_calls: AtomicU64,
    failing: Mutex<HashSet<&'static str>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every later request to `path` fail with `FetchFailed`.
    pub async fn fail_on(&self, path: &'static str) {
        self.failing.lock().await.insert(path);
    }

    /// Endpoints requested so far, in order, with their query strings.
    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    async fn serve<T>(&self, endpoint: Endpoint, data: impl FnOnce() -> T) -> ClientResult<T> {
        self.fetch_calls.fetch_add(1, Ordering::Relaxed);
        self.calls.lock().await.push(endpoint.to_string());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.failing.lock().await.contains(endpoint.path) {
            return Err(ClientError::fetch(endpoint.path, "HTTP 500 Internal Server Error"));
        }
        Ok(data())
    }
}

#[async_trait]
impl ConsoleApi for FakeApi {
    async fn dashboard(&self) -> ClientResult<DashboardData> {
        self.serve(Endpoint::dashboard(), || self.dashboard.clone()).await
    }

    async fn products(&self) -> ClientResult<Vec<Product>> {
        self.serve(Endpoint::products(), || self.products.clone()).await
    }

    async fn search_products(&self, query: &str) -> ClientResult<Vec<Product>> {
        let needle = query.to_lowercase();
        self.serve(Endpoint::search_products(query)?, || {
            self.products
                .iter()
                .filter(|p| {
                    [&p.name, &p.brand, &p.cpu, &p.gpu]
                        .iter()
                        .any(|f| f.to_lowercase().contains(&needle))
                })
                .cloned()
                .collect()
        })
        .await
    }

    async fn product_stats(&self) -> ClientResult<ProductStats> {
        self.serve(Endpoint::product_stats(), || self.product_stats.clone()).await
    }

    async fn low_stock(&self, threshold: u32) -> ClientResult<Vec<Product>> {
        self.serve(Endpoint::low_stock(threshold), || {
            self.products
                .iter()
                .filter(|p| p.stock_quantity <= threshold)
                .cloned()
                .collect()
        })
        .await
    }

    async fn brands(&self) -> ClientResult<Vec<String>> {
        self.serve(Endpoint::brands(), || {
            megapc_core::facet_options(&self.products, megapc_core::Facet::Brand)
        })
        .await
    }

    async fn sales(&self, limit: Option<u32>) -> ClientResult<Vec<Sale>> {
        self.serve(Endpoint::sales(limit)?, || {
            let take = limit.map_or(self.sales.len(), |l| l as usize);
            self.sales.iter().take(take).cloned().collect()
        })
        .await
    }

    /// Every seeded sale; the fake has no clock to cut off by.
    async fn recent_sales(&self, days: u32) -> ClientResult<Vec<Sale>> {
        self.serve(Endpoint::recent_sales(days)?, || self.sales.clone()).await
    }

    async fn sales_summary(&self) -> ClientResult<SalesSummary> {
        self.serve(Endpoint::sales_summary(), || self.sales_summary.clone()).await
    }

    async fn today_sales(&self) -> ClientResult<TodaySales> {
        self.serve(Endpoint::today_sales(), || self.today_sales.clone()).await
    }

    async fn top_products(&self, limit: u32) -> ClientResult<Vec<TopProductRaw>> {
        self.serve(Endpoint::top_products(limit)?, || {
            self.top_products.iter().take(limit as usize).cloned().collect()
        })
        .await
    }

    async fn daily_analytics(&self, days: u32) -> ClientResult<Vec<DailyTrendDatum>> {
        self.serve(Endpoint::daily_analytics(days)?, || self.daily.clone()).await
    }

    async fn monthly_analytics(&self) -> ClientResult<Vec<MonthlyDatum>> {
        self.serve(Endpoint::monthly_analytics(), || self.monthly.clone()).await
    }

    async fn weekly_analytics(&self) -> ClientResult<Vec<WeeklyDatum>> {
        self.serve(Endpoint::weekly_analytics(), || self.weekly.clone()).await
    }

    async fn hourly_analytics(&self) -> ClientResult<Vec<HourlyDatum>> {
        self.serve(Endpoint::hourly_analytics(), || self.hourly.clone()).await
    }

    async fn brand_analytics(&self) -> ClientResult<Vec<SegmentStats>> {
        self.serve(Endpoint::brand_analytics(), || self.brand_stats.clone()).await
    }

    async fn gpu_analytics(&self) -> ClientResult<Vec<SegmentStats>> {
        self.serve(Endpoint::gpu_analytics(), || self.gpu_stats.clone()).await
    }

    async fn cpu_analytics(&self) -> ClientResult<Vec<SegmentStats>> {
        self.serve(Endpoint::cpu_analytics(), || self.cpu_stats.clone()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laptop(name: &str, brand: &str, gpu: &str, stock: u32) -> Product {
        Product {
            name: name.to_string(),
            brand: brand.to_string(),
            gpu: gpu.to_string(),
            stock_quantity: stock,
            ..Product::default()
        }
    }

    fn seeded() -> FakeApi {
        FakeApi {
            products: vec![
                laptop("TUF Gaming F15", "ASUS", "RTX 4050", 12),
                laptop("Katana 15", "MSI", "RTX 4060", 3),
                laptop("Vivobook 16", "ASUS", "Intel Iris Xe", 0),
            ],
            ..FakeApi::default()
        }
    }

    #[tokio::test]
    async fn test_search_and_low_stock() {
        let api = seeded();
        let found = api.search_products("rtx").await.unwrap();
        assert_eq!(found.len(), 2);

        let low = api.low_stock(10).await.unwrap();
        let names: Vec<&str> = low.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Katana 15", "Vivobook 16"]);

        assert_eq!(api.brands().await.unwrap(), vec!["ASUS", "MSI"]);
    }

    #[tokio::test]
    async fn test_records_calls() {
        let api = seeded();
        api.products().await.unwrap();
        api.top_products(5).await.unwrap();
        assert_eq!(api.calls().await, vec!["/products", "/sales/top-products?limit=5"]);
        assert_eq!(api.fetch_calls.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn test_invalid_params_never_reach_the_fake() {
        let api = seeded();
        assert!(matches!(
            api.search_products("").await,
            Err(ClientError::Validation(_))
        ));
        assert!(api.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_fail_on() {
        let api = seeded();
        api.fail_on("/products").await;

        let err = api.products().await.unwrap_err();
        assert!(err.is_fetch_error());
        assert!(api.product_stats().await.is_ok());
    }
}
