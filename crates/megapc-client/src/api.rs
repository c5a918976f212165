//! # REST API Client
//!
//! The console's only way to reach the backend.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         fetch(endpoint)                                 │
//! │                                                                         │
//! │  Endpoint::top_products(10)     validate params (no I/O on failure)     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  GET {base_url}/sales/top-products?limit=10                             │
//! │           │                                                             │
//! │           ├── transport error ─────────────┐                            │
//! │           ├── non-2xx status ──────────────┤                            │
//! │           ▼                                ▼                            │
//! │  { success, data, count? }         ClientError::FetchFailed             │
//! │           │                                ▲                            │
//! │           ├── body doesn't decode ─────────┤                            │
//! │           ├── success: false ──────────────┘                            │
//! │           ▼                                                             │
//! │         data                                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Pages only ever see `&dyn ConsoleApi`, so tests hand them a
//! `FakeApi` instead of [`HttpApi`].

use async_trait::async_trait;
use megapc_core::validation::{
    validate_daily_days, validate_recent_days, validate_sales_limit, validate_search_query,
    validate_top_limit,
};
use megapc_core::{
    DailyTrendDatum, DashboardData, HourlyDatum, MonthlyDatum, Product, ProductStats, Sale,
    SalesSummary, SegmentStats, TodaySales, TopProductRaw, WeeklyDatum,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, warn};

use crate::config::ApiSettings;
use crate::error::{ClientError, ClientResult};

// =============================================================================
// Response Envelope
// =============================================================================

/// Body of every API response.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse<T> {
    #[serde(default = "default_success")]
    pub success: bool,
    pub data: T,
    #[serde(default)]
    pub count: Option<usize>,
}

fn default_success() -> bool {
    true
}

/// Decodes a response body and unwraps its `data`.
pub fn decode_envelope<T: DeserializeOwned>(endpoint: &Endpoint, body: &[u8]) -> ClientResult<T> {
    let envelope: ApiResponse<T> = serde_json::from_slice(body)
        .map_err(|e| ClientError::fetch(endpoint.path, format!("invalid response body: {}", e)))?;

    if !envelope.success {
        return Err(ClientError::fetch(endpoint.path, "API reported success: false"));
    }

    Ok(envelope.data)
}

// =============================================================================
// Endpoints
// =============================================================================

/// A validated GET request: path below the base URL plus query pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: &'static str,
    pub query: Vec<(&'static str, String)>,
}

impl Endpoint {
    const fn bare(path: &'static str) -> Self {
        Endpoint {
            path,
            query: Vec::new(),
        }
    }

    fn with(path: &'static str, key: &'static str, value: impl ToString) -> Self {
        Endpoint {
            path,
            query: vec![(key, value.to_string())],
        }
    }

    pub fn dashboard() -> Self {
        Self::bare("/dashboard")
    }

    pub fn products() -> Self {
        Self::bare("/products")
    }

    pub fn search_products(query: &str) -> ClientResult<Self> {
        validate_search_query(query)?;
        Ok(Self::with("/products/search", "q", query))
    }

    pub fn product_stats() -> Self {
        Self::bare("/products/stats")
    }

    pub fn low_stock(threshold: u32) -> Self {
        Self::with("/products/low-stock", "threshold", threshold)
    }

    pub fn brands() -> Self {
        Self::bare("/products/brands")
    }

    /// `/sales`, optionally capped. No cap means every sale.
    pub fn sales(limit: Option<u32>) -> ClientResult<Self> {
        validate_sales_limit(limit)?;
        Ok(match limit {
            Some(limit) => Self::with("/sales", "limit", limit),
            None => Self::bare("/sales"),
        })
    }

    pub fn recent_sales(days: u32) -> ClientResult<Self> {
        validate_recent_days(days)?;
        Ok(Self::with("/sales/recent", "days", days))
    }

    pub fn sales_summary() -> Self {
        Self::bare("/sales/summary")
    }

    pub fn today_sales() -> Self {
        Self::bare("/sales/today")
    }

    pub fn top_products(limit: u32) -> ClientResult<Self> {
        validate_top_limit(limit)?;
        Ok(Self::with("/sales/top-products", "limit", limit))
    }

    pub fn daily_analytics(days: u32) -> ClientResult<Self> {
        validate_daily_days(days)?;
        Ok(Self::with("/analytics/daily", "days", days))
    }

    pub fn monthly_analytics() -> Self {
        Self::bare("/analytics/monthly")
    }

    pub fn weekly_analytics() -> Self {
        Self::bare("/analytics/weekly")
    }

    pub fn hourly_analytics() -> Self {
        Self::bare("/analytics/hourly")
    }

    pub fn brand_analytics() -> Self {
        Self::bare("/analytics/brands")
    }

    pub fn gpu_analytics() -> Self {
        Self::bare("/analytics/gpu")
    }

    pub fn cpu_analytics() -> Self {
        Self::bare("/analytics/cpu")
    }
}

/// Path plus encoded query, e.g. `/products/search?q=rtx+4060`.
impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)?;
        if !self.query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(self.query.iter().map(|(k, v)| (*k, v.as_str())))
                .finish();
            write!(f, "?{}", encoded)?;
        }
        Ok(())
    }
}

// =============================================================================
// Console API Trait
// =============================================================================

/// Everything the console pages read from the backend.
#[async_trait]
pub trait ConsoleApi: Send + Sync {
    async fn dashboard(&self) -> ClientResult<DashboardData>;

    async fn products(&self) -> ClientResult<Vec<Product>>;
    /// Server-side search; `query` must be non-blank.
    async fn search_products(&self, query: &str) -> ClientResult<Vec<Product>>;
    async fn product_stats(&self) -> ClientResult<ProductStats>;
    async fn low_stock(&self, threshold: u32) -> ClientResult<Vec<Product>>;
    async fn brands(&self) -> ClientResult<Vec<String>>;

    async fn sales(&self, limit: Option<u32>) -> ClientResult<Vec<Sale>>;
    async fn recent_sales(&self, days: u32) -> ClientResult<Vec<Sale>>;
    async fn sales_summary(&self) -> ClientResult<SalesSummary>;
    async fn today_sales(&self) -> ClientResult<TodaySales>;
    async fn top_products(&self, limit: u32) -> ClientResult<Vec<TopProductRaw>>;

    async fn daily_analytics(&self, days: u32) -> ClientResult<Vec<DailyTrendDatum>>;
    async fn monthly_analytics(&self) -> ClientResult<Vec<MonthlyDatum>>;
    async fn weekly_analytics(&self) -> ClientResult<Vec<WeeklyDatum>>;
    async fn hourly_analytics(&self) -> ClientResult<Vec<HourlyDatum>>;
    async fn brand_analytics(&self) -> ClientResult<Vec<SegmentStats>>;
    async fn gpu_analytics(&self) -> ClientResult<Vec<SegmentStats>>;
    async fn cpu_analytics(&self) -> ClientResult<Vec<SegmentStats>>;
}

// =============================================================================
// HTTP Implementation
// =============================================================================

/// [`ConsoleApi`] over HTTP.
///
/// Constructed once at startup from [`ApiSettings`] and passed by reference
/// to every page.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(settings: &ApiSettings) -> ClientResult<Self> {
        settings.parsed_base_url()?;
        let client = reqwest::Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|e| ClientError::InvalidConfig(format!("HTTP client: {}", e)))?;

        Ok(HttpApi {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL: base URL and endpoint concatenated.
    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Issues one GET and returns the envelope's `data`. Never retries.
    async fn fetch<T: DeserializeOwned>(&self, endpoint: Endpoint) -> ClientResult<T> {
        let start = Instant::now();
        let url = self.url_for(&endpoint);
        debug!(url = %url, "GET");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClientError::fetch(endpoint.path, e))?;

        let status = response.status();
        if !status.is_success() {
            warn!(endpoint = endpoint.path, status = %status, "API returned an error status");
            return Err(ClientError::fetch(endpoint.path, format!("HTTP {}", status)));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::fetch(endpoint.path, format!("read body failed: {}", e)))?;
        let data = decode_envelope(&endpoint, &body)?;

        debug!(
            endpoint = endpoint.path,
            elapsed_ms = start.elapsed().as_millis() as u64,
            bytes = body.len(),
            "Fetched"
        );
        Ok(data)
    }
}

#[async_trait]
impl ConsoleApi for HttpApi {
    async fn dashboard(&self) -> ClientResult<DashboardData> {
        self.fetch(Endpoint::dashboard()).await
    }

    async fn products(&self) -> ClientResult<Vec<Product>> {
        self.fetch(Endpoint::products()).await
    }

    async fn search_products(&self, query: &str) -> ClientResult<Vec<Product>> {
        self.fetch(Endpoint::search_products(query)?).await
    }

    async fn product_stats(&self) -> ClientResult<ProductStats> {
        self.fetch(Endpoint::product_stats()).await
    }

    async fn low_stock(&self, threshold: u32) -> ClientResult<Vec<Product>> {
        self.fetch(Endpoint::low_stock(threshold)).await
    }

    async fn brands(&self) -> ClientResult<Vec<String>> {
        self.fetch(Endpoint::brands()).await
    }

    async fn sales(&self, limit: Option<u32>) -> ClientResult<Vec<Sale>> {
        self.fetch(Endpoint::sales(limit)?).await
    }

    async fn recent_sales(&self, days: u32) -> ClientResult<Vec<Sale>> {
        self.fetch(Endpoint::recent_sales(days)?).await
    }

    async fn sales_summary(&self) -> ClientResult<SalesSummary> {
        self.fetch(Endpoint::sales_summary()).await
    }

    async fn today_sales(&self) -> ClientResult<TodaySales> {
        self.fetch(Endpoint::today_sales()).await
    }

    async fn top_products(&self, limit: u32) -> ClientResult<Vec<TopProductRaw>> {
        self.fetch(Endpoint::top_products(limit)?).await
    }

    async fn daily_analytics(&self, days: u32) -> ClientResult<Vec<DailyTrendDatum>> {
        self.fetch(Endpoint::daily_analytics(days)?).await
    }

    async fn monthly_analytics(&self) -> ClientResult<Vec<MonthlyDatum>> {
        self.fetch(Endpoint::monthly_analytics()).await
    }

    async fn weekly_analytics(&self) -> ClientResult<Vec<WeeklyDatum>> {
        self.fetch(Endpoint::weekly_analytics()).await
    }

    async fn hourly_analytics(&self) -> ClientResult<Vec<HourlyDatum>> {
        self.fetch(Endpoint::hourly_analytics()).await
    }

    async fn brand_analytics(&self) -> ClientResult<Vec<SegmentStats>> {
        self.fetch(Endpoint::brand_analytics()).await
    }

    async fn gpu_analytics(&self) -> ClientResult<Vec<SegmentStats>> {
        self.fetch(Endpoint::gpu_analytics()).await
    }

    async fn cpu_analytics(&self) -> ClientResult<Vec<SegmentStats>> {
        self.fetch(Endpoint::cpu_analytics()).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
