//! # Catalogue
//!
//! Fetches the full product list once, then filters and sorts it locally
//! with the catalogue engine.
//!
//! ## Flow
//! ```text
//! /products ──► apply(products, criteria) ──► ProductCard per match
//!     │
//!     └──► facet_options(Brand | Gpu) ──► select lists
//! ```

use megapc_client::{ConsoleApi, LoadState};
use megapc_core::money::format_percent;
use megapc_core::{
    apply, facet_options, CatalogueSummary, Facet, FilterCriteria, Product, StockLevel,
};
use serde::Serialize;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info};

use super::load_view;
use crate::error::ConsoleResult;
use crate::render;

pub const FAILURE: &str = "Failed to load products";

#[derive(Debug, Clone, Default)]
pub struct CatalogueOptions {
    pub criteria: FilterCriteria,
    pub low_stock_threshold: u32,
}

/// One product as the catalogue grid shows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductCard {
    pub name: String,
    pub brand: String,
    pub cpu: String,
    pub gpu: String,
    pub ram: String,
    pub storage: String,
    pub price_ht: String,
    pub price_ttc: String,
    pub margin: String,
    pub stock_level: StockLevel,
    /// "Out of Stock" or "Low Stock: n"; nothing when well stocked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
    pub available: bool,
}

impl ProductCard {
    pub fn new(product: &Product, low_stock_threshold: u32) -> Self {
        let stock_level = product.stock_level(low_stock_threshold);
        let badge = match stock_level {
            StockLevel::OutOfStock => Some("Out of Stock".to_string()),
            StockLevel::Low => Some(format!("Low Stock: {}", product.stock_quantity)),
            StockLevel::InStock => None,
        };

        ProductCard {
            name: product.name.clone(),
            brand: product.brand.clone(),
            cpu: product.cpu.clone(),
            gpu: product.gpu.clone(),
            ram: product.ram.clone(),
            storage: product.storage.clone(),
            price_ht: product.price_ht().to_string(),
            price_ttc: product.price_ttc().to_string(),
            margin: format_percent(product.profit_margin),
            stock_level,
            badge,
            available: !product.is_out_of_stock(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogueView {
    pub criteria: FilterCriteria,
    pub brands: Vec<String>,
    pub gpus: Vec<String>,
    pub summary: CatalogueSummary,
    pub cards: Vec<ProductCard>,
}

pub fn build(products: &[Product], opts: &CatalogueOptions) -> CatalogueView {
    let matches = apply(products, &opts.criteria);
    CatalogueView {
        criteria: opts.criteria.clone(),
        brands: facet_options(products, Facet::Brand),
        gpus: facet_options(products, Facet::Gpu),
        summary: CatalogueSummary::new(matches.len(), products.len()),
        cards: matches
            .iter()
            .map(|p| ProductCard::new(p, opts.low_stock_threshold))
            .collect(),
    }
}

pub async fn fetch(api: &dyn ConsoleApi, opts: &CatalogueOptions) -> ConsoleResult<CatalogueView> {
    debug!(
        search = %opts.criteria.search,
        brand = ?opts.criteria.brand,
        gpu = ?opts.criteria.gpu,
        sort = %opts.criteria.sort,
        "catalogue page"
    );
    let start = Instant::now();

    let products = api.products().await?;
    let view = build(&products, opts);

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        total = view.summary.total,
        found = view.summary.found,
        "Catalogue filtered"
    );
    Ok(view)
}

pub async fn load(api: &dyn ConsoleApi, opts: &CatalogueOptions) -> LoadState<CatalogueView> {
    load_view("catalogue", FAILURE, fetch(api, opts)).await
}

impl fmt::Display for CatalogueView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        render::heading(f, "Catalogue")?;
        writeln!(f, "  Brands: {}", self.brands.join(", "))?;
        writeln!(f, "  GPUs:   {}", self.gpus.join(", "))?;
        writeln!(f, "  Sort:   {}", self.criteria.sort.display_label())?;
        writeln!(f)?;
        writeln!(f, "{}", self.summary.message())?;

        for card in &self.cards {
            writeln!(f)?;
            writeln!(f, "  {} {}", card.brand, card.name)?;
            writeln!(f, "    CPU: {}  GPU: {}", card.cpu, card.gpu)?;
            writeln!(f, "    RAM: {}  Storage: {}", card.ram, card.storage)?;
            writeln!(
                f,
                "    Price (HT): {}  Price (TTC): {}  Margin: {}",
                card.price_ht, card.price_ttc, card.margin
            )?;
            let action = if card.available { "Add to Cart" } else { "Unavailable" };
            match &card.badge {
                Some(badge) => writeln!(f, "    [{}] {}", badge, action)?,
                None => writeln!(f, "    {}", action)?,
            }
        }
        Ok(())
    }
}
