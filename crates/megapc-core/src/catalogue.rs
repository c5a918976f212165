//! # Catalogue Filter Engine
//!
//! Client-side search, facet filtering and sorting of the product list.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    apply(products, criteria)                            │
//! │                                                                         │
//! │  products ──► 1. search ──► 2. brand ──► 3. gpu ──► 4. sort ──► view   │
//! │                  │            │             │           │               │
//! │                  │            │             │           └─ stable       │
//! │                  │            │             └─ exact match unless "all" │
//! │                  │            └─ exact match unless "all"               │
//! │                  └─ lower-cased substring of name|brand|cpu|gpu        │
//! │                                                                         │
//! │  The input slice is never mutated; the result is a fresh Vec.          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use megapc_core::catalogue::{apply, FilterCriteria, SortKey};
//! use megapc_core::Product;
//!
//! let products = vec![
//!     Product { name: "Alpha".into(), price: 100.0, ..Product::default() },
//!     Product { name: "Beta".into(), price: 50.0, ..Product::default() },
//! ];
//! let criteria = FilterCriteria { sort: SortKey::PriceAsc, ..FilterCriteria::default() };
//!
//! let view = apply(&products, &criteria);
//! assert_eq!(view[0].name, "Beta");
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::types::Product;

/// Facet value that disables a brand/GPU filter.
pub const ALL_SENTINEL: &str = "all";

// =============================================================================
// Sort Key
// =============================================================================

/// Ordering applied as the last stage of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SortKey {
    /// Ascending by name, locale-aware.
    #[default]
    Name,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Largest stock first.
    Stock,
    /// Highest profit margin first.
    Margin,
    /// A key the console doesn't know; the previous stage's order is kept.
    Unrecognized(String),
}

impl SortKey {
    /// All keys offered in the sort selector, in display order.
    pub const SELECTABLE: [SortKey; 5] = [
        SortKey::Name,
        SortKey::PriceAsc,
        SortKey::PriceDesc,
        SortKey::Stock,
        SortKey::Margin,
    ];

    /// Wire label, e.g. `"price-asc"`.
    pub fn as_str(&self) -> &str {
        match self {
            SortKey::Name => "name",
            SortKey::PriceAsc => "price-asc",
            SortKey::PriceDesc => "price-desc",
            SortKey::Stock => "stock",
            SortKey::Margin => "margin",
            SortKey::Unrecognized(raw) => raw,
        }
    }

    /// Label shown in the sort selector.
    pub fn display_label(&self) -> &str {
        match self {
            SortKey::Name => "Name (A-Z)",
            SortKey::PriceAsc => "Price (Low to High)",
            SortKey::PriceDesc => "Price (High to Low)",
            SortKey::Stock => "Stock Quantity",
            SortKey::Margin => "Profit Margin",
            SortKey::Unrecognized(raw) => raw,
        }
    }

    /// Compares two products under this key, or `None` when the key leaves
    /// the order untouched.
    fn compare(&self, a: &Product, b: &Product) -> Option<Ordering> {
        match self {
            SortKey::Name => Some(locale_compare(&a.name, &b.name)),
            SortKey::PriceAsc => Some(a.price.total_cmp(&b.price)),
            SortKey::PriceDesc => Some(b.price.total_cmp(&a.price)),
            SortKey::Stock => Some(b.stock_quantity.cmp(&a.stock_quantity)),
            SortKey::Margin => Some(b.profit_margin.total_cmp(&a.profit_margin)),
            SortKey::Unrecognized(_) => None,
        }
    }
}

impl FromStr for SortKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "name" => SortKey::Name,
            "price-asc" => SortKey::PriceAsc,
            "price-desc" => SortKey::PriceDesc,
            "stock" => SortKey::Stock,
            "margin" => SortKey::Margin,
            other => SortKey::Unrecognized(other.to_string()),
        })
    }
}

impl From<String> for SortKey {
    fn from(s: String) -> Self {
        match s.parse() {
            Ok(key) => key,
            Err(never) => match never {},
        }
    }
}

impl From<SortKey> for String {
    fn from(key: SortKey) -> Self {
        key.as_str().to_string()
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// =============================================================================
// Facet Filter
// =============================================================================

/// Brand or GPU selector: either everything or one exact value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FacetFilter {
    #[default]
    All,
    /// Keep only products whose field equals this value (case-sensitive).
    Only(String),
}

impl FacetFilter {
    fn admits(&self, value: &str) -> bool {
        match self {
            FacetFilter::All => true,
            FacetFilter::Only(wanted) => wanted == value,
        }
    }

    /// Returns true when the filter is inactive.
    pub fn is_all(&self) -> bool {
        matches!(self, FacetFilter::All)
    }
}

impl From<&str> for FacetFilter {
    fn from(s: &str) -> Self {
        if s == ALL_SENTINEL {
            FacetFilter::All
        } else {
            FacetFilter::Only(s.to_string())
        }
    }
}

impl From<String> for FacetFilter {
    fn from(s: String) -> Self {
        FacetFilter::from(s.as_str())
    }
}

impl From<Option<String>> for FacetFilter {
    fn from(value: Option<String>) -> Self {
        value.map(FacetFilter::from).unwrap_or_default()
    }
}

impl From<FacetFilter> for String {
    fn from(filter: FacetFilter) -> Self {
        match filter {
            FacetFilter::All => ALL_SENTINEL.to_string(),
            FacetFilter::Only(value) => value,
        }
    }
}

/// Which product field a facet list is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Facet {
    Brand,
    Gpu,
}

impl Facet {
    fn value_of(self, product: &Product) -> &str {
        match self {
            Facet::Brand => &product.brand,
            Facet::Gpu => &product.gpu,
        }
    }
}

// =============================================================================
// Filter Criteria
// =============================================================================

/// Everything the catalogue page lets the operator choose.
///
/// All combinations are valid; the default applies no filter and sorts by
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Free text; empty disables the search stage. Not trimmed.
    pub search: String,
    pub brand: FacetFilter,
    pub gpu: FacetFilter,
    pub sort: SortKey,
}

impl FilterCriteria {
    fn matches_search(&self, needle: &str, product: &Product) -> bool {
        [&product.name, &product.brand, &product.cpu, &product.gpu]
            .iter()
            .any(|field| field.to_lowercase().contains(needle))
    }
}

// =============================================================================
// Engine
// =============================================================================

/// Runs the search → brand → GPU → sort pipeline over `products`.
///
/// Pure: the input is borrowed, the output owns clones of the kept
/// products. Ties under the sort key keep their input order.
pub fn apply(products: &[Product], criteria: &FilterCriteria) -> Vec<Product> {
    let needle = criteria.search.to_lowercase();

    let mut view: Vec<Product> = products
        .iter()
        .filter(|p| needle.is_empty() || criteria.matches_search(&needle, p))
        .filter(|p| criteria.brand.admits(&p.brand))
        .filter(|p| criteria.gpu.admits(&p.gpu))
        .cloned()
        .collect();

    // `sort_by` is stable; an unrecognized key skips the stage entirely.
    if !matches!(criteria.sort, SortKey::Unrecognized(_)) {
        view.sort_by(|a, b| criteria.sort.compare(a, b).unwrap_or(Ordering::Equal));
    }

    view
}

/// Distinct values of `facet` in first-appearance order, for the brand and
/// GPU selectors.
pub fn facet_options(products: &[Product], facet: Facet) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    products
        .iter()
        .map(|p| facet.value_of(p))
        .filter(|value| seen.insert(*value))
        .map(str::to_string)
        .collect()
}

/// Name ordering close to a browser's default `localeCompare`.
///
/// ## Comparison Levels
/// ```text
/// 1. base letters   accents stripped, case folded   "Écran" ~ "ecran"
/// 2. accents        unaccented first                "resume" < "résumé"
/// 3. case           lower case first                "ideapad" < "IdeaPad"
/// ```
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| with_accents(a).cmp(with_accents(b)))
        .then_with(|| case_order(a, b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn with_accents(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd().flat_map(char::to_lowercase)
}

fn case_order(a: &str, b: &str) -> Ordering {
    a.chars()
        .zip(b.chars())
        .map(|(x, y)| match (x.is_lowercase(), y.is_lowercase()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => x.cmp(&y),
        })
        .find(|o| o.is_ne())
        .unwrap_or_else(|| a.len().cmp(&b.len()))
}

// =============================================================================
// Summary
// =============================================================================

/// Result line under the filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogueSummary {
    pub found: usize,
    pub total: usize,
}

impl CatalogueSummary {
    pub fn new(found: usize, total: usize) -> Self {
        CatalogueSummary { found, total }
    }

    /// `"N products found"`, or the empty-state message.
    pub fn message(&self) -> String {
        if self.found == 0 {
            "No products found matching your criteria".to_string()
        } else {
            format!("{} products found", self.found)
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(name: &str, brand: &str, price: f64, stock: u32, margin: f64) -> Product {
        Product {
            name: name.to_string(),
            brand: brand.to_string(),
            price,
            price_with_tva: price * 1.19,
            stock_quantity: stock,
            profit_margin: margin,
            ..Product::default()
        }
    }

    fn with_specs(mut p: Product, cpu: &str, gpu: &str) -> Product {
        p.cpu = cpu.to_string();
        p.gpu = gpu.to_string();
        p
    }

    fn names(view: &[Product]) -> Vec<&str> {
        view.iter().map(|p| p.name.as_str()).collect()
    }

    fn alpha_beta() -> Vec<Product> {
        vec![
            product("Alpha", "X", 100.0, 5, 10.0),
            product("Beta", "Y", 50.0, 0, 20.0),
        ]
    }

    #[test]
    fn test_price_asc_scenario() {
        let criteria = FilterCriteria {
            search: String::new(),
            brand: FacetFilter::from("all"),
            gpu: FacetFilter::from("all"),
            sort: SortKey::PriceAsc,
        };
        let view = apply(&alpha_beta(), &criteria);
        assert_eq!(names(&view), vec!["Beta", "Alpha"]);
    }

    #[test]
    fn test_case_insensitive_search_scenario() {
        let criteria = FilterCriteria {
            search: "alpha".to_string(),
            sort: SortKey::PriceAsc,
            ..FilterCriteria::default()
        };
        let view = apply(&alpha_beta(), &criteria);
        assert_eq!(names(&view), vec!["Alpha"]);
    }

    #[test]
    fn test_search_spans_brand_cpu_gpu() {
        let products = vec![
            with_specs(product("Vivobook", "ASUS", 1.0, 1, 1.0), "Ryzen 5", "Radeon"),
            with_specs(product("Legion", "Lenovo", 1.0, 1, 1.0), "Core i7", "RTX 4070"),
            with_specs(product("Katana", "MSI", 1.0, 1, 1.0), "Core i5", "RTX 3050"),
        ];
        let search = |term: &str| {
            let criteria = FilterCriteria {
                search: term.to_string(),
                ..FilterCriteria::default()
            };
            apply(&products, &criteria)
                .into_iter()
                .map(|p| p.name)
                .collect::<Vec<_>>()
        };

        assert_eq!(search("asus"), vec!["Vivobook"]);
        assert_eq!(search("CORE"), vec!["Katana", "Legion"]);
        assert_eq!(search("rtx"), vec!["Katana", "Legion"]);
        assert!(search("quadro").is_empty());
    }

    #[test]
    fn test_whitespace_search_is_not_trimmed() {
        let criteria = FilterCriteria {
            search: "   ".to_string(),
            ..FilterCriteria::default()
        };
        assert!(apply(&alpha_beta(), &criteria).is_empty());
    }

    #[test]
    fn test_brand_and_gpu_filters_are_exact() {
        let products = vec![
            with_specs(product("A", "ASUS", 1.0, 1, 1.0), "i5", "RTX 3050"),
            with_specs(product("B", "asus", 1.0, 1, 1.0), "i5", "RTX 3050"),
            with_specs(product("C", "ASUS", 1.0, 1, 1.0), "i5", "RTX 4060"),
        ];

        let by_brand = FilterCriteria {
            brand: FacetFilter::from("ASUS"),
            ..FilterCriteria::default()
        };
        assert_eq!(names(&apply(&products, &by_brand)), vec!["A", "C"]);

        let by_both = FilterCriteria {
            brand: FacetFilter::from("ASUS"),
            gpu: FacetFilter::from("RTX 3050"),
            ..FilterCriteria::default()
        };
        assert_eq!(names(&apply(&products, &by_both)), vec!["A"]);
    }

    #[test]
    fn test_margin_sort_descending() {
        let products = vec![
            product("five", "X", 1.0, 1, 5.0),
            product("twenty", "X", 1.0, 1, 20.0),
            product("ten", "X", 1.0, 1, 10.0),
        ];
        let criteria = FilterCriteria {
            sort: SortKey::Margin,
            ..FilterCriteria::default()
        };
        let margins: Vec<f64> = apply(&products, &criteria)
            .iter()
            .map(|p| p.profit_margin)
            .collect();
        assert_eq!(margins, vec![20.0, 10.0, 5.0]);
    }

    #[test]
    fn test_margin_sort_is_stable() {
        let products = vec![
            product("first-ten", "X", 1.0, 1, 10.0),
            product("second-ten", "X", 1.0, 1, 10.0),
            product("five", "X", 1.0, 1, 5.0),
        ];
        let criteria = FilterCriteria {
            sort: SortKey::Margin,
            ..FilterCriteria::default()
        };
        assert_eq!(
            names(&apply(&products, &criteria)),
            vec!["first-ten", "second-ten", "five"]
        );
    }

    #[test]
    fn test_every_key_is_stable_on_ties() {
        // Every product shares the same name, price, stock and margin, so
        // each key must return the input order unchanged.
        let products: Vec<Product> = (0..6)
            .map(|i| {
                let mut p = product("Same", "X", 10.0, 3, 7.5);
                p.model = format!("m{}", i);
                p
            })
            .collect();

        for key in SortKey::SELECTABLE {
            let criteria = FilterCriteria {
                sort: key.clone(),
                ..FilterCriteria::default()
            };
            let models: Vec<String> = apply(&products, &criteria)
                .into_iter()
                .map(|p| p.model)
                .collect();
            assert_eq!(models, vec!["m0", "m1", "m2", "m3", "m4", "m5"], "key {}", key);
        }
    }

    #[test]
    fn test_stock_and_price_desc() {
        let products = vec![
            product("a", "X", 300.0, 1, 0.0),
            product("b", "X", 100.0, 9, 0.0),
            product("c", "X", 200.0, 4, 0.0),
        ];
        let stock = FilterCriteria {
            sort: SortKey::Stock,
            ..FilterCriteria::default()
        };
        assert_eq!(names(&apply(&products, &stock)), vec!["b", "c", "a"]);

        let price_desc = FilterCriteria {
            sort: SortKey::PriceDesc,
            ..FilterCriteria::default()
        };
        assert_eq!(names(&apply(&products, &price_desc)), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_name_sort_is_case_insensitive() {
        let products = vec![
            product("zenbook", "X", 1.0, 1, 1.0),
            product("Aspire", "X", 1.0, 1, 1.0),
            product("ideapad", "X", 1.0, 1, 1.0),
            product("IdeaPad Gaming", "X", 1.0, 1, 1.0),
        ];
        let view = apply(&products, &FilterCriteria::default());
        assert_eq!(
            names(&view),
            vec!["Aspire", "ideapad", "IdeaPad Gaming", "zenbook"]
        );
    }

    #[test]
    fn test_name_sort_ignores_accents() {
        let products = vec![
            product("Zenbook", "X", 1.0, 1, 1.0),
            product("Écran Pro", "X", 1.0, 1, 1.0),
            product("Fox", "X", 1.0, 1, 1.0),
            product("écran", "X", 1.0, 1, 1.0),
            product("ecran", "X", 1.0, 1, 1.0),
        ];
        let view = apply(&products, &FilterCriteria::default());
        assert_eq!(
            names(&view),
            vec!["ecran", "écran", "Écran Pro", "Fox", "Zenbook"]
        );
        assert_eq!(locale_compare("résumé", "resume"), Ordering::Greater);
        assert_eq!(locale_compare("Ärger", "Zebra"), Ordering::Less);
    }

    #[test]
    fn test_unknown_sort_key_keeps_order() {
        let products = vec![
            product("c", "X", 3.0, 1, 1.0),
            product("a", "X", 1.0, 1, 1.0),
            product("b", "X", 2.0, 1, 1.0),
        ];
        let criteria = FilterCriteria {
            sort: "popularity".parse().unwrap(),
            ..FilterCriteria::default()
        };
        assert_eq!(criteria.sort, SortKey::Unrecognized("popularity".into()));
        assert_eq!(names(&apply(&products, &criteria)), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_empty_collection() {
        let criteria = FilterCriteria {
            search: "anything".to_string(),
            sort: SortKey::Margin,
            ..FilterCriteria::default()
        };
        assert!(apply(&[], &criteria).is_empty());
    }

    #[test]
    fn test_subset_and_idempotence() {
        let products = vec![
            with_specs(product("Nitro 5", "Acer", 2100.0, 3, 14.0), "i5", "RTX 3050"),
            with_specs(product("Predator", "Acer", 4200.0, 0, 22.0), "i9", "RTX 4080"),
            with_specs(product("ROG Strix", "ASUS", 3900.0, 12, 22.0), "Ryzen 9", "RTX 4070"),
            with_specs(product("Aspire 3", "Acer", 1100.0, 30, 9.0), "i3", "Intel UHD"),
        ];
        let criteria = FilterCriteria {
            search: "r".to_string(),
            brand: FacetFilter::from("Acer"),
            gpu: FacetFilter::All,
            sort: SortKey::Margin,
        };

        let once = apply(&products, &criteria);
        assert!(once.iter().all(|p| products.contains(p)));
        let mut unique = names(&once);
        unique.dedup();
        assert_eq!(unique.len(), once.len());

        let twice = apply(&once, &criteria);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_input_is_not_mutated() {
        let products = alpha_beta();
        let before = products.clone();
        let _ = apply(
            &products,
            &FilterCriteria {
                sort: SortKey::PriceAsc,
                ..FilterCriteria::default()
            },
        );
        assert_eq!(products, before);
    }

    #[test]
    fn test_facet_options_first_appearance() {
        let products = vec![
            with_specs(product("1", "MSI", 1.0, 1, 1.0), "", "RTX 4060"),
            with_specs(product("2", "ASUS", 1.0, 1, 1.0), "", "RTX 3050"),
            with_specs(product("3", "MSI", 1.0, 1, 1.0), "", "RTX 4060"),
        ];
        assert_eq!(facet_options(&products, Facet::Brand), vec!["MSI", "ASUS"]);
        assert_eq!(facet_options(&products, Facet::Gpu), vec!["RTX 4060", "RTX 3050"]);
    }

    #[test]
    fn test_sort_key_round_trips_labels() {
        for key in SortKey::SELECTABLE {
            let parsed: SortKey = key.as_str().parse().unwrap();
            assert_eq!(parsed, key);
        }
        assert_eq!(SortKey::PriceDesc.display_label(), "Price (High to Low)");
    }

    #[test]
    fn test_criteria_from_json() {
        let criteria: FilterCriteria =
            serde_json::from_str(r#"{"search": "rtx", "brand": "all", "gpu": "RTX 4060", "sort": "stock"}"#)
                .unwrap();
        assert!(criteria.brand.is_all());
        assert_eq!(criteria.gpu, FacetFilter::Only("RTX 4060".into()));
        assert_eq!(criteria.sort, SortKey::Stock);

        let defaults: FilterCriteria = serde_json::from_str("{}").unwrap();
        assert_eq!(defaults, FilterCriteria::default());
    }

    #[test]
    fn test_summary_message() {
        assert_eq!(CatalogueSummary::new(3, 10).message(), "3 products found");
        assert_eq!(
            CatalogueSummary::new(0, 10).message(),
            "No products found matching your criteria"
        );
    }
}
