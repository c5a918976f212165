//! # megapc-core: Pure Logic for the MegaPC Console
//!
//! Everything the console computes on its own, with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       MegaPC Console Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    megapc (apps/console)                        │   │
//! │  │   dashboard ─ analytics ─ catalogue ─ products ─ sales ─ ...    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ &dyn ConsoleApi                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    megapc-client                                │   │
//! │  │        HttpApi (reqwest) · config · view slots · FakeApi        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ records                                │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ megapc-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐ ┌───────────┐ ┌───────────┐ ┌───────────┐      │   │
//! │  │   │   types   │ │ catalogue │ │ analytics │ │   chart   │      │   │
//! │  │   │  Product  │ │  apply()  │ │  shape_*  │ │ ChartSpec │      │   │
//! │  │   │   Sale    │ │ SortKey   │ │ find_peak │ │  presets  │      │   │
//! │  │   └───────────┘ └───────────┘ └───────────┘ └───────────┘      │   │
//! │  │   ┌───────────┐ ┌───────────┐                                  │   │
//! │  │   │   money   │ │validation │                                  │   │
//! │  │   └───────────┘ └───────────┘                                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO NETWORK • PURE FUNCTIONS                          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Wire records (Product, Sale, analytics rows, dashboard)
//! - [`catalogue`] - Search, facet filters and sorting of products
//! - [`analytics`] - Projection of aggregates into chart rows
//! - [`chart`] - Declarative chart descriptions and presets
//! - [`money`] - Dinar rounding and labels
//! - [`validation`] - Query parameter checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input, same output; inputs are only borrowed
//! 2. **No I/O**: network, file system and logging setup live elsewhere
//! 3. **Total**: empty or partial input yields empty or zero output, never a panic
//!
//! ## Example Usage
//!
//! ```rust
//! use megapc_core::{apply, FilterCriteria, Product, SortKey};
//!
//! let products = vec![
//!     Product { name: "Alpha".into(), price: 100.0, ..Product::default() },
//!     Product { name: "Beta".into(), price: 50.0, ..Product::default() },
//! ];
//! let criteria = FilterCriteria {
//!     search: "alpha".into(),
//!     sort: SortKey::PriceAsc,
//!     ..FilterCriteria::default()
//! };
//!
//! let view = apply(&products, &criteria);
//! assert_eq!(view.len(), 1);
//! assert_eq!(view[0].name, "Alpha");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod analytics;
pub mod catalogue;
pub mod chart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use analytics::{
    compute_average_margin, find_peak, shape_brand_performance, shape_daily_trend,
    shape_top_products, BrandSlice, DailyTrendPoint, TopProductRow,
};
pub use catalogue::{apply, facet_options, CatalogueSummary, Facet, FacetFilter, FilterCriteria, SortKey};
pub use error::{ValidationError, ValidationResult};
pub use money::Dinars;
pub use types::*;
