//! # megapc-client: Talking to the MegaPC REST API
//!
//! Owns every network call, the config file and page load state.
//!
//! ## Modules
//!
//! - [`api`] - `ConsoleApi` trait, `HttpApi`, endpoints and the response envelope
//! - [`config`] - `ConsoleConfig` (TOML file + `MEGAPC_*` environment)
//! - [`view`] - `ViewSlot`/`LoadState`: latest request wins, unmount drops results
//! - `fake` - `FakeApi`, an in-memory `ConsoleApi` for tests (`fake` feature)
//! - [`error`] - `ClientError`
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use megapc_client::{ConsoleApi, ConsoleConfig, HttpApi};
//!
//! # async fn run() -> megapc_client::ClientResult<()> {
//! let config = ConsoleConfig::load(None)?;
//! let api = HttpApi::new(&config.api)?;
//!
//! let products = api.products().await?;
//! println!("{} products", products.len());
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod error;
#[cfg(any(test, feature = "fake"))]
pub mod fake;
pub mod view;

pub use api::{ApiResponse, ConsoleApi, Endpoint, HttpApi};
pub use config::ConsoleConfig;
pub use error::{ClientError, ClientResult};
#[cfg(any(test, feature = "fake"))]
pub use fake::FakeApi;
pub use view::{Delivery, LoadState, Ticket, ViewSlot};
