//! # MegaPC Console
//!
//! The `megapc` operator console: one subcommand per page of the retail
//! back office.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         megapc (main.rs, clap)                          │
//! │                                                                         │
//! │   dashboard  analytics  catalogue  products  sales  settings            │
//! │       │          │          │          │        │       │               │
//! │       └──────────┴────┬─────┴──────────┴────────┘       │               │
//! │                       ▼                                 ▼               │
//! │              pages::* ::load(&dyn ConsoleApi)     ConsoleConfig::save   │
//! │                       │                                                 │
//! │         ViewSlot: begin ─► fetch ─► complete ─► LoadState<View>         │
//! │                       │                                                 │
//! │                       ▼                                                 │
//! │            render::output (text tables or --json)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every page receives its `ConsoleApi` from the caller. Tests hand in a
//! `FakeApi`; the binary builds one `HttpApi` from the loaded config.

pub mod error;
pub mod pages;
pub mod render;

pub use error::{ConsoleError, ConsoleResult, ErrorCode};
pub use render::{output, StatCard};
