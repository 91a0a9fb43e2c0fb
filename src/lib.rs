//! imptrack - Impersonation Profile Dashboard (TUI Edition)
//!
//! Core library providing the profile record model, the client-side
//! filter/sort/paginate/aggregate pipeline, and the terminal dashboard.

pub mod config;
pub mod core;
pub mod tui;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
