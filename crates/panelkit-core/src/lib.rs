//! # panelkit-core
//!
//! Shared foundation for the PanelKit admin-panel backend.
//!
//! ## Modules
//!
//! - `config` — TOML + environment configuration schemas
//! - `error` — unified `AppError` and error-kind taxonomy
//! - `result` — `AppResult<T>` alias used across all crates

pub mod config;
pub mod error;
pub mod result;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
