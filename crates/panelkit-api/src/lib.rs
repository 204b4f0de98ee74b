//! # panelkit-api
//!
//! HTTP API layer for PanelKit built on Axum.
//!
//! Provides all REST endpoints, the bearer-token extractors for both
//! principal domains, request DTOs with validation, the request-id
//! middleware, and the `AppError` to HTTP mapping.

pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::ApiError;
pub use router::build_router;
pub use state::AppState;
