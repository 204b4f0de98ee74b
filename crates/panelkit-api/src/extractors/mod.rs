//! Axum extractors: bearer-token principal contexts and validated JSON.

pub mod auth;
pub mod validation;

pub use auth::{AdminContext, ClientInfo, UserContext};
pub use validation::ValidatedJson;
