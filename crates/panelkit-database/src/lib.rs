//! # panelkit-database
//!
//! PostgreSQL connection management and the concrete store implementations
//! backing the PanelKit session and permission core.

pub mod connection;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::PgStore;
