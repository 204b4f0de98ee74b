//! Admin-domain handlers.

pub mod admins;
pub mod auth;
pub mod permissions;
pub mod roles;
