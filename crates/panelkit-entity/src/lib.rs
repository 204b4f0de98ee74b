//! Domain entity models for PanelKit.
//!
//! Two principal domains (admins and end-users) with independent session
//! tables, plus the role/permission graph that drives admin authorization.

pub mod admin;
pub mod permission;
pub mod principal;
pub mod role;
pub mod session;
pub mod user;

pub use admin::Admin;
pub use permission::{Permission, PermissionRef};
pub use principal::{PrincipalFlags, PrincipalKind};
pub use role::{Role, RoleRef, SUPER_ADMIN};
pub use session::{ClientMeta, Session};
pub use user::User;
