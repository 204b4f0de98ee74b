//! # panelkit-auth
//!
//! The session & permission-resolution core of PanelKit.
//!
//! ## Modules
//!
//! - `password` — Argon2id password hashing with configurable cost
//! - `token` — signed access tokens, opaque refresh tokens, TTL parsing
//! - `session` — session lifecycle (create, validate, revoke, sweep)
//! - `rbac` — permission resolution and the `Ability` evaluator
//! - `store` — persistence trait seam plus an in-memory implementation
//! - `bootstrap` — first-run superuser seeding

pub mod bootstrap;
pub mod error;
pub mod password;
pub mod rbac;
pub mod session;
pub mod store;
pub mod token;

pub use error::SessionRejection;
pub use password::PasswordHasher;
pub use rbac::{Ability, AbilityCheck, PermissionResolver, ResolvedGrants};
pub use session::{IssuedSession, SessionManager, SweepOutcome};
pub use store::{AdminGrants, MemoryStore, PrincipalStore, RbacStore, SessionStore};
pub use token::{Claims, TokenIssuer, TtlSpec};
