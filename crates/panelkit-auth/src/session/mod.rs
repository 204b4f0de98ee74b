//! Session lifecycle: creation, validation, revocation, and sweeping.

pub mod manager;

pub use manager::{IssuedSession, SessionManager, SweepOutcome};
