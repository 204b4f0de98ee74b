//! # panelkit-worker
//!
//! Scheduled maintenance for PanelKit: the periodic expired-session sweep.

pub mod scheduler;
pub mod sweeper;

pub use scheduler::MaintenanceScheduler;
pub use sweeper::SessionSweeper;
