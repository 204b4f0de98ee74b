//! Expired-session sweep task.

use std::sync::Arc;

use tracing::{error, info};

use panelkit_auth::SessionManager;

/// Deletes expired and revoked session rows on a schedule.
///
/// Never touches live sessions; validation rejects dead rows on its own,
/// the sweep only reclaims storage.
#[derive(Clone)]
pub struct SessionSweeper {
    /// Session lifecycle manager.
    manager: Arc<SessionManager>,
}

impl std::fmt::Debug for SessionSweeper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionSweeper").finish()
    }
}

impl SessionSweeper {
    /// Creates a sweeper over the given session manager.
    pub fn new(manager: Arc<SessionManager>) -> Self {
        Self { manager }
    }

    /// Runs one sweep cycle. A failed cycle is logged and dropped; the
    /// next cycle retries from scratch.
    pub async fn run(&self) {
        match self.manager.sweep_expired().await {
            Ok(outcome) => {
                info!(
                    admin_sessions = outcome.admin_sessions_deleted,
                    user_sessions = outcome.user_sessions_deleted,
                    "Session sweep completed"
                );
            }
            Err(e) => {
                error!(error = %e, "Session sweep failed");
            }
        }
    }
}
