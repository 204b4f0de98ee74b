//! Session maintenance configuration.

use serde::{Deserialize, Serialize};

/// Session maintenance configuration.
///
/// Session lifetimes come from the token TTLs in [`super::AuthConfig`];
/// this section only controls the background sweep of dead rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Interval between expired-session sweep runs, in minutes.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_minutes: u64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sweep_interval_minutes: default_sweep_interval(),
        }
    }
}

fn default_sweep_interval() -> u64 {
    15
}
