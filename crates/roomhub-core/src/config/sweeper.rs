//! Reservation lifecycle sweeper configuration.

use serde::{Deserialize, Serialize};

/// Background sweeper configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweeperConfig {
    /// Whether the sweeper is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Cron schedule for the sweep (seconds-resolution, six fields).
    #[serde(default = "default_schedule")]
    pub schedule: String,
}

impl Default for SweeperConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            schedule: default_schedule(),
        }
    }
}

fn default_true() -> bool {
    true
}

/// Every 10 minutes.
fn default_schedule() -> String {
    "0 */10 * * * *".to_string()
}
