//! Registry statistics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of the registry.
///
/// `count` is the raw number of stored entries; entries past their timeout
/// but not yet swept are included.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryStats {
    /// Number of stored entries
    pub count: usize,
    /// Time the snapshot was taken
    pub timestamp: DateTime<Utc>,
}

impl RegistryStats {
    /// Creates a snapshot stamped now.
    pub fn now(count: usize) -> Self {
        Self {
            count,
            timestamp: Utc::now(),
        }
    }
}
