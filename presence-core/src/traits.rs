//! Common traits for the presence registry.
//!
//! The transport layer only talks to the registry through [`PresenceRegistry`],
//! so alternative stores can be swapped in for testing.

use std::collections::HashSet;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{Entry, PresentReceiver, RegistryStats};

// ═══════════════════════════════════════════════════════════════════════════════
// REGISTRY TRAIT
// ═══════════════════════════════════════════════════════════════════════════════

/// Interface for presence storage.
///
/// Every method is a self-contained critical section: implementations must not
/// hold locks past the return of a call, and must never retry internally.
#[async_trait]
pub trait PresenceRegistry: Send + Sync {
    /// Registers (or re-registers) a job.
    ///
    /// All three fields must be non-empty. An existing entry for `job_id` is
    /// overwritten and its `last_seen` reset.
    async fn register(&self, username: &str, job_id: &str, server_id: &str) -> Result<Entry>;

    /// Resets `last_seen` of the first entry whose username matches.
    ///
    /// When several jobs share a username only one of them is refreshed; the
    /// others keep aging toward eviction.
    async fn refresh_by_username(&self, username: &str) -> Result<Entry>;

    /// Lists every stored entry whose username is in `usernames`.
    ///
    /// Stale entries are not filtered here; they disappear on the next sweep.
    async fn find_present(&self, usernames: &HashSet<String>) -> Result<Vec<PresentReceiver>>;

    /// Removes the entry for `job_id`, returning its username.
    async fn remove_by_job_id(&self, job_id: &str) -> Result<String>;

    /// Returns the raw entry count and the time of the call.
    async fn stats(&self) -> Result<RegistryStats>;
}
