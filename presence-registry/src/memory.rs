//! In-memory presence registry.
//!
//! Thread-safe storage shared between request handlers and the sweeper.

use std::collections::HashSet;
use std::time::Instant;

use async_trait::async_trait;
use indexmap::IndexMap;
use parking_lot::RwLock;
use tracing::{debug, info, instrument};

use presence_core::error::{PresenceError, Result};
use presence_core::traits::PresenceRegistry;
use presence_core::types::{Entry, PresentReceiver, RegistryConfig, RegistryStats};

/// A stored entry plus the monotonic instant it was last seen.
///
/// Ages are computed from `seen_at` so wall-clock jumps cannot evict or
/// resurrect entries.
#[derive(Clone, Debug)]
struct Slot {
    entry: Entry,
    seen_at: Instant,
}

impl Slot {
    fn new(entry: Entry) -> Self {
        Self {
            entry,
            seen_at: Instant::now(),
        }
    }

    fn touch(&mut self) {
        self.entry.touch();
        self.seen_at = Instant::now();
    }
}

/// In-memory presence registry.
///
/// One lock guards the whole job map, so every operation (including a
/// sweep) observes and mutates the map atomically.
///
/// # Iteration order
///
/// Entries iterate in insertion order. Re-registering a job keeps its
/// position and removals keep the order of the survivors. Username refresh
/// and presence queries follow this order.
#[derive(Debug)]
pub struct MemoryRegistry {
    /// Primary storage: job ID → slot
    entries: RwLock<IndexMap<String, Slot>>,
    config: RegistryConfig,
}

impl MemoryRegistry {
    /// Creates an empty registry with the default timeout and sweep interval.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Creates an empty registry with a custom configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            entries: RwLock::new(IndexMap::new()),
            config,
        }
    }

    /// Returns the expiry configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Returns the number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no entry is stored.
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Returns the entry for `job_id`, if stored.
    pub fn get(&self, job_id: &str) -> Option<Entry> {
        self.entries.read().get(job_id).map(|slot| slot.entry.clone())
    }

    /// Returns all stored entries in iteration order.
    pub fn all_entries(&self) -> Vec<Entry> {
        self.entries
            .read()
            .values()
            .map(|slot| slot.entry.clone())
            .collect()
    }

    /// Evicts entries that have gone unrefreshed for longer than the timeout.
    ///
    /// Returns the number of evicted entries.
    pub fn sweep(&self) -> usize {
        self.sweep_at(Instant::now()).len()
    }

    /// Evicts entries whose age as of `now` exceeds the timeout.
    ///
    /// Returns the evicted entries.
    pub fn sweep_at(&self, now: Instant) -> Vec<Entry> {
        let timeout = self.config.timeout;
        let mut evicted = Vec::new();

        self.entries.write().retain(|_, slot| {
            if now.saturating_duration_since(slot.seen_at) > timeout {
                evicted.push(slot.entry.clone());
                false
            } else {
                true
            }
        });

        for entry in &evicted {
            info!(job_id = %entry.job_id, username = %entry.username, "Presence timed out");
        }

        evicted
    }

    /// Shifts `last_seen` of a job into the past.
    #[cfg(test)]
    fn backdate(&self, job_id: &str, by: std::time::Duration) {
        let mut entries = self.entries.write();
        if let Some(slot) = entries.get_mut(job_id) {
            slot.seen_at = slot.seen_at.checked_sub(by).expect("instant underflow");
            slot.entry.last_seen -= chrono::Duration::from_std(by).expect("duration overflow");
        }
    }
}

impl Default for MemoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PresenceRegistry for MemoryRegistry {
    /// Stores the entry under its job ID, replacing any previous one.
    #[instrument(skip(self))]
    async fn register(&self, username: &str, job_id: &str, server_id: &str) -> Result<Entry> {
        let entry = Entry::new(username, job_id, server_id);
        entry.validate()?;

        debug!("Registering job");

        self.entries
            .write()
            .insert(entry.job_id.clone(), Slot::new(entry.clone()));

        Ok(entry)
    }

    /// Refreshes the first job registered under `username`.
    #[instrument(skip(self))]
    async fn refresh_by_username(&self, username: &str) -> Result<Entry> {
        let mut entries = self.entries.write();
        let slot = entries
            .values_mut()
            .find(|slot| slot.entry.username == username)
            .ok_or_else(|| PresenceError::NotFound(format!("receiver {username}")))?;

        slot.touch();
        debug!(job_id = %slot.entry.job_id, "Refreshed presence");

        Ok(slot.entry.clone())
    }

    #[instrument(skip(self))]
    async fn find_present(&self, usernames: &HashSet<String>) -> Result<Vec<PresentReceiver>> {
        if usernames.is_empty() {
            return Ok(Vec::new());
        }

        let present: Vec<PresentReceiver> = self
            .entries
            .read()
            .values()
            .filter(|slot| usernames.contains(&slot.entry.username))
            .map(|slot| slot.entry.to_present())
            .collect();

        debug!(count = present.len(), "Found present receivers");
        Ok(present)
    }

    #[instrument(skip(self))]
    async fn remove_by_job_id(&self, job_id: &str) -> Result<String> {
        let slot = self
            .entries
            .write()
            .shift_remove(job_id)
            .ok_or_else(|| PresenceError::NotFound(format!("job {job_id}")))?;

        debug!(username = %slot.entry.username, "Removed job");
        Ok(slot.entry.username)
    }

    async fn stats(&self) -> Result<RegistryStats> {
        Ok(RegistryStats::now(self.len()))
    }
}
