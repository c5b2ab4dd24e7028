//! Registry defaults.
//!
//! Both values are fixed at process start; the registry never changes them at runtime.

// ═══════════════════════════════════════════════════════════════════════════════
// EXPIRY
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum age of `last_seen`, in seconds, before an entry may be evicted.
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;

/// Period, in seconds, between two sweeps of the registry.
///
/// A stale entry can stay visible for up to one interval past the timeout.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 15;

// ═══════════════════════════════════════════════════════════════════════════════
// ENVIRONMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Environment variable overriding [`DEFAULT_TIMEOUT_SECS`].
pub const ENV_TIMEOUT_SECS: &str = "PRESENCE_TIMEOUT_SECS";

/// Environment variable overriding [`DEFAULT_SWEEP_INTERVAL_SECS`].
pub const ENV_SWEEP_INTERVAL_SECS: &str = "PRESENCE_SWEEP_INTERVAL_SECS";

/// Default HTTP port of the presence server.
pub const DEFAULT_PORT: u16 = 3000;
