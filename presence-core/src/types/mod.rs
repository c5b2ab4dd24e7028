//! Domain types for the presence registry.
//!
//! - [`Entry`]: one registered presence, keyed by job ID
//! - [`PresentReceiver`]: the public projection returned by presence queries
//! - [`RegistryStats`]: point-in-time snapshot of the registry size
//! - [`RegistryConfig`]: expiry timeout and sweep interval

mod config;
mod entry;
mod stats;

pub use config::*;
pub use entry::*;
pub use stats::*;
