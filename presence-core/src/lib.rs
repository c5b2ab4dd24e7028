//! # Presence Core
//!
//! Core types, errors, and traits for the presence registry.
//!
//! This crate provides the building blocks shared by the other presence crates:
//!
//! - **Types**: [`Entry`], [`PresentReceiver`], [`RegistryStats`], [`RegistryConfig`]
//! - **Errors**: [`PresenceError`] and the [`Result`] alias
//! - **Constants**: default expiry timeout and sweep interval
//! - **Traits**: [`PresenceRegistry`], the seam the transport layer calls into
//!
//! ## Example
//!
//! ```rust
//! use presence_core::{Entry, RegistryConfig};
//!
//! let entry = Entry::new("alice", "job-1", "srv-1");
//! assert_eq!(entry.username, "alice");
//!
//! let config = RegistryConfig::default();
//! assert_eq!(config.timeout.as_secs(), 90);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{PresenceError, Result};
pub use traits::*;
pub use types::*;
