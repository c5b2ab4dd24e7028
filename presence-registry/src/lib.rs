//! # Presence Registry
//!
//! In-memory presence storage and its expiry task.
//!
//! - [`MemoryRegistry`]: job map guarded by a single lock
//! - [`spawn_sweeper`]: background task evicting stale entries on a fixed period
//!
//! ## Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use presence_registry::{spawn_sweeper, MemoryRegistry, Registry};
//! use tokio_util::sync::CancellationToken;
//!
//! let registry = Arc::new(MemoryRegistry::new());
//! let shutdown = CancellationToken::new();
//! let sweeper = spawn_sweeper(registry.clone(), shutdown.clone());
//!
//! registry.register("alice", "job-1", "srv-1").await?;
//!
//! shutdown.cancel();
//! sweeper.await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod memory;
mod sweeper;

pub use memory::MemoryRegistry;
pub use sweeper::spawn_sweeper;

// Re-export the trait from core
pub use presence_core::traits::PresenceRegistry as Registry;
