//! Error types for the presence registry.
//!
//! Registry failures are expected outcomes, not exceptional ones: every
//! operation returns a definite success or one of these named failures.

use thiserror::Error;

/// Result type alias using `PresenceError`.
pub type Result<T> = std::result::Result<T, PresenceError>;

/// Main error type for all presence operations.
#[derive(Debug, Error)]
pub enum PresenceError {
    // ═══════════════════════════════════════════════════════════════════════════
    // REGISTRY ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A required field was missing or empty.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The targeted job ID or username is not registered.
    #[error("Not found: {0}")]
    NotFound(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Configuration value could not be parsed or is out of range.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PresenceError {
    /// Builds an [`PresenceError::InvalidInput`] naming the missing field.
    pub fn missing_field(field: &str) -> Self {
        PresenceError::InvalidInput(format!("{field} is required"))
    }

    /// Returns true if the operation target was absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PresenceError::NotFound(_))
    }

    /// Returns true if the caller supplied bad input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, PresenceError::InvalidInput(_))
    }
}
