//! DTOs for API requests and responses.
//!
//! Field names follow the camelCase wire format used by existing clients.

use serde::{Deserialize, Serialize};
use presence_core::types::PresentReceiver;

/// Generic acknowledgement.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Always true for successful calls
    pub success: bool,
    /// Human-readable outcome
    pub message: String,
}

impl MessageResponse {
    /// Successful acknowledgement with a message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

/// Request to register a job.
///
/// Missing fields deserialize as `None` and are rejected by the registry,
/// so clients get a 400 rather than a body parse error.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterJobRequest {
    /// Username of the receiver
    #[serde(default)]
    pub receiver: Option<String>,
    /// Job ID
    #[serde(default)]
    pub job_id: Option<String>,
    /// Server ID
    #[serde(default)]
    pub server_id: Option<String>,
}

/// Heartbeat from a receiver.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReceiverRequest {
    /// Username of the receiver
    #[serde(default)]
    pub receiver: Option<String>,
    /// Server ID (accepted, not used for matching)
    #[serde(default)]
    pub server_id: Option<String>,
}

/// Query string of the presence check.
#[derive(Debug, Default, Deserialize)]
pub struct CheckReceiversQuery {
    /// Comma-separated usernames
    #[serde(default)]
    pub usernames: Option<String>,
}

impl CheckReceiversQuery {
    /// Splits the username list, dropping empty items.
    pub fn usernames(&self) -> Vec<String> {
        self.usernames
            .as_deref()
            .unwrap_or_default()
            .split(',')
            .filter(|name| !name.is_empty())
            .map(str::to_owned)
            .collect()
    }
}

/// Response of the presence check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckReceiversResponse {
    /// Always true
    pub success: bool,
    /// Requested receivers currently registered
    pub available_receivers: Vec<PresentReceiver>,
}

/// Response for registry statistics.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    /// Always true
    pub success: bool,
    /// Statistics
    pub stats: StatsDto,
}

/// Registry statistics.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsDto {
    /// Number of registered jobs
    pub active_jobs: usize,
    /// Number of registered receivers (one per job)
    pub active_receivers: usize,
    /// Server time, RFC 3339 UTC
    pub server_time: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Status
    pub status: String,
    /// Version
    pub version: String,
}
