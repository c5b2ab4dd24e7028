//! Presence entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{PresenceError, Result};

/// One registered presence.
///
/// `job_id` is the key; `username` is a display identity that several jobs
/// may share.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Opaque unique identifier of the job
    pub job_id: String,
    /// Display identity (not unique)
    pub username: String,
    /// Opaque locator recorded at registration time
    pub server_id: String,
    /// Time of the last registration or refresh
    pub last_seen: DateTime<Utc>,
}

impl Entry {
    /// Creates an entry seen now.
    pub fn new(
        username: impl Into<String>,
        job_id: impl Into<String>,
        server_id: impl Into<String>,
    ) -> Self {
        Self {
            job_id: job_id.into(),
            username: username.into(),
            server_id: server_id.into(),
            last_seen: Utc::now(),
        }
    }

    /// Marks the entry as seen now.
    pub fn touch(&mut self) {
        self.last_seen = Utc::now();
    }

    /// Checks that every field is non-empty.
    pub fn validate(&self) -> Result<()> {
        require("username", &self.username)?;
        require("jobId", &self.job_id)?;
        require("serverId", &self.server_id)?;
        Ok(())
    }

    /// Returns the public projection of this entry.
    pub fn to_present(&self) -> PresentReceiver {
        PresentReceiver {
            username: self.username.clone(),
            server_id: self.server_id.clone(),
        }
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(PresenceError::missing_field(field));
    }
    Ok(())
}

/// A present receiver as reported to presence queries.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentReceiver {
    /// Display identity
    pub username: String,
    /// Locator recorded at registration time
    pub server_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_new_entry() {
        let before = Utc::now();
        let entry = Entry::new("alice", "job1", "srv1");

        assert_eq!(entry.username, "alice");
        assert_eq!(entry.job_id, "job1");
        assert_eq!(entry.server_id, "srv1");
        assert!(entry.last_seen >= before);
        assert!(entry.validate().is_ok());
    }

    #[test_case("", "job1", "srv1", "username" ; "empty username")]
    #[test_case("alice", "", "srv1", "jobId" ; "empty job id")]
    #[test_case("alice", "job1", "", "serverId" ; "empty server id")]
    fn test_validate_rejects_missing(username: &str, job_id: &str, server_id: &str, field: &str) {
        let err = Entry::new(username, job_id, server_id).validate().unwrap_err();
        assert!(err.is_invalid_input());
        assert!(err.to_string().contains(field));
    }

    #[test]
    fn test_whitespace_fields_are_accepted() {
        let entry = Entry::new(" ", "job1", "  ");
        assert!(entry.validate().is_ok());
    }

    #[test]
    fn test_touch_moves_last_seen_forward() {
        let mut entry = Entry::new("alice", "job1", "srv1");
        entry.last_seen -= chrono::Duration::seconds(60);
        let stale = entry.last_seen;

        entry.touch();
        assert!(entry.last_seen > stale);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let entry = Entry::new("alice", "job1", "srv1");
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["jobId"], "job1");
        assert_eq!(json["serverId"], "srv1");
        assert!(json.get("lastSeen").is_some());

        let present = serde_json::to_value(entry.to_present()).unwrap();
        assert_eq!(present, serde_json::json!({"username": "alice", "serverId": "srv1"}));
    }
}
