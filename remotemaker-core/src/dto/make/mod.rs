//! Job submission DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::JobStatus;

/// Request to start a map build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeRequest {
    pub source: String,
    pub manifest: String,
    pub commit: String,
    /// Rebuild even when the server already holds a map for this commit.
    /// The key is only sent when set.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub force: bool,
}

/// Server acknowledgement of a submitted map build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeResponse {
    /// Job identifier; older servers answer with `process` instead of `id`
    #[serde(alias = "process")]
    pub id: String,
    pub status: JobStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_all_fields() {
        let request = MakeRequest {
            source: "git@example.com:maps/world.git".to_string(),
            manifest: "maps/flatmap.toml".to_string(),
            commit: "deadbeef".to_string(),
            force: true,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["source"], "git@example.com:maps/world.git");
        assert_eq!(value["manifest"], "maps/flatmap.toml");
        assert_eq!(value["commit"], "deadbeef");
        assert_eq!(value["force"], true);
    }

    #[test]
    fn test_unset_force_flag_stays_off_the_wire() {
        let request = MakeRequest {
            source: "git@example.com:maps/world.git".to_string(),
            manifest: "maps/flatmap.toml".to_string(),
            commit: "deadbeef".to_string(),
            force: false,
        };

        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("force").is_none());

        let parsed: MakeRequest =
            serde_json::from_str(r#"{"source": "s", "manifest": "m", "commit": "c"}"#).unwrap();
        assert!(!parsed.force);
    }

    #[test]
    fn test_response_accepts_id_field() {
        let response: MakeResponse =
            serde_json::from_str(r#"{"id": "job-7", "status": "pending"}"#).unwrap();
        assert_eq!(response.id, "job-7");
        assert_eq!(response.status, JobStatus::Pending);
    }

    #[test]
    fn test_response_accepts_legacy_process_field() {
        let response: MakeResponse =
            serde_json::from_str(r#"{"process": "job-7", "status": "running"}"#).unwrap();
        assert_eq!(response.id, "job-7");
        assert_eq!(response.status, JobStatus::Running);
    }
}
