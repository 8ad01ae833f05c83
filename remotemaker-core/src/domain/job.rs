//! Job domain types

use serde::{Deserialize, Deserializer, Serialize};

/// Handle to one submitted map job
///
/// Created once by the launcher when the server accepts the request;
/// owned by the monitor until the process exits.
#[derive(Debug, Clone)]
pub struct JobHandle {
    pub id: String,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

/// Remote job status as reported by the flatmap server
///
/// `Unknown` absorbs status strings this client does not recognize, so a
/// newer server cannot break monitoring; it counts as in-flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Pending,
    Running,
    Succeeded,
    Failed,
    Error,
    Unknown,
}

impl JobStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            JobStatus::Pending => "pending",
            JobStatus::Running => "running",
            JobStatus::Succeeded => "succeeded",
            JobStatus::Failed => "failed",
            JobStatus::Error => "error",
            JobStatus::Unknown => "unknown",
        }
    }

    /// Whether the job has reached a final state
    ///
    /// Terminal states are exactly the successful and failed ones;
    /// everything else, `Unknown` included, keeps the monitor polling.
    pub fn is_terminal(&self) -> bool {
        self.is_success() || self.is_failure()
    }

    /// Whether the job finished successfully
    pub fn is_success(&self) -> bool {
        matches!(self, JobStatus::Succeeded)
    }

    /// Whether the job ended in a failure state
    pub fn is_failure(&self) -> bool {
        matches!(self, JobStatus::Failed | JobStatus::Error)
    }
}

impl From<&str> for JobStatus {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "pending" => JobStatus::Pending,
            "running" => JobStatus::Running,
            "succeeded" => JobStatus::Succeeded,
            "failed" => JobStatus::Failed,
            "error" => JobStatus::Error,
            _ => JobStatus::Unknown,
        }
    }
}

impl<'de> Deserialize<'de> for JobStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(JobStatus::from(s.as_str()))
    }
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
