//! Log polling DTOs

use serde::{Deserialize, Serialize};

use crate::domain::job::JobStatus;
use crate::domain::log::LogLine;

/// One status-and-log window returned by a poll
///
/// `start` is the 1-based number of the first line in `lines`. The server
/// may resend lines the client has already consumed; `start` is what lets
/// the monitor skip the overlap instead of printing duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogWindow {
    pub status: JobStatus,
    pub start: u64,
    #[serde(default)]
    pub lines: Vec<LogLine>,
    /// Failure reason the server attaches to failure terminals
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
