//! Log domain types

use serde::{Deserialize, Deserializer, Serialize};

/// One log line produced by the remote job
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogLine {
    #[serde(default)]
    pub level: Severity,
    #[serde(default)]
    pub msg: String,
    /// Identifier of the generated map; the server attaches it to the
    /// final success line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,
}

/// Log line severity, ordered from least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warning,
    Error,
    Critical,
}

impl Severity {
    /// Console tag for this level
    pub fn tag(&self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
            Severity::Error => "ERROR",
            Severity::Critical => "CRITICAL",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Severity::Info
    }
}

impl From<&str> for Severity {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "debug" => Severity::Debug,
            "info" => Severity::Info,
            "warn" | "warning" => Severity::Warning,
            "error" => Severity::Error,
            "critical" => Severity::Critical,
            _ => Severity::Info,
        }
    }
}

impl<'de> Deserialize<'de> for Severity {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(Severity::from(s.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_defaults_to_info() {
        let line: LogLine = serde_json::from_str(r#"{"msg": "checkout done"}"#).unwrap();
        assert_eq!(line.level, Severity::Info);
        assert_eq!(line.msg, "checkout done");
        assert!(line.uuid.is_none());
    }

    #[test]
    fn test_severity_accepts_warn_alias() {
        assert_eq!(Severity::from("warn"), Severity::Warning);
        assert_eq!(Severity::from("warning"), Severity::Warning);
        let line: LogLine = serde_json::from_str(r#"{"level": "warn", "msg": "x"}"#).unwrap();
        assert_eq!(line.level, Severity::Warning);
    }

    #[test]
    fn test_unrecognized_severity_falls_back_to_info() {
        assert_eq!(Severity::from("trace"), Severity::Info);
    }

    #[test]
    fn test_severity_ordering() {
        assert!(Severity::Debug < Severity::Info);
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Error);
        assert!(Severity::Error < Severity::Critical);
    }

    #[test]
    fn test_line_carries_map_uuid() {
        let line: LogLine = serde_json::from_str(
            r#"{"level": "critical", "msg": "Mapmaker succeeded", "uuid": "m-42"}"#,
        )
        .unwrap();
        assert_eq!(line.level, Severity::Critical);
        assert_eq!(line.uuid.as_deref(), Some("m-42"));
    }
}
