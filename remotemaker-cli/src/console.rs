//! Severity-colored console output
//!
//! Every user-facing line about the remote job goes through this type: log
//! lines, status-change notices, and the single final outcome line. Keeping
//! presentation here (with an injectable writer) leaves the monitor free of
//! printing and lets tests capture exactly what the user would see.

use std::io::Write;

use colored::*;

use remotemaker_core::domain::job::{JobHandle, JobStatus};
use remotemaker_core::domain::log::{LogLine, Severity};
use remotemaker_core::domain::outcome::Outcome;

/// Console presentation of one monitored job
pub struct Console {
    color: bool,
    min_level: Severity,
    out: Box<dyn Write + Send>,
}

impl Console {
    /// Console writing to stdout
    pub fn new(color: bool, min_level: Severity) -> Self {
        Self::with_writer(color, min_level, Box::new(std::io::stdout()))
    }

    /// Console writing somewhere else (tests capture output through this)
    pub fn with_writer(color: bool, min_level: Severity, out: Box<dyn Write + Send>) -> Self {
        Self {
            color,
            min_level,
            out,
        }
    }

    /// Announce an accepted submission
    pub fn accepted(&mut self, handle: &JobHandle, status: JobStatus) {
        let line = format!(
            "{} Map build accepted as job {} ({})",
            self.glyph("▸"),
            handle.id,
            self.status_text(status)
        );
        self.emit(&line);
    }

    /// Shown when the server parks the job behind another build
    pub fn queued(&mut self) {
        let text = "  the server is busy; the build will start when a slot frees up";
        let line = if self.color {
            text.dimmed().to_string()
        } else {
            text.to_string()
        };
        self.emit(&line);
    }

    /// Render one remote log line, honoring the minimum level
    pub fn log_line(&mut self, line: &LogLine) {
        if line.level < self.min_level {
            return;
        }
        let rendered = format!("[{}] {}", self.level_text(line.level), line.msg);
        self.emit(&rendered);
    }

    /// One notice per remote status transition
    pub fn status_change(&mut self, previous: Option<JobStatus>, current: JobStatus) {
        let line = match previous {
            Some(prev) => format!(
                "{} status: {} → {}",
                self.glyph("▸"),
                self.status_text(prev),
                self.status_text(current)
            ),
            None => format!("{} status: {}", self.glyph("▸"), self.status_text(current)),
        };
        self.emit(&line);
    }

    /// Print the single final outcome line
    pub fn outcome(&mut self, outcome: &Outcome, map_id: Option<&str>) {
        let line = match outcome {
            Outcome::Success => match map_id {
                Some(id) => format!("{} Map build succeeded (map {})", self.tick(), id),
                None => format!("{} Map build succeeded", self.tick()),
            },
            Outcome::Failure(reason) => {
                format!("{} Map build failed: {}", self.cross(), reason)
            }
            Outcome::Timeout => format!(
                "{} Gave up waiting: the deadline passed before the job finished",
                self.warn_sign()
            ),
            Outcome::CommunicationError => {
                format!("{} Lost contact with the map server", self.cross())
            }
            Outcome::Cancelled => format!("{} Cancelled", self.warn_sign()),
        };
        self.emit(&line);
    }

    // =============================================================================
    // Rendering helpers
    // =============================================================================

    fn status_text(&self, status: JobStatus) -> String {
        if !self.color {
            return status.to_string();
        }
        let colored = match status {
            JobStatus::Pending => status.as_str().yellow(),
            JobStatus::Running => status.as_str().cyan(),
            JobStatus::Succeeded => status.as_str().green(),
            JobStatus::Failed | JobStatus::Error => status.as_str().red(),
            JobStatus::Unknown => status.as_str().dimmed(),
        };
        colored.to_string()
    }

    fn level_text(&self, level: Severity) -> String {
        if !self.color {
            return level.tag().to_string();
        }
        let colored = match level {
            Severity::Debug => level.tag().dimmed(),
            Severity::Info => level.tag().cyan(),
            Severity::Warning => level.tag().yellow(),
            Severity::Error => level.tag().red(),
            Severity::Critical => level.tag().red().bold(),
        };
        colored.to_string()
    }

    fn glyph(&self, symbol: &str) -> String {
        if self.color {
            symbol.cyan().to_string()
        } else {
            symbol.to_string()
        }
    }

    fn tick(&self) -> String {
        if self.color {
            "✓".green().to_string()
        } else {
            "✓".to_string()
        }
    }

    fn cross(&self) -> String {
        if self.color {
            "✗".red().to_string()
        } else {
            "✗".to_string()
        }
    }

    fn warn_sign(&self) -> String {
        if self.color {
            "⚠".yellow().to_string()
        } else {
            "⚠".to_string()
        }
    }

    fn emit(&mut self, line: &str) {
        // A closed pipe must not turn into a panic mid-monitoring.
        let _ = writeln!(self.out, "{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl SharedBuf {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn console(min_level: Severity) -> (Console, SharedBuf) {
        let buf = SharedBuf::default();
        let console = Console::with_writer(false, min_level, Box::new(buf.clone()));
        (console, buf)
    }

    fn line(level: Severity, msg: &str) -> LogLine {
        LogLine {
            level,
            msg: msg.to_string(),
            uuid: None,
        }
    }

    #[test]
    fn test_log_line_renders_level_tag() {
        let (mut console, buf) = console(Severity::Info);
        console.log_line(&line(Severity::Warning, "sparse region"));
        assert_eq!(buf.contents(), "[WARN] sparse region\n");
    }

    #[test]
    fn test_log_line_respects_min_level() {
        let (mut console, buf) = console(Severity::Info);
        console.log_line(&line(Severity::Debug, "probe tile cache"));
        console.log_line(&line(Severity::Info, "rendering tiles"));
        let output = buf.contents();
        assert!(!output.contains("probe tile cache"));
        assert!(output.contains("rendering tiles"));
    }

    #[test]
    fn test_status_change_shows_transition() {
        let (mut console, buf) = console(Severity::Info);
        console.status_change(None, JobStatus::Pending);
        console.status_change(Some(JobStatus::Pending), JobStatus::Running);
        let output = buf.contents();
        assert!(output.contains("▸ status: pending\n"));
        assert!(output.contains("▸ status: pending → running\n"));
    }

    #[test]
    fn test_success_outcome_names_the_map() {
        let (mut console, buf) = console(Severity::Info);
        console.outcome(&Outcome::Success, Some("map-77"));
        assert_eq!(buf.contents(), "✓ Map build succeeded (map map-77)\n");
    }

    #[test]
    fn test_failure_outcome_carries_reason() {
        let (mut console, buf) = console(Severity::Info);
        console.outcome(&Outcome::Failure("manifest rejected".to_string()), None);
        assert_eq!(buf.contents(), "✗ Map build failed: manifest rejected\n");
    }

    #[test]
    fn test_accepted_line_names_job_and_status() {
        let (mut console, buf) = console(Severity::Info);
        let handle = JobHandle {
            id: "job-9".to_string(),
            submitted_at: chrono::Utc::now(),
        };
        console.accepted(&handle, JobStatus::Pending);
        assert_eq!(
            buf.contents(),
            "▸ Map build accepted as job job-9 (pending)\n"
        );
    }
}
