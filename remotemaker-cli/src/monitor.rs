//! Job monitor
//!
//! The polling state machine at the heart of the tool. Each step checks
//! cancellation, then the deadline, then fetches the job status plus any log
//! lines past the cursor. The cursor only moves forward, so a server that
//! resends old lines never causes duplicate output. Transient communication
//! failures are retried with capped exponential backoff; a terminal status,
//! the deadline, cancellation, or an exhausted retry budget ends the loop
//! with exactly one outcome.

use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, warn};

use remotemaker_client::MakerApi;
use remotemaker_core::domain::job::{JobHandle, JobStatus};
use remotemaker_core::domain::outcome::Outcome;

use crate::cancel::CancelToken;
use crate::clock::Clock;
use crate::console::Console;

/// Tunables of the polling loop
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Delay between successful polls
    pub poll_interval: Duration,

    /// Overall deadline measured from monitor start
    pub timeout: Duration,

    /// Consecutive transient failures tolerated before giving up
    pub max_retries: u32,

    /// First retry delay; doubles per consecutive failure, capped at the
    /// poll interval
    pub retry_backoff: Duration,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(5),
            timeout: Duration::from_secs(600),
            max_retries: 3,
            retry_backoff: Duration::from_millis(500),
        }
    }
}

/// Watches one submitted job until it ends, one way or another
pub struct Monitor {
    client: Arc<dyn MakerApi>,
    console: Console,
    clock: Arc<dyn Clock>,
    cancel: CancelToken,
    config: MonitorConfig,
}

impl Monitor {
    /// Creates a new monitor
    pub fn new(
        client: Arc<dyn MakerApi>,
        console: Console,
        clock: Arc<dyn Clock>,
        cancel: CancelToken,
        config: MonitorConfig,
    ) -> Self {
        Self {
            client,
            console,
            clock,
            cancel,
            config,
        }
    }

    /// Runs the polling loop to completion and reports the final outcome
    pub async fn run(mut self, handle: JobHandle) -> Outcome {
        info!(
            "Monitoring job {} submitted at {} (interval: {:?}, deadline in {:?})",
            handle.id,
            handle.submitted_at.format("%Y-%m-%d %H:%M:%S"),
            self.config.poll_interval,
            self.config.timeout
        );

        let deadline = self.clock.now() + self.config.timeout;

        // Number of log lines already consumed; the next poll asks for
        // line cursor + 1 (the wire numbers lines from 1).
        let mut cursor: u64 = 0;
        let mut last_status: Option<JobStatus> = None;
        let mut consecutive_failures: u32 = 0;
        let mut retry_delay = self.config.retry_backoff;
        let mut map_id: Option<String> = None;

        let outcome = loop {
            if self.cancel.is_cancelled() {
                info!("Cancellation requested, stopping monitor for job {}", handle.id);
                break Outcome::Cancelled;
            }

            if self.clock.now() >= deadline {
                warn!("Deadline passed while job {} was still running", handle.id);
                break Outcome::Timeout;
            }

            let window = match self.client.fetch_log(&handle.id, cursor + 1).await {
                Ok(window) => {
                    consecutive_failures = 0;
                    retry_delay = self.config.retry_backoff;
                    window
                }
                Err(e) if e.is_transient() => {
                    consecutive_failures += 1;
                    if consecutive_failures > self.config.max_retries {
                        error!(
                            "Giving up on job {} after {} consecutive failed polls: {}",
                            handle.id, consecutive_failures, e
                        );
                        break Outcome::CommunicationError;
                    }

                    warn!(
                        "Poll for job {} failed (attempt {}/{}): {}",
                        handle.id, consecutive_failures, self.config.max_retries, e
                    );
                    warn!("Retrying in {:?}...", retry_delay);

                    self.clock.sleep(retry_delay).await;

                    // Exponential backoff, capped at the poll interval
                    retry_delay = (retry_delay * 2).min(self.config.poll_interval);
                    continue;
                }
                Err(e) => {
                    error!("Polling job {} failed permanently: {}", handle.id, e);
                    break Outcome::CommunicationError;
                }
            };

            // Lines numbered at or before the cursor were already shown.
            let skip = (cursor + 1).saturating_sub(window.start) as usize;
            for line in window.lines.iter().skip(skip) {
                if let Some(uuid) = &line.uuid {
                    map_id = Some(uuid.clone());
                }
                self.console.log_line(line);
            }
            if !window.lines.is_empty() {
                let end = window.start + window.lines.len() as u64 - 1;
                cursor = cursor.max(end);
            }

            if last_status != Some(window.status) {
                self.console.status_change(last_status, window.status);
                last_status = Some(window.status);
            }

            if window.status.is_terminal() {
                if window.status.is_success() {
                    break Outcome::Success;
                }
                let reason = window
                    .reason
                    .unwrap_or_else(|| format!("job ended with status {}", window.status));
                break Outcome::Failure(reason);
            }

            self.clock.sleep(self.config.poll_interval).await;
        };

        self.console.outcome(&outcome, map_id.as_deref());
        outcome
    }
}
