//! Runtime configuration
//!
//! Everything one invocation needs, validated up front so the first network
//! request never starts from a bad setup.

use std::time::Duration;

/// Validated settings for one remotemaker run
#[derive(Debug, Clone)]
pub struct Config {
    /// Map server base URL (e.g., "https://maps.example.com")
    pub server: String,

    /// Bearer token for the map server; never logged
    pub token: String,

    /// Source repository to build from
    pub source: String,

    /// Manifest path inside the source repository
    pub manifest: String,

    /// Commit to build
    pub commit: String,

    /// Rebuild even when the server already holds a map for this commit
    pub force: bool,

    /// Delay between status polls
    pub poll_interval: Duration,

    /// Overall deadline for the whole run
    pub timeout: Duration,

    /// Consecutive failed polls tolerated before giving up
    pub max_retries: u32,

    /// Verbose request tracing plus remote debug lines
    pub debug: bool,

    /// Colored console output
    pub color: bool,
}

impl Config {
    /// Per-request transport timeout
    ///
    /// Kept strictly below the poll interval so one hung request cannot
    /// swallow several poll periods.
    pub fn request_timeout(&self) -> Duration {
        self.poll_interval.mul_f64(0.8)
    }

    /// Transport connect timeout
    pub fn connect_timeout(&self) -> Duration {
        self.request_timeout() / 2
    }

    /// Transport timeout for the one-shot submission request
    ///
    /// Fixed rather than derived from the poll cadence; the server may
    /// queue the acceptance behind a busy worker.
    pub fn submit_request_timeout(&self) -> Duration {
        Duration::from_secs(30)
    }

    /// Connect timeout for the submission request
    pub fn submit_connect_timeout(&self) -> Duration {
        Duration::from_secs(10)
    }

    /// Validates the configuration
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.server.is_empty() {
            anyhow::bail!("server cannot be empty");
        }

        if !self.server.starts_with("http://") && !self.server.starts_with("https://") {
            anyhow::bail!("server must start with http:// or https://");
        }

        if self.token.is_empty() {
            anyhow::bail!("token cannot be empty");
        }

        if self.source.is_empty() {
            anyhow::bail!("source cannot be empty");
        }

        if self.manifest.is_empty() {
            anyhow::bail!("manifest cannot be empty");
        }

        if self.commit.is_empty() {
            anyhow::bail!("commit cannot be empty");
        }

        if self.poll_interval.as_secs() == 0 {
            anyhow::bail!("poll interval must be greater than 0");
        }

        if self.timeout.as_secs() == 0 {
            anyhow::bail!("timeout must be greater than 0");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Config {
        Config {
            server: "https://maps.example.com".to_string(),
            token: "tok".to_string(),
            source: "git@example.com:maps/world.git".to_string(),
            manifest: "maps/flatmap.toml".to_string(),
            commit: "deadbeef".to_string(),
            force: false,
            poll_interval: Duration::from_secs(5),
            timeout: Duration::from_secs(600),
            max_retries: 3,
            debug: false,
            color: true,
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(sample().validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let mut config = sample();
        config.server = "maps.example.com".to_string();
        assert!(config.validate().is_err());

        let mut config = sample();
        config.token = String::new();
        assert!(config.validate().is_err());

        let mut config = sample();
        config.commit = String::new();
        assert!(config.validate().is_err());

        let mut config = sample();
        config.poll_interval = Duration::ZERO;
        assert!(config.validate().is_err());

        let mut config = sample();
        config.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_transport_timeouts_stay_below_poll_interval() {
        let config = sample();
        assert!(config.request_timeout() < config.poll_interval);
        assert!(config.connect_timeout() < config.request_timeout());
    }

    #[test]
    fn test_submission_budget_not_tied_to_poll_cadence() {
        let mut config = sample();
        config.poll_interval = Duration::from_secs(1);

        assert_eq!(config.submit_request_timeout(), Duration::from_secs(30));
        assert_eq!(config.submit_connect_timeout(), Duration::from_secs(10));
        assert!(config.submit_request_timeout() > config.request_timeout());
    }
}
