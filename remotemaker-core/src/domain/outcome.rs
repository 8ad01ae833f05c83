//! Final result of one monitored job

/// Terminal result of a monitoring run
///
/// Exactly one of these is produced per invocation and mapped to the
/// process exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The job reached its success terminal status
    Success,
    /// The server reported a failure terminal status
    Failure(String),
    /// The deadline passed before the job finished
    Timeout,
    /// Polling gave up after repeated communication failures
    CommunicationError,
    /// The user interrupted the run
    Cancelled,
}

impl Outcome {
    /// Process exit code for this outcome
    pub fn exit_code(&self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::Failure(_) => 1,
            Outcome::Timeout => 2,
            Outcome::CommunicationError => 3,
            Outcome::Cancelled => 130,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Outcome::Success.exit_code(), 0);
        assert_eq!(Outcome::Failure("mapmaker crashed".to_string()).exit_code(), 1);
        assert_eq!(Outcome::Timeout.exit_code(), 2);
        assert_eq!(Outcome::CommunicationError.exit_code(), 3);
        assert_eq!(Outcome::Cancelled.exit_code(), 130);
    }

    #[test]
    fn test_only_success_is_success() {
        assert!(Outcome::Success.is_success());
        assert!(!Outcome::Timeout.is_success());
        assert!(!Outcome::Failure("x".to_string()).is_success());
    }
}
