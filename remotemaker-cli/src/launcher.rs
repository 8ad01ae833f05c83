//! One-shot job submission
//!
//! Exactly one request: either the server accepts the build and hands back a
//! job identifier, or the tool exits. A half-submitted job cannot be told
//! apart from a rejected one, so there are no retries at this stage.

use chrono::Utc;
use thiserror::Error;
use tracing::info;

use remotemaker_client::{ClientError, MakerApi};
use remotemaker_core::domain::job::{JobHandle, JobStatus};
use remotemaker_core::dto::make::MakeRequest;

use crate::config::Config;
use crate::console::Console;

/// A submission the server did not accept
#[derive(Debug, Error)]
#[error("map build submission failed: {0}")]
pub struct SubmissionError(#[from] ClientError);

impl SubmissionError {
    /// Exit code for this failure
    ///
    /// A server rejection reports like a failed job; a transport or parse
    /// problem reports like a communication error.
    pub fn exit_code(&self) -> u8 {
        match &self.0 {
            ClientError::ApiError { .. } => 1,
            ClientError::RequestFailed(_) | ClientError::ParseError(_) => 3,
        }
    }
}

/// Submit the map build described by `config`
pub async fn submit(
    client: &dyn MakerApi,
    config: &Config,
    console: &mut Console,
) -> Result<JobHandle, SubmissionError> {
    let request = MakeRequest {
        source: config.source.clone(),
        manifest: config.manifest.clone(),
        commit: config.commit.clone(),
        force: config.force,
    };

    info!(
        "Submitting map build of {} at {} to {}",
        config.source, config.commit, config.server
    );

    let accepted = client.submit_map(&request).await?;

    let handle = JobHandle {
        id: accepted.id,
        submitted_at: Utc::now(),
    };

    console.accepted(&handle, accepted.status);
    if accepted.status == JobStatus::Pending {
        console.queued();
    }

    Ok(handle)
}
