//! Map job API endpoints

use async_trait::async_trait;
use remotemaker_core::dto::log::LogWindow;
use remotemaker_core::dto::make::{MakeRequest, MakeResponse};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::{MakerApi, MakerClient};

#[async_trait]
impl MakerApi for MakerClient {
    /// Submit a map build
    ///
    /// One POST to `/make/map`. A 2xx answer whose body lacks a usable job
    /// identifier still counts as a failed submission.
    async fn submit_map(&self, request: &MakeRequest) -> Result<MakeResponse> {
        let url = format!("{}/make/map", self.base_url);
        debug!(
            "POST {} (source: {}, commit: {})",
            url, request.source, request.commit
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(request)
            .send()
            .await?;

        let accepted: MakeResponse = self.handle_response(response).await?;
        if accepted.id.is_empty() {
            return Err(ClientError::ParseError(
                "server returned an empty job id".to_string(),
            ));
        }
        debug!("map build accepted as job {} ({})", accepted.id, accepted.status);

        Ok(accepted)
    }

    /// Fetch status and log lines numbered `from` (1-based) onward
    async fn fetch_log(&self, job_id: &str, from: u64) -> Result<LogWindow> {
        let url = format!("{}/make/log/{}/{}", self.base_url, job_id, from);
        debug!("GET {}", url);

        let response = self.client.get(&url).bearer_auth(&self.token).send().await?;

        let window: LogWindow = self.handle_response(response).await?;
        debug!(
            "job {} is {} ({} line(s) from {})",
            job_id,
            window.status,
            window.lines.len(),
            window.start
        );

        Ok(window)
    }
}
