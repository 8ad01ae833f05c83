//! Flatmap Server HTTP Client
//!
//! A small, type-safe HTTP client for the remote map server API.
//!
//! This crate covers the two operations the remotemaker tool needs: submitting
//! a map build and polling its status together with new log output. The
//! [`MakerApi`] trait is the seam the monitor polls through; tests substitute
//! scripted fakes for the real client behind it.
//!
//! # Example
//!
//! ```no_run
//! use remotemaker_client::{MakerApi, MakerClient};
//! use remotemaker_core::dto::make::MakeRequest;
//!
//! #[tokio::main]
//! async fn main() -> remotemaker_client::Result<()> {
//!     let client = MakerClient::new("https://maps.example.com", "secret-token");
//!
//!     let accepted = client
//!         .submit_map(&MakeRequest {
//!             source: "git@example.com:maps/world.git".to_string(),
//!             manifest: "maps/flatmap.toml".to_string(),
//!             commit: "main".to_string(),
//!             force: false,
//!         })
//!         .await?;
//!
//!     println!("job accepted: {}", accepted.id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod make;

// Re-export commonly used types
pub use error::{ClientError, Result};

use async_trait::async_trait;
use remotemaker_core::dto::log::LogWindow;
use remotemaker_core::dto::make::{MakeRequest, MakeResponse};
use reqwest::Client;
use serde::de::DeserializeOwned;

/// Operations the remotemaker tool needs from the map server
#[async_trait]
pub trait MakerApi: Send + Sync {
    /// Submit a map build request and return the server's acknowledgement
    async fn submit_map(&self, request: &MakeRequest) -> Result<MakeResponse>;

    /// Fetch the job status plus log lines numbered `from` (1-based) onward
    async fn fetch_log(&self, job_id: &str, from: u64) -> Result<LogWindow>;
}

/// HTTP client for the flatmap server API
///
/// Every request carries the server token as a bearer credential. The token
/// is deliberately kept out of the `Debug` output and out of all diagnostics.
#[derive(Clone)]
pub struct MakerClient {
    /// Base URL of the map server (e.g., "https://maps.example.com")
    base_url: String,
    /// Bearer token expected by the server
    token: String,
    /// HTTP client instance
    client: Client,
}

impl MakerClient {
    /// Create a new map server client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the map server (e.g., "https://maps.example.com")
    /// * `token` - The bearer token the server expects
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client: Client::new(),
        }
    }

    /// Create a new map server client with a custom HTTP client
    ///
    /// This allows the caller to configure timeouts, proxies, TLS settings,
    /// etc. The remotemaker binary uses it to keep each poll's transport
    /// timeout below the poll interval.
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the map server
    /// * `token` - The bearer token the server expects
    /// * `client` - A configured reqwest Client
    pub fn with_client(base_url: impl Into<String>, token: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.into(),
            client,
        }
    }

    /// Get the base URL of the map server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Checks the status code and returns an appropriate error if the request
    /// failed, or deserializes the response body if successful.
    pub(crate) async fn handle_response<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

// Manual impl: the token must never appear in logs or error output.
impl std::fmt::Debug for MakerClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MakerClient")
            .field("base_url", &self.base_url)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}
