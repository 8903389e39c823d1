use std::time::Duration;

use crate::{FailureKind, QueryRequest, SubmitError};

/// The query API, reached through a CORS-relaying pass-through proxy.
pub const QUERY_ENDPOINT: &str = "https://corsproxy.io/?url=https://api.devin.ai/ada/query";

#[derive(Debug, Clone)]
pub struct SubmitSettings {
    /// Where the POST goes. Tests point this at a local mock server.
    pub endpoint: String,
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
}

impl Default for SubmitSettings {
    fn default() -> Self {
        Self {
            endpoint: QUERY_ENDPOINT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[async_trait::async_trait]
pub trait QuerySender: Send + Sync {
    /// Delivers one query request. `Ok(())` means the POST completed with a
    /// success status; the response body is never read.
    async fn send(&self, request: &QueryRequest) -> Result<(), SubmitError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestSender {
    settings: SubmitSettings,
}

impl ReqwestSender {
    pub fn new(settings: SubmitSettings) -> Self {
        Self { settings }
    }

    fn build_client(&self) -> Result<reqwest::Client, SubmitError> {
        // No cookie store is configured, so no credentials ever travel with
        // the request.
        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .build()
            .map_err(|err| SubmitError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl QuerySender for ReqwestSender {
    async fn send(&self, request: &QueryRequest) -> Result<(), SubmitError> {
        let client = self.build_client()?;

        log::debug!(
            "posting query {} to {}",
            request.query_id,
            self.settings.endpoint
        );

        let response = client
            .post(self.settings.endpoint.as_str())
            .json(request)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubmitError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        // The body is intentionally discarded; the viewer tab fetches the
        // answer itself.
        Ok(())
    }
}

fn map_reqwest_error(err: reqwest::Error) -> SubmitError {
    if err.is_timeout() {
        return SubmitError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_builder() {
        return SubmitError::new(FailureKind::InvalidEndpoint, err.to_string());
    }
    SubmitError::new(FailureKind::Network, err.to_string())
}
