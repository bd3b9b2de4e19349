//! HTTP client for the `/analyze/{category}` endpoint

use crate::constants::ANALYZE_PATH;
use crate::error::AnalysisError;
use crate::types::{AnalysisRequest, AnalysisResponse};
use reqwest::Url;
use std::time::Duration;
use tracing::{debug, info};

#[derive(Clone)]
pub struct AnalysisClient {
    client: reqwest::Client,
    base_url: Url,
}

impl AnalysisClient {
    pub fn new(server_url: &str, timeout: Duration) -> Result<Self, AnalysisError> {
        let base_url = Url::parse(server_url).map_err(|e| AnalysisError::InvalidUrl {
            url: server_url.to_string(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(AnalysisError::InvalidUrl {
                url: server_url.to_string(),
                reason: "URL cannot be a base".into(),
            });
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    /// Build `{base}/analyze/{category}` with the category as one encoded segment.
    pub fn endpoint(&self, request: &AnalysisRequest) -> Result<Url, AnalysisError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AnalysisError::InvalidUrl {
                url: self.base_url.to_string(),
                reason: "URL cannot be a base".into(),
            })?
            .pop_if_empty()
            .push(ANALYZE_PATH)
            .push(request.category());
        Ok(url)
    }

    /// Single attempt, no retry. Non-2xx and unparseable bodies are errors.
    pub async fn analyze(
        &self,
        request: &AnalysisRequest,
    ) -> Result<AnalysisResponse, AnalysisError> {
        let url = self.endpoint(request)?;
        debug!(url = %url, category = request.category(), "Requesting analysis");

        let response = self.client.get(url).send().await?;
        let status = response.status();
        debug!(status = %status, "Analysis response received");
        if !status.is_success() {
            return Err(AnalysisError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed = AnalysisResponse::from_slice(&body)?;
        info!(
            category = request.category(),
            status = %parsed.status,
            words = parsed.words.len(),
            "Analysis complete"
        );
        Ok(parsed)
    }
}
