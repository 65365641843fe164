//! Client for the MAI backend that serves document context for a query.

use std::time::Duration;

/// Path of the context endpoint, relative to the configured base URL.
pub const CONTEXT_PATH: &str = "rag/context/";

/// What the MAI backend answered, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamReply {
    /// Non-success status. The body is not read.
    Failed(u16),
    /// Success status with a JSON body of any shape.
    Context(serde_json::Value),
}

#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    #[error("MAI backend request failed")]
    Network(#[from] reqwest::Error),
    #[error("MAI backend returned a body that is not JSON")]
    Body(#[from] serde_json::Error),
}

pub struct MaiClient {
    base_url: String,
    inner_client: reqwest::Client,
}

impl MaiClient {
    pub fn new(
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let inner_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            inner_client,
        })
    }

    pub fn context_url(&self) -> String {
        format!("{}/{CONTEXT_PATH}", self.base_url)
    }

    /// One attempt, no retry. The query is URL-encoded into `?query=`.
    pub async fn fetch_context(
        &self,
        query: &str,
    ) -> Result<UpstreamReply, UpstreamError> {
        let url = self.context_url();
        tracing::info!(target_url = %url, "forwarding search to MAI backend");

        let response = self
            .inner_client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await?;

        let status = response.status();
        tracing::info!(status = status.as_u16(), "MAI backend responded");
        if !status.is_success() {
            return Ok(UpstreamReply::Failed(status.as_u16()));
        }

        let body = response.bytes().await?;
        Ok(UpstreamReply::Context(serde_json::from_slice(&body)?))
    }
}
