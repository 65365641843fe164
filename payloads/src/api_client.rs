use crate::{FetchParams, ListResult, requests, responses};
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for the collaborating backend (articles, stats, users).
pub struct APIClient {
    pub address: String,
    pub inner_client: reqwest::Client,
    /// Bearer token supplied by the auth layer. In the browser the session
    /// cookie is used instead, so this is usually `None` there.
    pub token: Option<SecretString>,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: SecretString) -> Self {
        self.token = Some(token);
        self
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/{path}", self.address.trim_end_matches('/'))
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> ReqwestResult {
        let mut request = request;
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        #[cfg(target_arch = "wasm32")]
        let request = request.fetch_credentials_include();

        request.send().await
    }

    async fn get(&self, path: &str, query: &impl Serialize) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path)).query(query);
        self.send(request).await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        let request = self.inner_client.get(self.format_url(path));
        self.send(request).await
    }
}

/// Methods on the backend API
impl APIClient {
    /// Fetch one page of articles matching `params`.
    pub async fn list_articles(
        &self,
        params: &FetchParams,
    ) -> Result<ListResult<responses::Article>, ClientError> {
        let response = self.get("articles", params).await?;
        let page: responses::Page<responses::Article> =
            ok_body(response).await?;
        Ok(page.into())
    }

    pub async fn article_stats(
        &self,
    ) -> Result<responses::ArticleStats, ClientError> {
        let response = self.empty_get("stats").await?;
        ok_body(response).await
    }

    /// List every user. Requires an authenticated session.
    pub async fn list_users(
        &self,
    ) -> Result<Vec<responses::User>, ClientError> {
        let response = self.empty_get("auth/users/").await?;
        ok_body(response).await
    }
}

/// A client for the portal's own server routes.
pub struct PortalClient {
    pub address: String,
    pub inner_client: reqwest::Client,
}

impl PortalClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            inner_client: reqwest::Client::new(),
        }
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", self.address.trim_end_matches('/'))
    }

    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response =
            self.inner_client.get(self.format_url("health_check")).send().await?;
        ok_empty(response).await
    }

    /// Query the MAI context search proxy.
    ///
    /// The proxy answers with the same envelope on every status, so the
    /// status is returned next to the parsed body instead of as an error.
    pub async fn rag_search(
        &self,
        details: &requests::RagSearch,
    ) -> Result<(StatusCode, responses::RagSearchResponse), ClientError> {
        let response = self
            .inner_client
            .post(self.format_url("rag/search"))
            .json(details)
            .send()
            .await?;
        let status = response.status();
        Ok((status, response.json().await?))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// An unhandled API error to display, containing response text.
    #[error("{1}")]
    APIError(StatusCode, String),
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(response.json::<T>().await?)
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(ClientError::APIError(
            response.status(),
            response.text().await?,
        ));
    }
    Ok(())
}
