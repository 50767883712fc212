//! HTTP client for the `/works` API
//!
//! Non-2xx replies become [`ClientError::Api`] carrying the server's
//! `{"error": ...}` message. Nothing is retried.

use crate::error::ClientError;
use reqwest::Response;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use works_repository::{NewWork, WorkPatch};
use works_store::{Work, WorkId};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Client for a works server
#[derive(Debug, Clone)]
pub struct WorksClient {
    http: reqwest::Client,
    base_url: String,
}

impl WorksClient {
    /// Create client for `base_url`, e.g. `http://127.0.0.1:3000`
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Create client reusing an existing `reqwest::Client`
    #[must_use]
    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { http, base_url }
    }

    /// Base URL without trailing slash
    #[inline]
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn works_url(&self) -> String {
        format!("{}/works", self.base_url)
    }

    fn work_url(&self, id: WorkId) -> String {
        format!("{}/works/{id}", self.base_url)
    }

    /// `GET /works`
    ///
    /// # Errors
    /// `ClientError` on transport failure or non-success status
    pub async fn list(&self) -> Result<Vec<Work>, ClientError> {
        let resp = self.http.get(self.works_url()).send().await?;
        decode(resp).await
    }

    /// `GET /works/{id}`
    ///
    /// # Errors
    /// `ClientError` on transport failure or non-success status
    pub async fn get(&self, id: WorkId) -> Result<Work, ClientError> {
        let resp = self.http.get(self.work_url(id)).send().await?;
        decode(resp).await
    }

    /// `POST /works`
    ///
    /// # Errors
    /// `ClientError` on transport failure or non-success status
    pub async fn create(&self, input: &NewWork) -> Result<Work, ClientError> {
        let resp = self.http.post(self.works_url()).json(input).send().await?;
        decode(resp).await
    }

    /// `PUT /works/{id}`
    ///
    /// # Errors
    /// `ClientError` on transport failure or non-success status
    pub async fn update(&self, id: WorkId, patch: &WorkPatch) -> Result<Work, ClientError> {
        let resp = self.http.put(self.work_url(id)).json(patch).send().await?;
        decode(resp).await
    }

    /// `DELETE /works/{id}`
    ///
    /// # Errors
    /// `ClientError` on transport failure or non-success status
    pub async fn delete(&self, id: WorkId) -> Result<(), ClientError> {
        let resp = self.http.delete(self.work_url(id)).send().await?;
        decode::<serde_json::Value>(resp).await.map(|_| ())
    }
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ClientError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp.json::<T>().await?);
    }

    let message = match resp.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string(),
    };
    tracing::warn!(status = status.as_u16(), %message, "works api request failed");
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = WorksClient::new("http://localhost:3000/");
        assert_eq!(client.base_url(), "http://localhost:3000");
        assert_eq!(client.works_url(), "http://localhost:3000/works");
        assert_eq!(client.work_url(WorkId(4)), "http://localhost:3000/works/4");
    }
}
