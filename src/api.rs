//! HTTP boundary to the remote search service.
//!
//! Two endpoints against a configured base URL:
//!
//! | Method | Path | Purpose |
//! |--------|------|---------|
//! | `POST` | `{base}/search` | Submit a query, `top_k` fixed at 5 |
//! | `POST` | `{base}/documents` | Ingest a batch of documents |
//!
//! Requests are single-attempt: the client has no retry or backoff policy,
//! and every failure is reduced to UI state by the calling controller rather
//! than propagated. A failed search response may carry `{ "error": "..." }`,
//! which is used verbatim as the user-visible message; anything else falls
//! back to a fixed literal.

use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::Config;
use crate::models::{Document, DocumentBatch, SearchRequest, SearchResponse};

/// Fallback message when a failed search carries no usable `error` field.
pub const SEARCH_FALLBACK: &str = "Failed to search. Please try again.";

/// Fixed result cap sent with every search request.
pub const TOP_K: u32 = 5;

/// Failure of a remote call.
///
/// The `Display` form is the exact user-visible message: either the server's
/// own `error` text or a fixed fallback literal.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ApiError {
    /// The server rejected the request and supplied its own message.
    #[error("{0}")]
    Server(String),
    /// Transport failure, undecodable body, or an error response with no
    /// `error` field.
    #[error("{}", SEARCH_FALLBACK)]
    SearchFailed,
    /// Document upload failed; the response body is not consumed.
    #[error("document upload failed")]
    UploadFailed,
}

/// Error body shape optionally returned on non-2xx search responses.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.api.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: config.api.base_url.clone(),
        })
    }

    /// Submit one search request.
    pub async fn search(&self, query: &str) -> Result<SearchResponse, ApiError> {
        let body = SearchRequest {
            query: query.to_string(),
            top_k: TOP_K,
        };

        let response = self
            .http
            .post(format!("{}/search", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                debug!("search transport error: {e}");
                ApiError::SearchFailed
            })?;

        let status = response.status();
        if status.is_success() {
            return response.json::<SearchResponse>().await.map_err(|e| {
                debug!("search response decode error: {e}");
                ApiError::SearchFailed
            });
        }

        match response.json::<ErrorBody>().await {
            Ok(ErrorBody {
                error: Some(message),
            }) => Err(ApiError::Server(message)),
            _ => {
                debug!("search failed with status {status} and no error body");
                Err(ApiError::SearchFailed)
            }
        }
    }

    /// Upload documents for indexing. This client always sends a batch of one.
    pub async fn upload(&self, documents: Vec<Document>) -> Result<(), ApiError> {
        let body = DocumentBatch { documents };

        let response = self
            .http
            .post(format!("{}/documents", self.base_url))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                debug!("upload transport error: {e}");
                ApiError::UploadFailed
            })?;

        if response.status().is_success() {
            Ok(())
        } else {
            debug!("upload failed with status {}", response.status());
            Err(ApiError::UploadFailed)
        }
    }
}
