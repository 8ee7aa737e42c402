//! Wire and domain types shared by the controllers.
//!
//! These types mirror the search service's JSON contract: what goes out on
//! `POST /search` and `POST /documents`, and what comes back.

use serde::{Deserialize, Serialize};

/// One ranked hit returned by the search endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SearchResult {
    pub id: String,
    /// Relevance score in `[0, 1]`, higher is better.
    pub score: f64,
    pub text: String,
    #[serde(default)]
    pub metadata: Option<ResultMetadata>,
}

/// Optional descriptive fields attached to a result.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ResultMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

/// Body of a successful `POST /search` response.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    /// Ranked results; treated as empty when the field is absent.
    #[serde(default)]
    pub results: Vec<SearchResult>,
    pub query: String,
    pub count: u64,
    pub execution_time_ms: f64,
    pub cache_hit: bool,
}

/// Summary of the most recent successful search.
///
/// Present if and only if the last search completed successfully.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchMetadata {
    pub query: String,
    pub count: u64,
    pub execution_time_ms: f64,
    pub cache_hit: bool,
}

impl From<&SearchResponse> for SearchMetadata {
    fn from(response: &SearchResponse) -> Self {
        Self {
            query: response.query.clone(),
            count: response.count,
            execution_time_ms: response.execution_time_ms,
            cache_hit: response.cache_hit,
        }
    }
}

/// Where a manually added document came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DocSource {
    #[default]
    Manual,
    Email,
    Slack,
}

impl std::fmt::Display for DocSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DocSource::Manual => "manual",
            DocSource::Email => "email",
            DocSource::Slack => "slack",
        };
        f.write_str(name)
    }
}

/// A document submitted for ingestion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub text: String,
    pub source: DocSource,
    pub url: String,
}

/// Request body for `POST /search`.
#[derive(Debug, Serialize)]
pub struct SearchRequest {
    pub query: String,
    pub top_k: u32,
}

/// Request body for `POST /documents`.
#[derive(Debug, Serialize)]
pub struct DocumentBatch {
    pub documents: Vec<Document>,
}
