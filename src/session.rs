//! Search session lifecycle.
//!
//! A session spans one query from submission to its terminal state. The
//! lifecycle is an explicit state machine (Idle, Loading, Success, Error),
//! so contradictory flag combinations cannot be represented.
//!
//! Every request carries a monotonically increasing sequence number, and a
//! completion is applied only when its sequence number is still the latest
//! issued. Rapid re-submission therefore follows a "latest query wins"
//! policy: an older request resolving after a newer one is discarded rather
//! than presented as stale results.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::task::JoinHandle;
use tracing::debug;

use crate::api::ApiClient;
use crate::models::{SearchMetadata, SearchResponse, SearchResult};

/// Lifecycle of the current search session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SessionStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Observable search state, reduced from request completions.
///
/// Invariants: non-empty `results` implies `Success`; a set `error` implies
/// `Error`; `metadata` is present if and only if the last search completed
/// successfully.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub status: SessionStatus,
    pub results: Vec<SearchResult>,
    pub metadata: Option<SearchMetadata>,
    pub error: Option<String>,
    pub has_searched: bool,
    latest_seq: u64,
}

impl SearchState {
    /// Begin a new search. Returns the request's sequence number, or `None`
    /// with no state change when the trimmed query is empty.
    pub fn begin(&mut self, query: &str) -> Option<u64> {
        if query.trim().is_empty() {
            return None;
        }
        self.latest_seq += 1;
        self.status = SessionStatus::Loading;
        self.error = None;
        self.has_searched = true;
        Some(self.latest_seq)
    }

    /// Apply a successful response for the request with sequence `seq`.
    /// Discarded when a newer request has been issued since.
    pub fn complete(&mut self, seq: u64, response: SearchResponse) {
        if seq != self.latest_seq {
            debug!("discarding stale search response (seq {seq} < {})", self.latest_seq);
            return;
        }
        self.status = SessionStatus::Success;
        self.metadata = Some(SearchMetadata::from(&response));
        self.results = response.results;
        self.error = None;
    }

    /// Apply a failed response for the request with sequence `seq`.
    /// Discarded when a newer request has been issued since.
    pub fn fail(&mut self, seq: u64, message: String) {
        if seq != self.latest_seq {
            debug!("discarding stale search failure (seq {seq} < {})", self.latest_seq);
            return;
        }
        self.status = SessionStatus::Error;
        self.error = Some(message);
        self.results.clear();
        self.metadata = None;
    }
}

/// Drives search requests and owns the shared session state.
///
/// Each submission spawns one task; the transitions for a given request are
/// applied atomically under the state lock, so no intermediate state is
/// observable.
#[derive(Clone)]
pub struct SearchSession {
    state: Arc<Mutex<SearchState>>,
    client: ApiClient,
}

impl SearchSession {
    pub fn new(client: ApiClient) -> Self {
        Self {
            state: Arc::new(Mutex::new(SearchState::default())),
            client,
        }
    }

    /// Submit a search. No-op (returns `None`) when the trimmed query is
    /// empty. Otherwise issues exactly one request and returns its task
    /// handle so callers may await completion.
    pub fn submit(&self, query: &str) -> Option<JoinHandle<()>> {
        let seq = self.lock().begin(query)?;
        let query = query.trim().to_string();
        let client = self.client.clone();
        let state = Arc::clone(&self.state);

        Some(tokio::spawn(async move {
            let outcome = client.search(&query).await;
            let mut state = lock(&state);
            match outcome {
                Ok(response) => state.complete(seq, response),
                Err(error) => state.fail(seq, error.to_string()),
            }
        }))
    }

    /// Snapshot of the current session state.
    pub fn snapshot(&self) -> SearchState {
        self.lock().clone()
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        lock(&self.state)
    }
}

fn lock(state: &Mutex<SearchState>) -> MutexGuard<'_, SearchState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ResultMetadata;

    fn make_response(query: &str, ids: &[&str]) -> SearchResponse {
        SearchResponse {
            results: ids
                .iter()
                .map(|id| SearchResult {
                    id: id.to_string(),
                    score: 0.9,
                    text: "body".to_string(),
                    metadata: Some(ResultMetadata::default()),
                })
                .collect(),
            query: query.to_string(),
            count: ids.len() as u64,
            execution_time_ms: 45.0,
            cache_hit: false,
        }
    }

    #[test]
    fn test_empty_query_is_a_noop() {
        let mut state = SearchState::default();
        assert_eq!(state.begin("   "), None);
        assert_eq!(state.status, SessionStatus::Idle);
        assert!(!state.has_searched);
    }

    #[test]
    fn test_begin_enters_loading_and_clears_error() {
        let mut state = SearchState::default();
        let seq = state.begin("first").unwrap();
        state.fail(seq, "boom".to_string());
        assert_eq!(state.status, SessionStatus::Error);

        state.begin("second").unwrap();
        assert_eq!(state.status, SessionStatus::Loading);
        assert_eq!(state.error, None);
        assert!(state.has_searched);
    }

    #[test]
    fn test_success_replaces_results_and_metadata() {
        let mut state = SearchState::default();
        let seq = state.begin("deploy").unwrap();
        state.complete(seq, make_response("deploy", &["d1", "d2"]));

        assert_eq!(state.status, SessionStatus::Success);
        assert_eq!(state.results.len(), 2);
        let metadata = state.metadata.as_ref().unwrap();
        assert_eq!(metadata.query, "deploy");
        assert_eq!(metadata.count, 2);
    }

    #[test]
    fn test_success_with_no_results_is_still_success() {
        let mut state = SearchState::default();
        let seq = state.begin("nothing").unwrap();
        state.complete(seq, make_response("nothing", &[]));

        assert_eq!(state.status, SessionStatus::Success);
        assert!(state.results.is_empty());
        assert!(state.metadata.is_some());
    }

    #[test]
    fn test_failure_clears_results_and_metadata() {
        let mut state = SearchState::default();
        let seq = state.begin("one").unwrap();
        state.complete(seq, make_response("one", &["d1"]));

        let seq = state.begin("two").unwrap();
        state.fail(seq, "index unavailable".to_string());

        assert_eq!(state.status, SessionStatus::Error);
        assert_eq!(state.error.as_deref(), Some("index unavailable"));
        assert!(state.results.is_empty());
        assert_eq!(state.metadata, None);
    }

    #[test]
    fn test_stale_success_is_discarded() {
        let mut state = SearchState::default();
        let old = state.begin("old").unwrap();
        let new = state.begin("new").unwrap();

        // The newer request finishes first, then the older one resolves.
        state.complete(new, make_response("new", &["n1"]));
        state.complete(old, make_response("old", &["o1"]));

        assert_eq!(state.results[0].id, "n1");
        assert_eq!(state.metadata.as_ref().unwrap().query, "new");
    }

    #[test]
    fn test_stale_failure_is_discarded() {
        let mut state = SearchState::default();
        let old = state.begin("old").unwrap();
        let new = state.begin("new").unwrap();

        state.complete(new, make_response("new", &["n1"]));
        state.fail(old, "too late".to_string());

        assert_eq!(state.status, SessionStatus::Success);
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_stale_response_leaves_loading_in_place() {
        let mut state = SearchState::default();
        let old = state.begin("old").unwrap();
        state.begin("new").unwrap();

        state.complete(old, make_response("old", &["o1"]));

        // The newer request is still in flight.
        assert_eq!(state.status, SessionStatus::Loading);
        assert!(state.results.is_empty());
    }

    #[test]
    fn test_identical_searches_yield_identical_state() {
        let run = || {
            let mut state = SearchState::default();
            let seq = state.begin("deploy").unwrap();
            state.complete(seq, make_response("deploy", &["d1"]));
            state
        };
        let first = run();
        let second = run();

        assert_eq!(first.status, second.status);
        assert_eq!(first.results, second.results);
        assert_eq!(first.metadata, second.metadata);
        assert_eq!(first.error, second.error);
        assert_eq!(first.has_searched, second.has_searched);
    }
}
