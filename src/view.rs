//! Shell composition: which sections are visible, and their text rendering.
//!
//! Visibility is a pure function of a search-state snapshot, evaluated in
//! priority order: error banner, metadata strip, then exactly one of
//! {result list, no-results message, welcome message}.

use std::fmt::Write;

use crate::ingest::UploadStatus;
use crate::models::{SearchMetadata, SearchResult};
use crate::present::{self, ScoreTier, EXCERPT_LIMIT};
use crate::session::{SearchState, SessionStatus};

/// Which sections of the shell are visible for a given search state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visibility {
    pub error_banner: bool,
    pub metadata_strip: bool,
    pub result_list: bool,
    pub no_results: bool,
    pub welcome: bool,
}

impl Visibility {
    pub fn of(state: &SearchState) -> Self {
        Self {
            error_banner: state.error.is_some(),
            metadata_strip: state.metadata.is_some(),
            result_list: !state.results.is_empty(),
            no_results: state.has_searched
                && state.status != SessionStatus::Loading
                && state.results.is_empty(),
            welcome: !state.has_searched && state.status != SessionStatus::Loading,
        }
    }
}

const WELCOME: &str = "\
Welcome to docseek! 👋
Search across technical documentation using natural language.

  🎯 Semantic search - finds relevant docs even with different wording
  ⚡ Lightning fast - sub-100ms response times
  📚 Ad-hoc ingestion - add your own documents to the index
";

/// Render the full shell for a search-state snapshot.
pub fn render(state: &SearchState) -> String {
    let visible = Visibility::of(state);
    let mut out = String::new();

    if visible.error_banner {
        if let Some(error) = &state.error {
            let _ = writeln!(out, "⚠️  {error}");
        }
    }
    if visible.metadata_strip {
        if let Some(metadata) = &state.metadata {
            let _ = writeln!(out, "{}", metadata_strip(metadata));
        }
    }
    if visible.result_list {
        for (index, result) in state.results.iter().enumerate() {
            out.push_str(&render_result(index, result));
        }
    } else if visible.no_results {
        out.push_str("No results found. Try a different search term.\n");
    }
    if visible.welcome {
        out.push_str(WELCOME);
    }

    out
}

fn metadata_strip(metadata: &SearchMetadata) -> String {
    let mut strip = format!(
        "Found {} results • {}ms",
        metadata.count, metadata.execution_time_ms
    );
    if metadata.cache_hit {
        strip.push_str(" • ⚡ Cached");
    }
    strip
}

/// One result card: rank, score badge, title, excerpt, source tag, link.
fn render_result(index: usize, result: &SearchResult) -> String {
    let tier = ScoreTier::of(result.score);
    let title = result
        .metadata
        .as_ref()
        .and_then(|m| m.title.as_deref())
        .unwrap_or(&result.id);

    let mut out = String::new();
    let _ = writeln!(
        out,
        "#{} [{:.0}% {}] {}",
        index + 1,
        result.score * 100.0,
        tier.label(),
        title
    );
    let _ = writeln!(out, "    {}", present::excerpt(&result.text, EXCERPT_LIMIT));
    if let Some(metadata) = &result.metadata {
        if let Some(source) = &metadata.source {
            let _ = writeln!(out, "    📂 {source}");
        }
        if let Some(url) = &metadata.url {
            let _ = writeln!(out, "    🔗 {url}");
        }
    }
    out.push('\n');
    out
}

/// Status line for the add-document form, mirroring the upload lifecycle.
pub fn upload_status_line(status: UploadStatus) -> &'static str {
    match status {
        UploadStatus::Idle => "Upload Document",
        UploadStatus::Uploading => "Uploading...",
        UploadStatus::Success => "✅ Indexed!",
        UploadStatus::Error => "❌ Failed",
    }
}
