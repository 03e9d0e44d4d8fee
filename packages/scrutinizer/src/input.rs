//! Reading the upstream search stage's persisted output.
//!
//! The search stage writes `step_2_job_search_results.json`; its exact
//! shape has drifted over time, so the loader accepts a `results`-wrapped
//! document or a bare array, entries that are full objects or plain URL
//! strings, and the `link` spelling of the `url` field.

use std::path::Path;

use serde::Deserialize;

use crate::error::{PipelineError, PipelineResult};
use crate::types::candidate::CandidateUrl;

#[derive(Deserialize)]
#[serde(untagged)]
enum ResultsDocument {
    Wrapped { results: Vec<ResultEntry> },
    Bare(Vec<ResultEntry>),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ResultEntry {
    Url(String),
    Candidate(CandidateUrl),
}

impl From<ResultEntry> for CandidateUrl {
    fn from(entry: ResultEntry) -> Self {
        match entry {
            ResultEntry::Url(url) => CandidateUrl::new(url),
            ResultEntry::Candidate(candidate) => candidate,
        }
    }
}

/// Load candidate URLs from a search-results file.
pub async fn load_candidate_urls(path: impl AsRef<Path>) -> PipelineResult<Vec<CandidateUrl>> {
    let path = path.as_ref();
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PipelineError::Input {
            path: path.to_path_buf(),
            source,
        })?;

    let candidates = parse_candidate_urls(&text).map_err(|source| PipelineError::Decode {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::info!(path = %path.display(), count = candidates.len(), "loaded candidate URLs");
    Ok(candidates)
}

/// Parse candidate URLs out of search-results JSON text.
pub fn parse_candidate_urls(text: &str) -> Result<Vec<CandidateUrl>, serde_json::Error> {
    let document: ResultsDocument = serde_json::from_str(text)?;
    let entries = match document {
        ResultsDocument::Wrapped { results } => results,
        ResultsDocument::Bare(entries) => entries,
    };

    Ok(entries
        .into_iter()
        .map(CandidateUrl::from)
        .filter(|candidate| !candidate.url.trim().is_empty())
        .collect())
}
