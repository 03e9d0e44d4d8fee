//! Candidate URLs produced by the upstream search stage.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use url::Url;

/// A job-posting URL discovered by the search stage, not yet scraped.
///
/// Immutable once constructed; identity is the normalized URL string
/// (see [`normalize_url`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CandidateUrl {
    /// The posting URL (search results may call this `link`)
    #[serde(alias = "link")]
    pub url: String,

    /// The query string that surfaced this URL
    #[serde(default)]
    pub source_query: String,

    /// Any extra fields the search stage attached (score, snippet, ...)
    #[serde(flatten)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl CandidateUrl {
    /// Create a candidate from a bare URL string.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source_query: String::new(),
            metadata: HashMap::new(),
        }
    }

    /// Set the originating search query.
    pub fn with_source_query(mut self, query: impl Into<String>) -> Self {
        self.source_query = query.into();
        self
    }
}

impl From<&str> for CandidateUrl {
    fn from(url: &str) -> Self {
        Self::new(url)
    }
}

/// Normalize a URL for identity comparison.
///
/// Policy: lower-case scheme and host, strip the default port, strip any
/// trailing slash. Unparseable input falls back to the trimmed raw string
/// so the ledger still deduplicates exact repeats.
pub fn normalize_url(raw: &str) -> String {
    let trimmed = raw.trim();
    match Url::parse(trimmed) {
        // The url crate lower-cases scheme and host and drops default
        // ports during parsing; only the trailing slash is left to us.
        Ok(parsed) => parsed.to_string().trim_end_matches('/').to_string(),
        Err(_) => trimmed.trim_end_matches('/').to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_default_port() {
        assert_eq!(
            normalize_url("HTTPS://A.Example:443/job1"),
            "https://a.example/job1"
        );
    }

    #[test]
    fn strips_trailing_slash() {
        assert_eq!(
            normalize_url("https://a.example/job1/"),
            normalize_url("https://a.example/job1")
        );
    }

    #[test]
    fn keeps_non_default_port() {
        assert_eq!(
            normalize_url("https://a.example:8443/job1"),
            "https://a.example:8443/job1"
        );
    }

    #[test]
    fn unparseable_input_is_trimmed() {
        assert_eq!(normalize_url("  not a url  "), "not a url");
    }

    #[test]
    fn candidate_accepts_link_alias() {
        let candidate: CandidateUrl =
            serde_json::from_str(r#"{"link": "https://a.example/job1", "score": 0.9}"#).unwrap();
        assert_eq!(candidate.url, "https://a.example/job1");
        assert!(candidate.metadata.contains_key("score"));
    }
}
