//! Job records at each stage of the pipeline.
//!
//! A URL's transient state moves `ScrapedJob` → `ValidatedJob` →
//! `AnalysisVerdict` → `AcceptedJob`; each type is owned exclusively by the
//! stage driver for the duration of that URL's traversal.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// The as-extracted record returned by the scraping service.
///
/// This shape doubles as the JSON Schema handed to the extraction API
/// (via `schemars`), so every field is optional: the service fills what
/// it can find on the page and the validator decides whether that is
/// enough.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ScrapedJob {
    /// The page's own canonical URL; takes precedence over the input URL
    /// since redirects may change it
    #[serde(default)]
    pub job_url: Option<String>,

    /// Job title as shown on the posting
    #[serde(default)]
    pub job_title: Option<String>,

    /// Full job description text
    #[serde(default)]
    pub job_description: Option<String>,

    /// Posting date as printed on the page (absolute or relative form)
    #[serde(default)]
    pub posting_date: Option<String>,

    /// Required-experience statement, e.g. "5+ years"
    #[serde(default)]
    pub required_experience: Option<String>,
}

impl ScrapedJob {
    /// The record's resolved URL, falling back to the URL we asked for.
    pub fn resolved_url<'a>(&'a self, requested: &'a str) -> &'a str {
        match self.job_url.as_deref() {
            Some(url) if !url.trim().is_empty() => url,
            _ => requested,
        }
    }

    /// True when the service returned nothing worth validating.
    pub fn is_empty(&self) -> bool {
        fn blank(field: &Option<String>) -> bool {
            field.as_deref().map_or(true, |s| s.trim().is_empty())
        }
        blank(&self.job_title) && blank(&self.job_description)
    }
}

/// A scraped record that passed schema conformance.
///
/// Invariant: `url`, `title`, and `description` are non-empty and
/// `posted_at` lies within the configured freshness window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidatedJob {
    pub url: String,
    pub title: String,
    pub description: String,
    pub posted_at: NaiveDate,
    pub required_experience: Option<String>,
}

/// The relevance judgment for a validated record.
///
/// `rank` is only meaningful when `matches` is true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisVerdict {
    pub matches: bool,
    pub rank: Option<u8>,
    pub notes: Vec<String>,
}

impl AnalysisVerdict {
    /// A rejection verdict with a single explanatory note.
    pub fn rejection(note: impl Into<String>) -> Self {
        Self {
            matches: false,
            rank: None,
            notes: vec![note.into()],
        }
    }

    /// An acceptance verdict with the given rank.
    pub fn acceptance(rank: u8, notes: Vec<String>) -> Self {
        Self {
            matches: true,
            rank: Some(rank),
            notes,
        }
    }
}

/// A validated record joined with an accepting verdict.
///
/// The unit stored by the result collector; only produced when
/// `verdict.matches` is true.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AcceptedJob {
    pub job: ValidatedJob,
    pub verdict: AnalysisVerdict,
}
