//! Typed errors for the scrutinization pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) to provide
//! strongly-typed, composable error handling. Each pipeline stage has its
//! own error family; stage failures are absorbed per URL, while persistence
//! and input failures surface as [`PipelineError`].

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while scraping a candidate URL.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Transport-level failure talking to the extraction service
    #[error("HTTP error: {0}")]
    Http(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The extraction service answered but reported failure
    #[error("extraction API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The extraction service returned no structured payload
    #[error("empty payload for: {url}")]
    EmptyPayload { url: String },

    /// The payload did not match the expected record shape
    #[error("malformed payload for {url}: {reason}")]
    MalformedPayload { url: String, reason: String },
}

/// Errors that can occur while validating a scraped record.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// No resolvable URL on the record
    #[error("record has no URL")]
    MissingUrl,

    /// Job title absent or blank
    #[error("missing job title for: {url}")]
    MissingTitle { url: String },

    /// Job description absent or blank
    #[error("missing job description for: {url}")]
    MissingDescription { url: String },

    /// No posting date on the record
    #[error("missing posting date for: {url}")]
    MissingPostingDate { url: String },

    /// Posting date present but not parseable
    #[error("unparseable posting date for {url}: {value:?}")]
    UnparseableDate { url: String, value: String },

    /// Posting older than the freshness window
    #[error("stale posting for {url}: posted {posted_at}, window {max_age_days} days")]
    StalePosting {
        url: String,
        posted_at: chrono::NaiveDate,
        max_age_days: i64,
    },
}

/// Errors that can occur during relevance analysis.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// The judgment service was unreachable or answered abnormally
    #[error("analysis service error: {0}")]
    Service(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The service answered with no usable text
    #[error("empty analysis response for: {url}")]
    EmptyResponse { url: String },

    /// No structured verdict could be recovered from the raw output
    #[error("unparseable verdict for {url}")]
    UnparseableVerdict { url: String },

    /// A verdict was recovered but its rank is outside 1..=5
    #[error("invalid rank {rank} in verdict for {url}")]
    InvalidRank { url: String, rank: i64 },
}

/// Errors that can occur while persisting the result set.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The result set could not be serialized
    #[error("serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),

    /// Writing or renaming the output file failed
    #[error("write failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Terminal errors for a whole pipeline run.
///
/// Stage errors never appear here: they only skip the URL they belong to.
/// Distinct from a run that completes with zero matches, which is an
/// `Ok` outcome carrying an empty result set.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Result set could not be persisted (debug artifact was attempted)
    #[error("persistence failed: {0}")]
    Persist(#[from] PersistError),

    /// A prior stage's results file could not be read
    #[error("cannot read input {path}: {source}")]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A prior stage's results file could not be decoded
    #[error("cannot decode input {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Result type alias for scrape operations.
pub type ScrapeResult<T> = std::result::Result<T, ScrapeError>;

/// Result type alias for validation.
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Result type alias for analysis operations.
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

/// Result type alias for persistence.
pub type PersistResult<T> = std::result::Result<T, PersistError>;

/// Result type alias for whole-run operations.
pub type PipelineResult<T> = std::result::Result<T, PipelineError>;
