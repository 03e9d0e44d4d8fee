//! Per-URL stage machine.
//!
//! A linear pipeline with early-exit branches: each URL moves
//! scrape → validate → analyze → collect, and any stage failure drops it
//! into that stage's skip terminal. There are no backward transitions and
//! no in-machine retries; a flaky scrape is simply a skipped URL.

use chrono::NaiveDate;

use crate::traits::{JobAnalyzer, JobScraper};
use crate::types::criteria::SearchCriteria;
use crate::types::job::{AcceptedJob, ScrapedJob, ValidatedJob};

/// The stage at which a URL left the pipeline without a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipStage {
    /// Scrape failed (transport, empty, or malformed payload)
    Scrape,
    /// Record failed schema validation (missing fields, stale posting)
    Validate,
    /// Judgment failed or judged the record a non-match
    Analyze,
}

/// Terminal state of one URL's traversal.
#[derive(Debug)]
pub enum Terminal {
    /// The record was judged a match and belongs in the result set
    Collected(AcceptedJob),
    /// The URL was dropped at the given stage
    Skipped { stage: SkipStage, reason: String },
}

/// Outcome of driving one URL to a terminal state.
#[derive(Debug)]
pub struct UrlOutcome {
    pub url: String,
    pub terminal: Terminal,
}

/// Transient per-URL state. Owned exclusively by [`drive_url`] for the
/// duration of the traversal; each state carries exactly the data the
/// next transition needs.
enum UrlStage {
    Pending,
    Scraping,
    Scraped(ScrapedJob),
    Validating(ScrapedJob),
    Validated(ValidatedJob),
    Analyzing(ValidatedJob),
    Done(Terminal),
}

/// Drive one URL through the pipeline to its terminal state.
///
/// Stage failures are absorbed here: they are logged, turned into a skip
/// terminal, and never escape to abort the run.
pub async fn drive_url<S, A>(
    url: &str,
    scraper: &S,
    analyzer: &A,
    criteria: &SearchCriteria,
    today: NaiveDate,
    freshness_days: i64,
) -> UrlOutcome
where
    S: JobScraper,
    A: JobAnalyzer,
{
    let mut stage = UrlStage::Pending;

    loop {
        stage = match stage {
            UrlStage::Pending => UrlStage::Scraping,

            UrlStage::Scraping => match scraper.scrape(url).await {
                Ok(job) => UrlStage::Scraped(job),
                Err(e) => skip(url, SkipStage::Scrape, e.to_string()),
            },

            UrlStage::Scraped(job) => UrlStage::Validating(job),

            UrlStage::Validating(job) => match super::validate::validate(job, today, freshness_days)
            {
                Ok(validated) => UrlStage::Validated(validated),
                Err(e) => skip(url, SkipStage::Validate, e.to_string()),
            },

            UrlStage::Validated(job) => UrlStage::Analyzing(job),

            UrlStage::Analyzing(job) => match analyzer.analyze(&job, criteria).await {
                Ok(verdict) if verdict.matches => {
                    tracing::info!(url = %url, rank = ?verdict.rank, "job accepted");
                    UrlStage::Done(Terminal::Collected(AcceptedJob { job, verdict }))
                }
                Ok(verdict) => {
                    let reason = verdict
                        .notes
                        .first()
                        .cloned()
                        .unwrap_or_else(|| "judged not a match".to_string());
                    skip(url, SkipStage::Analyze, reason)
                }
                Err(e) => skip(url, SkipStage::Analyze, e.to_string()),
            },

            UrlStage::Done(terminal) => {
                return UrlOutcome {
                    url: url.to_string(),
                    terminal,
                }
            }
        };
    }
}

fn skip(url: &str, stage: SkipStage, reason: String) -> UrlStage {
    tracing::warn!(url = %url, stage = ?stage, reason = %reason, "skipping URL");
    UrlStage::Done(Terminal::Skipped { stage, reason })
}
