//! Job Scrutinization Pipeline
//!
//! Scrapes candidate job-posting URLs through an external extraction
//! service, validates the extracted records, judges their relevance
//! against a structured search profile, and persists the accepted set —
//! tolerating partial failure at every stage.
//!
//! # Design
//!
//! - Each URL moves through an explicit linear state machine
//!   (scrape → validate → analyze → collect) with early-exit skip
//!   terminals; a failure only ever skips its own URL.
//! - Duplicate URLs are refused once per run by a normalization-aware
//!   ledger, before any external call is spent.
//! - The scrape adapter owns an explicit call budget: a hard ceiling of
//!   N calls, then a mandatory cooldown.
//! - Judgment output is treated as unreliable by contract: raw text is
//!   parsed, repaired if possible, and otherwise skipped — never
//!   silently dropped, never fabricated.
//! - The result set is written atomically; on failure a debug artifact
//!   is dumped and the run reports persistence failure, distinct from
//!   "completed with zero matches".
//!
//! # Usage
//!
//! ```rust,ignore
//! use scrutinizer::analyzer::OpenAiAnalyzer;
//! use scrutinizer::input::load_candidate_urls;
//! use scrutinizer::pipeline::Scrutinizer;
//! use scrutinizer::scrapers::{FirecrawlScraper, ScraperExt};
//! use scrutinizer::types::{PipelineConfig, SearchCriteria};
//!
//! let config = PipelineConfig::for_run("user-42");
//! let criteria = SearchCriteria::load("results/user-42/step_1_job_requirements_analysis.json").await?;
//! let candidates = load_candidate_urls("results/user-42/step_2_job_search_results.json").await?;
//!
//! let scraper = FirecrawlScraper::from_env()?
//!     .rate_limited(config.scrape_calls_per_window, config.scrape_cooldown);
//! let pipeline = Scrutinizer::new(scraper, OpenAiAnalyzer::from_env()?, config);
//!
//! let summary = pipeline.run(candidates, &criteria).await?;
//! if summary.found_matches() {
//!     println!("{} jobs written to {}", summary.accepted, summary.results_path.display());
//! }
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Core trait abstractions (JobScraper, JobAnalyzer)
//! - [`types`] - Records, criteria, report, and configuration
//! - [`pipeline`] - Ledger, stage machine, collector, run orchestration
//! - [`scrapers`] - Scraper implementations (Firecrawl, rate limiting, mock)
//! - [`analyzer`] - Judgment client, prompts, and verdict repair
//! - [`persist`] - Atomic result-set persistence with debug fallback
//! - [`input`] - Loading the upstream stages' persisted output
//! - [`testing`] - Mock implementations for tests

pub mod analyzer;
pub mod error;
pub mod input;
pub mod persist;
pub mod pipeline;
pub mod scrapers;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{
    AnalysisError, PersistError, PipelineError, ScrapeError, ValidationError,
};
pub use traits::{JobAnalyzer, JobScraper};
pub use types::{
    AcceptedJob, AnalysisVerdict, CandidateUrl, JobReport, PipelineConfig, ReportedJob,
    ScrapedJob, SearchCriteria, ValidatedJob,
};

// Re-export the pipeline surface
pub use pipeline::{
    drive_url, parse_posting_date, validate, ResultCollector, RunSummary, Scrutinizer, SkipStage,
    Terminal, UrlLedger, UrlOutcome,
};

// Re-export scrapers and analyzer implementations
pub use analyzer::{parse_verdict, OpenAiAnalyzer};
pub use scrapers::{CallBudget, FirecrawlScraper, RateLimitedScraper, ScraperExt};

// Re-export input loading
pub use input::load_candidate_urls;

// Re-export testing utilities
pub use testing::{MockAnalysis, MockAnalyzer, MockScrape, MockScraper};
