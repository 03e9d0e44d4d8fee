//! Whole-run orchestration.
//!
//! Admits candidates through the ledger once per run, drives each
//! survivor through the stage machine with bounded concurrency, and
//! persists the collected result set. Stage failures only ever skip
//! their own URL; persistence failure is the one error that fails the
//! run as a whole.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::Utc;
use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;

use crate::error::PipelineResult;
use crate::persist::persist_report;
use crate::pipeline::collect::ResultCollector;
use crate::pipeline::ledger::UrlLedger;
use crate::pipeline::stage::{drive_url, SkipStage, Terminal};
use crate::traits::{JobAnalyzer, JobScraper};
use crate::types::candidate::CandidateUrl;
use crate::types::config::PipelineConfig;
use crate::types::criteria::SearchCriteria;
use crate::types::report::JobReport;

/// How a completed run went.
///
/// Three user-visible outcomes are kept distinct: a run that failed
/// outright returns `Err` from [`Scrutinizer::run`]; a run that finished
/// with nothing qualifying has `accepted == 0`; a successful run reports
/// `accepted > 0`.
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub run_id: String,
    /// Candidates presented, before dedup
    pub candidates: usize,
    /// Candidates refused by the ledger
    pub duplicates: usize,
    /// Jobs in the persisted result set
    pub accepted: usize,
    pub skipped_scrape: usize,
    pub skipped_validate: usize,
    pub skipped_analyze: usize,
    /// URLs never started or abandoned mid-flight due to cancellation
    pub abandoned: usize,
    pub cancelled: bool,
    /// Where the result set was written
    pub results_path: PathBuf,
}

impl RunSummary {
    /// True when at least one job qualified.
    pub fn found_matches(&self) -> bool {
        self.accepted > 0
    }
}

#[derive(Default)]
struct Tally {
    scrape: AtomicUsize,
    validate: AtomicUsize,
    analyze: AtomicUsize,
    abandoned: AtomicUsize,
}

impl Tally {
    fn bump(&self, stage: SkipStage) {
        let counter = match stage {
            SkipStage::Scrape => &self.scrape,
            SkipStage::Validate => &self.validate,
            SkipStage::Analyze => &self.analyze,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

/// The pipeline, bound to a scraper and an analyzer.
///
/// # Example
///
/// ```rust,ignore
/// use scrutinizer::pipeline::Scrutinizer;
/// use scrutinizer::scrapers::{FirecrawlScraper, ScraperExt};
/// use scrutinizer::analyzer::OpenAiAnalyzer;
/// use scrutinizer::types::PipelineConfig;
/// use std::time::Duration;
///
/// let config = PipelineConfig::for_run("user-42");
/// let scraper = FirecrawlScraper::from_env()?
///     .rate_limited(config.scrape_calls_per_window, config.scrape_cooldown);
/// let pipeline = Scrutinizer::new(scraper, OpenAiAnalyzer::from_env()?, config);
/// let summary = pipeline.run(candidates, &criteria).await?;
/// ```
pub struct Scrutinizer<S, A> {
    scraper: S,
    analyzer: A,
    config: PipelineConfig,
}

impl<S, A> Scrutinizer<S, A>
where
    S: JobScraper,
    A: JobAnalyzer,
{
    /// Create a pipeline from its collaborators.
    pub fn new(scraper: S, analyzer: A, config: PipelineConfig) -> Self {
        Self {
            scraper,
            analyzer,
            config,
        }
    }

    /// The active configuration.
    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run the pipeline to completion.
    pub async fn run(
        &self,
        candidates: Vec<CandidateUrl>,
        criteria: &SearchCriteria,
    ) -> PipelineResult<RunSummary> {
        self.run_with_cancellation(candidates, criteria, CancellationToken::new())
            .await
    }

    /// Run the pipeline, stopping early when `cancel` fires.
    ///
    /// On cancellation no new URL is started and in-flight per-URL state
    /// is abandoned; jobs already collected are still persisted.
    pub async fn run_with_cancellation(
        &self,
        candidates: Vec<CandidateUrl>,
        criteria: &SearchCriteria,
        cancel: CancellationToken,
    ) -> PipelineResult<RunSummary> {
        let presented = candidates.len();
        let ledger = UrlLedger::new();
        let admitted: Vec<CandidateUrl> = candidates
            .into_iter()
            .filter(|candidate| {
                let admit = ledger.should_process(&candidate.url);
                if !admit {
                    tracing::debug!(url = %candidate.url, "duplicate candidate refused");
                }
                admit
            })
            .collect();
        let duplicates = presented - admitted.len();

        tracing::info!(
            run_id = %self.config.run_id,
            presented,
            admitted = admitted.len(),
            duplicates,
            concurrency = self.config.concurrency,
            "starting scrutinization run"
        );

        let collector = ResultCollector::new();
        let tally = Tally::default();
        let today = Utc::now().date_naive();
        let freshness_days = self.config.freshness_days;

        {
            let collector = &collector;
            let tally = &tally;
            let cancel = &cancel;

            stream::iter(admitted.iter())
                .for_each_concurrent(self.config.concurrency.max(1), |candidate| async move {
                    if cancel.is_cancelled() {
                        tally.abandoned.fetch_add(1, Ordering::Relaxed);
                        return;
                    }

                    tokio::select! {
                        _ = cancel.cancelled() => {
                            tracing::warn!(url = %candidate.url, "abandoning in-flight URL on cancellation");
                            tally.abandoned.fetch_add(1, Ordering::Relaxed);
                        }
                        outcome = drive_url(
                            &candidate.url,
                            &self.scraper,
                            &self.analyzer,
                            criteria,
                            today,
                            freshness_days,
                        ) => {
                            match outcome.terminal {
                                Terminal::Collected(job) => collector.collect(job),
                                Terminal::Skipped { stage, .. } => tally.bump(stage),
                            }
                        }
                    }
                })
                .await;
        }

        let accepted_jobs = collector.into_jobs();
        let report = JobReport::from_accepted(&accepted_jobs);
        let results_path = self.config.results_path();
        persist_report(&report, &results_path).await?;

        let summary = RunSummary {
            run_id: self.config.run_id.clone(),
            candidates: presented,
            duplicates,
            accepted: report.len(),
            skipped_scrape: tally.scrape.load(Ordering::Relaxed),
            skipped_validate: tally.validate.load(Ordering::Relaxed),
            skipped_analyze: tally.analyze.load(Ordering::Relaxed),
            abandoned: tally.abandoned.load(Ordering::Relaxed),
            cancelled: cancel.is_cancelled(),
            results_path,
        };

        tracing::info!(
            run_id = %summary.run_id,
            accepted = summary.accepted,
            skipped_scrape = summary.skipped_scrape,
            skipped_validate = summary.skipped_validate,
            skipped_analyze = summary.skipped_analyze,
            cancelled = summary.cancelled,
            "scrutinization run finished"
        );

        Ok(summary)
    }
}
