//! Integration tests for the scrutinization pipeline.
//!
//! Each test wires the pipeline with mock collaborators and checks the
//! persisted result set, the external-call counts, or both.

use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use scrutinizer::scrapers::ScraperExt;
use scrutinizer::testing::{MockAnalysis, MockAnalyzer, MockScrape, MockScraper};
use scrutinizer::types::{
    AnalysisVerdict, CandidateUrl, JobReport, PipelineConfig, ScrapedJob, SearchCriteria,
};
use scrutinizer::Scrutinizer;

fn fresh_record(url: &str) -> ScrapedJob {
    ScrapedJob {
        job_url: Some(url.to_string()),
        job_title: Some("Backend Engineer".into()),
        job_description: Some("Rust, Axum, Postgres".into()),
        posting_date: Some(Utc::now().date_naive().to_string()),
        required_experience: Some("2+ years".into()),
    }
}

fn config(dir: &tempfile::TempDir, run_id: &str) -> PipelineConfig {
    PipelineConfig::for_run(run_id).with_output_dir(dir.path())
}

fn read_report(config: &PipelineConfig) -> JobReport {
    let text = std::fs::read_to_string(config.results_path()).expect("results file exists");
    serde_json::from_str(&text).expect("results file is valid JSON")
}

#[tokio::test]
async fn accepted_job_lands_in_results_with_its_rank() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://a.example/job1";

    let scraper = MockScraper::new().with_scrape(url, MockScrape::Job(fresh_record(url)));
    let analyzer = MockAnalyzer::new().with_analysis(
        url,
        MockAnalysis::Verdict(AnalysisVerdict::acceptance(4, vec!["close stack match".into()])),
    );

    let config = config(&dir, "scenario-a");
    let pipeline = Scrutinizer::new(scraper, analyzer, config.clone());
    let summary = pipeline
        .run(vec![CandidateUrl::new(url)], &SearchCriteria::default())
        .await
        .unwrap();

    assert_eq!(summary.accepted, 1);
    assert!(summary.found_matches());

    let report = read_report(&config);
    assert_eq!(report.jobs.len(), 1);
    assert_eq!(report.jobs[0].job_url, url);
    assert_eq!(report.jobs[0].agent_recommendation_rank, Some(4));
    assert!(report.jobs[0].matches_user_req);
}

#[tokio::test]
async fn duplicate_after_normalization_scrapes_once() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://a.example/job1";

    let scraper = MockScraper::new().with_scrape(url, MockScrape::Job(fresh_record(url)));
    let analyzer = MockAnalyzer::new().with_analysis(
        url,
        MockAnalysis::Verdict(AnalysisVerdict::acceptance(3, vec![])),
    );

    let pipeline = Scrutinizer::new(scraper.clone(), analyzer, config(&dir, "scenario-b"));
    let summary = pipeline
        .run(
            vec![
                CandidateUrl::new("https://a.example/job1"),
                CandidateUrl::new("https://a.example/job1/"),
            ],
            &SearchCriteria::default(),
        )
        .await
        .unwrap();

    assert_eq!(scraper.calls().len(), 1, "only one scrape call is made");
    assert_eq!(summary.duplicates, 1);
    assert_eq!(summary.accepted, 1);
}

#[tokio::test]
async fn empty_scrape_payload_skips_without_analysis() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://a.example/job1";

    let scraper = MockScraper::new().with_scrape(url, MockScrape::Empty);
    let analyzer = MockAnalyzer::new();

    let config = config(&dir, "scenario-c");
    let pipeline = Scrutinizer::new(scraper, analyzer.clone(), config.clone());
    let summary = pipeline
        .run(vec![CandidateUrl::new(url)], &SearchCriteria::default())
        .await
        .unwrap();

    assert_eq!(summary.accepted, 0);
    assert_eq!(summary.skipped_scrape, 1);
    assert!(analyzer.calls().is_empty(), "no analyzer call is made");
    assert!(read_report(&config).is_empty());
}

#[tokio::test]
async fn wrapped_verdict_text_is_repaired_and_processing_continues() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://a.example/job1";

    let scraper = MockScraper::new().with_scrape(url, MockScrape::Job(fresh_record(url)));
    let analyzer = MockAnalyzer::new().with_analysis(
        url,
        MockAnalysis::RawText(
            "<think>comparing stacks...</think>\nHere is my verdict:\n\
             {\"matches\": true, \"rank\": 5, \"notes\": [\"same framework family\"]}\n\
             Hope that helps!"
                .into(),
        ),
    );

    let config = config(&dir, "scenario-d");
    let pipeline = Scrutinizer::new(scraper, analyzer, config.clone());
    let summary = pipeline
        .run(vec![CandidateUrl::new(url)], &SearchCriteria::default())
        .await
        .unwrap();

    assert_eq!(summary.accepted, 1);
    let report = read_report(&config);
    assert_eq!(report.jobs[0].agent_recommendation_rank, Some(5));
    assert_eq!(
        report.jobs[0].agent_recommendation_notes,
        vec!["same framework family"]
    );
}

#[tokio::test]
async fn rejected_jobs_never_reach_the_result_set() {
    let dir = tempfile::tempdir().unwrap();
    let matching = "https://a.example/match";
    let rejected = "https://a.example/reject";

    let scraper = MockScraper::new()
        .with_scrape(matching, MockScrape::Job(fresh_record(matching)))
        .with_scrape(rejected, MockScrape::Job(fresh_record(rejected)));
    let analyzer = MockAnalyzer::new()
        .with_analysis(
            matching,
            MockAnalysis::Verdict(AnalysisVerdict::acceptance(2, vec![])),
        )
        .with_analysis(
            rejected,
            MockAnalysis::Verdict(AnalysisVerdict::rejection("unrelated domain")),
        );

    let config = config(&dir, "rejects");
    let pipeline = Scrutinizer::new(scraper, analyzer, config.clone());
    let summary = pipeline
        .run(
            vec![CandidateUrl::new(matching), CandidateUrl::new(rejected)],
            &SearchCriteria::default(),
        )
        .await
        .unwrap();

    assert_eq!(summary.accepted, 1);
    assert_eq!(summary.skipped_analyze, 1);

    let report = read_report(&config);
    assert_eq!(report.jobs.len(), 1);
    assert_eq!(report.jobs[0].job_url, matching);
}

#[tokio::test]
async fn unrepairable_analyzer_output_skips_the_url() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://a.example/job1";

    let scraper = MockScraper::new().with_scrape(url, MockScrape::Job(fresh_record(url)));
    let analyzer = MockAnalyzer::new().with_analysis(
        url,
        MockAnalysis::RawText("the posting looks great, rank 5!".into()),
    );

    let config = config(&dir, "unrepairable");
    let pipeline = Scrutinizer::new(scraper, analyzer, config.clone());
    let summary = pipeline
        .run(vec![CandidateUrl::new(url)], &SearchCriteria::default())
        .await
        .unwrap();

    assert_eq!(summary.accepted, 0);
    assert_eq!(summary.skipped_analyze, 1);
    assert!(read_report(&config).is_empty());
}

#[tokio::test]
async fn stale_posting_is_skipped_at_validation() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://a.example/job1";

    let mut record = fresh_record(url);
    record.posting_date = Some("2020-01-01".into());
    let scraper = MockScraper::new().with_scrape(url, MockScrape::Job(record));
    let analyzer = MockAnalyzer::new();

    let pipeline = Scrutinizer::new(scraper, analyzer.clone(), config(&dir, "stale"));
    let summary = pipeline
        .run(vec![CandidateUrl::new(url)], &SearchCriteria::default())
        .await
        .unwrap();

    assert_eq!(summary.skipped_validate, 1);
    assert!(analyzer.calls().is_empty());
}

#[tokio::test]
async fn run_continues_past_individual_failures() {
    let dir = tempfile::tempdir().unwrap();
    let failing = "https://a.example/down";
    let good = "https://a.example/good";

    let scraper = MockScraper::new()
        .with_scrape(failing, MockScrape::Fail("connection reset".into()))
        .with_scrape(good, MockScrape::Job(fresh_record(good)));
    let analyzer = MockAnalyzer::new().with_analysis(
        good,
        MockAnalysis::Verdict(AnalysisVerdict::acceptance(3, vec![])),
    );

    let config = config(&dir, "partial");
    let pipeline = Scrutinizer::new(scraper, analyzer, config.clone());
    let summary = pipeline
        .run(
            vec![CandidateUrl::new(failing), CandidateUrl::new(good)],
            &SearchCriteria::default(),
        )
        .await
        .unwrap();

    assert_eq!(summary.skipped_scrape, 1);
    assert_eq!(summary.accepted, 1);
    assert_eq!(read_report(&config).jobs[0].job_url, good);
}

#[tokio::test]
async fn zero_match_completion_still_writes_an_empty_report() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://a.example/job1";

    let scraper = MockScraper::new().with_scrape(url, MockScrape::Job(fresh_record(url)));
    let analyzer = MockAnalyzer::new().with_analysis(
        url,
        MockAnalysis::Verdict(AnalysisVerdict::rejection("too senior")),
    );

    let config = config(&dir, "zero-match");
    let pipeline = Scrutinizer::new(scraper, analyzer, config.clone());
    let summary = pipeline
        .run(vec![CandidateUrl::new(url)], &SearchCriteria::default())
        .await
        .unwrap();

    assert!(!summary.found_matches());
    assert!(config.results_path().exists(), "empty runs still persist");
    assert!(read_report(&config).is_empty());
}

#[tokio::test]
async fn cancelled_run_abandons_pending_urls_but_persists() {
    let dir = tempfile::tempdir().unwrap();
    let urls = ["https://a.example/1", "https://a.example/2"];

    let scraper = MockScraper::new();
    let analyzer = MockAnalyzer::new();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let config = config(&dir, "cancelled");
    let pipeline = Scrutinizer::new(scraper.clone(), analyzer, config.clone());
    let summary = pipeline
        .run_with_cancellation(
            urls.iter().map(|u| CandidateUrl::new(*u)).collect(),
            &SearchCriteria::default(),
            cancel,
        )
        .await
        .unwrap();

    assert!(summary.cancelled);
    assert_eq!(summary.abandoned, 2);
    assert!(scraper.calls().is_empty(), "no URL is started after cancellation");
    assert!(read_report(&config).is_empty());
}

#[tokio::test]
async fn bounded_concurrency_produces_the_same_result_set() {
    let dir = tempfile::tempdir().unwrap();
    let urls: Vec<String> = (1..=6)
        .map(|i| format!("https://a.example/job{i}"))
        .collect();

    let scraper = MockScraper::new();
    let analyzer = MockAnalyzer::new();
    for url in &urls {
        scraper.add_scrape(url, MockScrape::Job(fresh_record(url)));
        analyzer.add_analysis(
            url,
            MockAnalysis::Verdict(AnalysisVerdict::acceptance(3, vec![])),
        );
    }

    let config = config(&dir, "concurrent").with_concurrency(4);
    let pipeline = Scrutinizer::new(scraper, analyzer, config.clone());
    let summary = pipeline
        .run(
            urls.iter().map(|u| CandidateUrl::new(u.as_str())).collect(),
            &SearchCriteria::default(),
        )
        .await
        .unwrap();

    assert_eq!(summary.accepted, 6);
    let report = read_report(&config);
    // Completion order varies; the persisted ordering does not.
    let mut expected = urls.clone();
    expected.sort();
    let got: Vec<_> = report.jobs.iter().map(|j| j.job_url.clone()).collect();
    assert_eq!(got, expected);
}

#[tokio::test]
async fn rate_limited_scraper_fits_into_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let url = "https://a.example/job1";

    let mock = MockScraper::new().with_scrape(url, MockScrape::Job(fresh_record(url)));
    let scraper = mock.clone().rate_limited(10, Duration::from_millis(50));
    let analyzer = MockAnalyzer::new().with_analysis(
        url,
        MockAnalysis::Verdict(AnalysisVerdict::acceptance(1, vec![])),
    );

    let pipeline = Scrutinizer::new(scraper, analyzer, config(&dir, "rate-limited"));
    let summary = pipeline
        .run(vec![CandidateUrl::new(url)], &SearchCriteria::default())
        .await
        .unwrap();

    assert_eq!(summary.accepted, 1);
    assert_eq!(mock.calls().len(), 1);
}
