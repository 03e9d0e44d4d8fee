//! End-to-end pipeline walkthrough with mock collaborators.
//!
//! Demonstrates the full wiring — candidates in, persisted result set
//! out — without spending real extraction or judgment calls. Swap the
//! mocks for `FirecrawlScraper` + `OpenAiAnalyzer` (both have
//! `from_env` constructors) to run against live services.
//!
//! ```bash
//! cargo run --example run_pipeline
//! ```

use scrutinizer::testing::{MockAnalysis, MockAnalyzer, MockScrape, MockScraper};
use scrutinizer::types::{
    AnalysisVerdict, CandidateUrl, PipelineConfig, ScrapedJob, SearchCriteria,
};
use scrutinizer::Scrutinizer;

fn posting(url: &str, title: &str, description: &str) -> ScrapedJob {
    ScrapedJob {
        job_url: Some(url.to_string()),
        job_title: Some(title.to_string()),
        job_description: Some(description.to_string()),
        posting_date: Some("2 days ago".to_string()),
        required_experience: Some("2+ years".to_string()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let rust_job = "https://boards.example/jobs/rust-backend";
    let dotnet_job = "https://boards.example/jobs/dotnet-desktop";
    let dead_link = "https://boards.example/jobs/gone";

    let scraper = MockScraper::new()
        .with_scrape(
            rust_job,
            MockScrape::Job(posting(
                rust_job,
                "Backend Engineer (Rust)",
                "Axum services, Postgres, Kafka. 2+ years of systems experience.",
            )),
        )
        .with_scrape(
            dotnet_job,
            MockScrape::Job(posting(
                dotnet_job,
                "Desktop Developer",
                "WPF and WinForms line-of-business applications.",
            )),
        )
        .with_scrape(dead_link, MockScrape::Empty);

    // The second verdict arrives wrapped in prose, as real judgment
    // output often does; the repair stage recovers it.
    let analyzer = MockAnalyzer::new()
        .with_analysis(
            rust_job,
            MockAnalysis::RawText(
                "Verdict follows.\n\
                 {\"matches\": true, \"rank\": 5, \"notes\": [\"exact stack match\"]}"
                    .into(),
            ),
        )
        .with_analysis(
            dotnet_job,
            MockAnalysis::Verdict(AnalysisVerdict::rejection(
                "desktop .NET stack, seeker wants backend Rust",
            )),
        );

    let criteria = SearchCriteria {
        job_title: vec!["Backend Engineer".into()],
        preferred_skills: vec!["Rust".into(), "Postgres".into()],
        experience_level: "Mid".into(),
        min_years_experience: Some(3),
        ..Default::default()
    };

    let config = PipelineConfig::for_run("demo").with_output_dir("./results");
    let pipeline = Scrutinizer::new(scraper, analyzer, config);

    let candidates = vec![
        CandidateUrl::new(rust_job).with_source_query("rust backend jobs"),
        CandidateUrl::new(dotnet_job).with_source_query("backend engineer hiring"),
        CandidateUrl::new(dead_link),
        // Duplicate of the first URL; the ledger refuses it.
        CandidateUrl::new("https://boards.example/jobs/rust-backend/"),
    ];

    let summary = pipeline.run(candidates, &criteria).await?;

    println!("run {}", summary.run_id);
    println!("  candidates: {} ({} duplicate)", summary.candidates, summary.duplicates);
    println!(
        "  skipped: {} scrape / {} validate / {} analyze",
        summary.skipped_scrape, summary.skipped_validate, summary.skipped_analyze
    );
    println!("  accepted: {}", summary.accepted);
    println!("  results: {}", summary.results_path.display());

    Ok(())
}
