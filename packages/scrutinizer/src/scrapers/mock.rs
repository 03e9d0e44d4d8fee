//! Mock scraper for testing.
//!
//! Provides canned scrape outcomes keyed by URL, with call tracking so
//! tests can assert how many external calls a pipeline run would issue.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::error::{ScrapeError, ScrapeResult};
use crate::traits::scraper::JobScraper;
use crate::types::job::ScrapedJob;

/// A canned outcome for one URL.
#[derive(Debug, Clone)]
pub enum MockScrape {
    /// Return this record
    Job(ScrapedJob),
    /// Simulate an empty extraction payload
    Empty,
    /// Simulate a transport failure with this message
    Fail(String),
}

/// Mock scraper for testing.
///
/// # Example
///
/// ```rust
/// use scrutinizer::scrapers::{MockScrape, MockScraper};
/// use scrutinizer::types::ScrapedJob;
///
/// let mock = MockScraper::new().with_scrape(
///     "https://a.example/job1",
///     MockScrape::Job(ScrapedJob {
///         job_title: Some("Engineer".into()),
///         job_description: Some("Build".into()),
///         ..Default::default()
///     }),
/// );
/// ```
#[derive(Default)]
pub struct MockScraper {
    outcomes: Arc<RwLock<HashMap<String, MockScrape>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockScraper {
    /// Create a new empty mock scraper.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an outcome for a URL.
    pub fn add_scrape(&self, url: impl Into<String>, outcome: MockScrape) {
        self.outcomes.write().unwrap().insert(url.into(), outcome);
    }

    /// Register an outcome for a URL (builder pattern).
    pub fn with_scrape(self, url: impl Into<String>, outcome: MockScrape) -> Self {
        self.add_scrape(url, outcome);
        self
    }

    /// URLs scraped so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Clear recorded calls.
    pub fn reset_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

impl Clone for MockScraper {
    fn clone(&self) -> Self {
        Self {
            outcomes: Arc::clone(&self.outcomes),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl JobScraper for MockScraper {
    async fn scrape(&self, url: &str) -> ScrapeResult<ScrapedJob> {
        self.calls.write().unwrap().push(url.to_string());

        let outcome = self.outcomes.read().unwrap().get(url).cloned();
        match outcome {
            Some(MockScrape::Job(job)) => Ok(job),
            Some(MockScrape::Fail(message)) => Err(ScrapeError::Http(message.into())),
            Some(MockScrape::Empty) | None => Err(ScrapeError::EmptyPayload {
                url: url.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_and_returns_canned_job() {
        let mock = MockScraper::new().with_scrape(
            "https://a.example/job1",
            MockScrape::Job(ScrapedJob {
                job_title: Some("Engineer".into()),
                ..Default::default()
            }),
        );

        let job = mock.scrape("https://a.example/job1").await.unwrap();
        assert_eq!(job.job_title.as_deref(), Some("Engineer"));
        assert_eq!(mock.calls(), vec!["https://a.example/job1"]);
    }

    #[tokio::test]
    async fn unknown_url_is_an_empty_payload() {
        let mock = MockScraper::new();
        let err = mock.scrape("https://a.example/missing").await.unwrap_err();
        assert!(matches!(err, ScrapeError::EmptyPayload { .. }));
    }
}
