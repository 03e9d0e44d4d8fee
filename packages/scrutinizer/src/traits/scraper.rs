//! Scraper trait for pluggable content extraction.
//!
//! Implementations wrap an external extraction service that turns a job
//! posting URL into a structured record. The pipeline never retries a
//! failed scrape: any failure routes the URL straight to a skip terminal,
//! so transport errors, empty payloads, and malformed payloads all
//! collapse into [`crate::error::ScrapeError`].

use async_trait::async_trait;

use crate::error::ScrapeResult;
use crate::types::job::ScrapedJob;

/// Scraper trait for pluggable job-page extraction.
///
/// Implementations:
/// - `FirecrawlScraper` - hosted extraction API (JavaScript rendering,
///   schema-guided extraction)
/// - `RateLimitedScraper` - wraps any scraper with a hard call ceiling
/// - `MockScraper` - canned records for tests
#[async_trait]
pub trait JobScraper: Send + Sync {
    /// Extract a structured job record from a single URL.
    ///
    /// The returned record's own `job_url` takes precedence over `url`
    /// downstream, since redirects may change the canonical address.
    async fn scrape(&self, url: &str) -> ScrapeResult<ScrapedJob>;

    /// Get the scraper name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
