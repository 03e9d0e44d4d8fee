//! Rate-limited scraper wrapper.
//!
//! Wraps any [`JobScraper`] with a hard call ceiling: up to `max_calls`
//! scrapes proceed immediately, then the next caller waits out a full
//! cooldown and the counter resets. This is deliberately not token-bucket
//! smoothing; the external extraction service bills and throttles in
//! fixed windows, so the budget must be an explicit object owned by the
//! adapter rather than a process-global counter.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::ScrapeResult;
use crate::traits::scraper::JobScraper;
use crate::types::job::ScrapedJob;

/// An explicit call budget: `max_calls` immediate acquisitions per
/// window, then a mandatory cooldown.
///
/// Safe under concurrent acquisition: the counter lives behind an async
/// mutex that is held across the cooldown sleep, so the ceiling is
/// global across all waiting workers.
pub struct CallBudget {
    max_calls: u32,
    cooldown: Duration,
    used: Mutex<u32>,
}

impl CallBudget {
    /// Create a budget of `max_calls` per window with the given cooldown.
    ///
    /// `max_calls` is clamped to at least 1.
    pub fn new(max_calls: u32, cooldown: Duration) -> Self {
        Self {
            max_calls: max_calls.max(1),
            cooldown,
            used: Mutex::new(0),
        }
    }

    /// Acquire one call slot, sleeping out the cooldown first if the
    /// window is spent.
    pub async fn acquire(&self) {
        let mut used = self.used.lock().await;
        if *used >= self.max_calls {
            tracing::info!(
                calls = *used,
                cooldown_secs = self.cooldown.as_secs_f64(),
                "scrape budget exhausted, cooling down"
            );
            tokio::time::sleep(self.cooldown).await;
            *used = 0;
        }
        *used += 1;
    }

    /// Calls used in the current window.
    pub async fn used(&self) -> u32 {
        *self.used.lock().await
    }
}

/// A scraper wrapper that enforces the call budget before each scrape.
pub struct RateLimitedScraper<S: JobScraper> {
    inner: S,
    budget: CallBudget,
}

impl<S: JobScraper> RateLimitedScraper<S> {
    /// Wrap a scraper with a budget of `max_calls` per window.
    pub fn new(scraper: S, max_calls: u32, cooldown: Duration) -> Self {
        Self {
            inner: scraper,
            budget: CallBudget::new(max_calls, cooldown),
        }
    }

    /// Access the wrapped scraper.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// Access the call budget (for observability and tests).
    pub fn budget(&self) -> &CallBudget {
        &self.budget
    }
}

#[async_trait]
impl<S: JobScraper> JobScraper for RateLimitedScraper<S> {
    async fn scrape(&self, url: &str) -> ScrapeResult<ScrapedJob> {
        self.budget.acquire().await;
        self.inner.scrape(url).await
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Extension trait for easy rate limiting.
pub trait ScraperExt: JobScraper + Sized {
    /// Wrap this scraper with a hard call ceiling.
    fn rate_limited(self, max_calls: u32, cooldown: Duration) -> RateLimitedScraper<Self> {
        RateLimitedScraper::new(self, max_calls, cooldown)
    }
}

impl<S: JobScraper + Sized> ScraperExt for S {}
