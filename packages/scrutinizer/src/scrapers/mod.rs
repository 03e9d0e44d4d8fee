//! Scraper implementations.

pub mod firecrawl;
pub mod mock;
pub mod rate_limited;

pub use firecrawl::FirecrawlScraper;
pub use mock::{MockScrape, MockScraper};
pub use rate_limited::{CallBudget, RateLimitedScraper, ScraperExt};
