//! Firecrawl-based scraper implementation.
//!
//! Uses the Firecrawl extract API, which renders the page (JavaScript,
//! anti-bot handling) and returns fields matching a caller-supplied JSON
//! Schema. The schema sent is derived from [`ScrapedJob`] so the service
//! does the field mapping for us.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use schemars::schema_for;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::error::{ScrapeError, ScrapeResult};
use crate::traits::scraper::JobScraper;
use crate::types::job::ScrapedJob;

const FIRECRAWL_API_URL: &str = "https://api.firecrawl.dev/v1";

const EXTRACT_PROMPT: &str = "Extract the job information from the webpage.";

/// Scraper backed by the Firecrawl extract endpoint.
///
/// # Example
///
/// ```rust,ignore
/// use scrutinizer::scrapers::{FirecrawlScraper, ScraperExt};
/// use std::time::Duration;
///
/// let scraper = FirecrawlScraper::from_env()?.rate_limited(10, Duration::from_secs(60));
/// let record = scraper.scrape("https://boards.example/jobs/123").await?;
/// ```
pub struct FirecrawlScraper {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

#[derive(Serialize)]
struct ExtractRequest {
    urls: Vec<String>,
    schema: serde_json::Value,
    prompt: String,
}

#[derive(Deserialize)]
struct ExtractResponse {
    success: bool,
    #[serde(default)]
    data: Option<Vec<ExtractItem>>,
}

#[derive(Deserialize)]
struct ExtractItem {
    #[serde(default)]
    data: Option<serde_json::Value>,
}

impl FirecrawlScraper {
    /// Create a new scraper with the given API key.
    pub fn new(api_key: impl Into<String>) -> ScrapeResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()
            .map_err(|e| ScrapeError::Http(Box::new(e)))?;

        Ok(Self {
            client,
            api_key: SecretString::from(api_key.into()),
            base_url: FIRECRAWL_API_URL.to_string(),
        })
    }

    /// Create from environment variable `FIRECRAWL_API_KEY`.
    pub fn from_env() -> ScrapeResult<Self> {
        let api_key = std::env::var("FIRECRAWL_API_KEY").map_err(|_| {
            ScrapeError::Http(Box::new(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "FIRECRAWL_API_KEY environment variable not set",
            )))
        })?;
        Self::new(api_key)
    }

    /// Set a custom base URL (proxies, self-hosted deployments).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    async fn post_extract(&self, request: &ExtractRequest) -> ScrapeResult<ExtractResponse> {
        let url = format!("{}/extract", self.base_url);
        let response = self
            .client
            .post(&url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| ScrapeError::Http(Box::new(e)))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Api { status, message });
        }

        response
            .json()
            .await
            .map_err(|e| ScrapeError::Http(Box::new(e)))
    }

    /// Map one extract item into a job record.
    fn item_to_job(url: &str, item: ExtractItem) -> ScrapeResult<ScrapedJob> {
        let value = item.data.ok_or_else(|| ScrapeError::EmptyPayload {
            url: url.to_string(),
        })?;

        let mut job: ScrapedJob =
            serde_json::from_value(value).map_err(|e| ScrapeError::MalformedPayload {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if job.is_empty() {
            return Err(ScrapeError::EmptyPayload {
                url: url.to_string(),
            });
        }

        // Redirect targets come back in the payload; fall back to the
        // requested URL when the service omits it.
        if job.job_url.as_deref().map_or(true, |u| u.trim().is_empty()) {
            job.job_url = Some(url.to_string());
        }

        Ok(job)
    }
}

#[async_trait]
impl JobScraper for FirecrawlScraper {
    async fn scrape(&self, url: &str) -> ScrapeResult<ScrapedJob> {
        tracing::info!(url = %url, "scraping via Firecrawl extract");

        let request = ExtractRequest {
            urls: vec![url.to_string()],
            schema: serde_json::to_value(schema_for!(ScrapedJob)).unwrap_or_default(),
            prompt: EXTRACT_PROMPT.to_string(),
        };

        let response = self.post_extract(&request).await?;

        if !response.success {
            return Err(ScrapeError::Api {
                status: 200,
                message: "extract reported failure".to_string(),
            });
        }

        let item = response
            .data
            .unwrap_or_default()
            .into_iter()
            .next()
            .ok_or_else(|| ScrapeError::EmptyPayload {
                url: url.to_string(),
            })?;

        Self::item_to_job(url, item)
    }

    fn name(&self) -> &str {
        "firecrawl"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_scraper() {
        let scraper = FirecrawlScraper::new("test-key").unwrap();
        assert_eq!(scraper.name(), "firecrawl");
    }

    #[test]
    fn test_item_to_job_maps_fields() {
        let item = ExtractItem {
            data: Some(serde_json::json!({
                "job_title": "Backend Engineer",
                "job_description": "Build APIs",
                "job_url": "https://a.example/job1",
                "posting_date": "2026-08-01"
            })),
        };

        let job = FirecrawlScraper::item_to_job("https://a.example/start", item).unwrap();
        assert_eq!(job.job_url.as_deref(), Some("https://a.example/job1"));
        assert_eq!(job.job_title.as_deref(), Some("Backend Engineer"));
    }

    #[test]
    fn test_item_without_payload_is_empty() {
        let item = ExtractItem { data: None };
        let err = FirecrawlScraper::item_to_job("https://a.example/job1", item).unwrap_err();
        assert!(matches!(err, ScrapeError::EmptyPayload { .. }));
    }

    #[test]
    fn test_blank_payload_is_empty() {
        let item = ExtractItem {
            data: Some(serde_json::json!({ "job_title": "  " })),
        };
        let err = FirecrawlScraper::item_to_job("https://a.example/job1", item).unwrap_err();
        assert!(matches!(err, ScrapeError::EmptyPayload { .. }));
    }

    #[test]
    fn test_missing_url_falls_back_to_requested() {
        let item = ExtractItem {
            data: Some(serde_json::json!({
                "job_title": "Engineer",
                "job_description": "Work"
            })),
        };
        let job = FirecrawlScraper::item_to_job("https://a.example/job1", item).unwrap();
        assert_eq!(job.job_url.as_deref(), Some("https://a.example/job1"));
    }

    #[test]
    fn test_non_record_payload_is_malformed() {
        let item = ExtractItem {
            data: Some(serde_json::json!(["not", "an", "object"])),
        };
        let err = FirecrawlScraper::item_to_job("https://a.example/job1", item).unwrap_err();
        assert!(matches!(err, ScrapeError::MalformedPayload { .. }));
    }
}
