//! Schema validation of scraped records.
//!
//! Local, cheap acceptance checks performed before spending an analysis
//! call: required fields present, posting date parseable and inside the
//! freshness window. Anything that fails routes the URL to a skip
//! terminal.

use std::sync::LazyLock;

use chrono::{Days, NaiveDate};
use regex::Regex;

use crate::error::{ValidationError, ValidationResult};
use crate::types::job::{ScrapedJob, ValidatedJob};

static RELATIVE_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:posted\s+)?(\d{1,4})\s*(minute|hour|day|week|month)s?\s*ago$")
        .expect("relative date pattern is valid")
});

/// Validate one scraped record.
///
/// The record's own resolved URL is authoritative; the scrape adapter
/// has already substituted the requested URL when the service omitted
/// one.
pub fn validate(
    job: ScrapedJob,
    today: NaiveDate,
    freshness_days: i64,
) -> ValidationResult<ValidatedJob> {
    let url = match job.job_url.as_deref().map(str::trim) {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => return Err(ValidationError::MissingUrl),
    };

    let title = match job.job_title.as_deref().map(str::trim) {
        Some(title) if !title.is_empty() => title.to_string(),
        _ => return Err(ValidationError::MissingTitle { url }),
    };

    let description = match job.job_description.as_deref().map(str::trim) {
        Some(description) if !description.is_empty() => description.to_string(),
        _ => return Err(ValidationError::MissingDescription { url }),
    };

    let raw_date = match job.posting_date.as_deref().map(str::trim) {
        Some(value) if !value.is_empty() => value.to_string(),
        _ => return Err(ValidationError::MissingPostingDate { url }),
    };

    let posted_at = parse_posting_date(&raw_date, today).ok_or_else(|| {
        ValidationError::UnparseableDate {
            url: url.clone(),
            value: raw_date.clone(),
        }
    })?;

    if (today - posted_at).num_days() > freshness_days {
        return Err(ValidationError::StalePosting {
            url,
            posted_at,
            max_age_days: freshness_days,
        });
    }

    Ok(ValidatedJob {
        url,
        title,
        description,
        posted_at,
        required_experience: job
            .required_experience
            .filter(|value| !value.trim().is_empty()),
    })
}

/// Parse a posting date as printed on a job board.
///
/// Handles ISO and common absolute formats plus the relative forms
/// boards actually print ("posted 3 days ago", "today", "yesterday").
/// Returns `None` when nothing matches.
pub fn parse_posting_date(value: &str, today: NaiveDate) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let lowered = trimmed.to_lowercase();

    match lowered.as_str() {
        "today" | "just posted" | "just now" | "new" => return Some(today),
        "yesterday" => return today.checked_sub_days(Days::new(1)),
        _ => {}
    }

    if let Some(captures) = RELATIVE_DATE.captures(&lowered) {
        let amount: u64 = captures[1].parse().ok()?;
        let days = match &captures[2] {
            "minute" | "hour" => 0,
            "day" => amount,
            "week" => amount * 7,
            "month" => amount * 30,
            _ => return None,
        };
        return today.checked_sub_days(Days::new(days));
    }

    if let Ok(datetime) = chrono::DateTime::parse_from_rfc3339(trimmed) {
        return Some(datetime.date_naive());
    }

    const FORMATS: &[&str] = &[
        "%Y-%m-%d",
        "%Y/%m/%d",
        "%d/%m/%Y",
        "%B %d, %Y",
        "%b %d, %Y",
        "%d %B %Y",
        "%d %b %Y",
    ];
    for format in FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Some(date);
        }
    }

    None
}
