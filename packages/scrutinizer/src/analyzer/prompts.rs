//! Prompts for the relevance judgment.

use crate::types::criteria::SearchCriteria;
use crate::types::job::ValidatedJob;

/// Cap on description text sent to the judgment capability. Postings
/// occasionally embed entire career pages; everything past this adds
/// cost without changing the verdict.
const MAX_DESCRIPTION_CHARS: usize = 6000;

/// System prompt framing the judgment.
pub const ANALYZE_SYSTEM_PROMPT: &str = "You are an expert job scrutinizer with deep knowledge of various industries and job roles. You judge whether a single job posting suits a specific job seeker and answer only in JSON.";

/// Template for the per-posting judgment request.
///
/// Decision policy spelled out for the model:
/// - Inclusion by similarity, not exact match: a posting in a closely
///   related domain or using closely related tools to the required stack
///   counts as a match (for example a comparable framework in the same
///   family). A posting in a clearly different domain or stack does not:
///   if the seeker wants NodeJS and the posting is C#/.NET, reject it.
/// - Reject postings whose stated or implied experience requirement
///   exceeds the seeker's years of experience.
/// - Reject postings older than the freshness window.
pub const ANALYZE_PROMPT: &str = r#"Evaluate whether this job posting suits the job seeker below.

Job seeker profile:
- Target roles: {job_titles}
- Preferred skills: {skills}
- Experience level: {experience_level}{years_clause}
- Preferred locations: {locations}
- Remote preference: {remote_preference}

Job posting:
- Title: {title}
- URL: {url}
- Posted: {posted_at}
- Stated experience requirement: {required_experience}
- Description:
{description}

Rules:
1. Accept postings in a closely related domain or built on closely related tools to the preferred skills, even without an exact match. Reject postings in a clearly different domain or stack.
2. Reject the posting if its experience requirement exceeds the seeker's stated experience.
3. Reject the posting if it is older than {freshness_days} days.
4. Rank accepted postings 1-5 (higher is better) and explain your reasoning in short notes.

Respond with ONLY a JSON object, no markdown, no extra text:
{"matches": true or false, "rank": 1-5 (only when matches is true), "notes": ["..."]}"#;

/// Render the judgment prompt for one posting.
pub fn format_analyze_prompt(
    job: &ValidatedJob,
    criteria: &SearchCriteria,
    freshness_days: i64,
) -> String {
    let years_clause = criteria
        .min_years_experience
        .map(|years| format!(" ({years} years)"))
        .unwrap_or_default();

    let description: String = job.description.chars().take(MAX_DESCRIPTION_CHARS).collect();

    ANALYZE_PROMPT
        .replace("{job_titles}", &join_or(&criteria.job_title, "any"))
        .replace("{skills}", &join_or(&criteria.preferred_skills, "unspecified"))
        .replace(
            "{experience_level}",
            or_default(&criteria.experience_level, "unspecified"),
        )
        .replace("{years_clause}", &years_clause)
        .replace("{locations}", &join_or(&criteria.locations, "anywhere"))
        .replace(
            "{remote_preference}",
            or_default(&criteria.remote_preference, "any"),
        )
        .replace("{title}", &job.title)
        .replace("{url}", &job.url)
        .replace("{posted_at}", &job.posted_at.to_string())
        .replace(
            "{required_experience}",
            job.required_experience.as_deref().unwrap_or("not stated"),
        )
        .replace("{description}", &description)
        .replace("{freshness_days}", &freshness_days.to_string())
}

fn join_or(items: &[String], fallback: &str) -> String {
    if items.is_empty() {
        fallback.to_string()
    } else {
        items.join(", ")
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}
