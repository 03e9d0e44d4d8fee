//! Structured search criteria produced by the requirements-analysis stage.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, PipelineResult};

/// The structured output contract of the requirements-analysis stage.
///
/// The pipeline never derives these fields itself; it reads them from the
/// prior stage's persisted JSON and hands them to the relevance analyzer
/// verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Primary job titles/roles the user is after
    #[serde(default)]
    pub job_title: Vec<String>,

    /// Nice-to-have skills
    #[serde(default)]
    pub preferred_skills: Vec<String>,

    /// Fresh/Junior/Mid/Senior/Lead
    #[serde(default)]
    pub experience_level: String,

    /// The user's stated years of experience; postings demanding more
    /// than this are rejected by the analyzer
    #[serde(default)]
    pub min_years_experience: Option<u32>,

    /// Preferred locations
    #[serde(default)]
    pub locations: Vec<String>,

    /// remote/hybrid/onsite/any
    #[serde(default)]
    pub remote_preference: String,

    /// User-specified websites to prioritize
    #[serde(default)]
    pub specified_websites: Vec<String>,

    /// Query strings the search stage executed
    #[serde(default)]
    pub search_queries: Vec<String>,
}

impl SearchCriteria {
    /// Load criteria from the requirements-analysis results file.
    pub async fn load(path: impl AsRef<Path>) -> PipelineResult<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| PipelineError::Input {
                path: path.to_path_buf(),
                source,
            })?;
        serde_json::from_str(&text).map_err(|source| PipelineError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// One-line description of the target role, for prompts and logs.
    pub fn role_summary(&self) -> String {
        if self.job_title.is_empty() {
            "any role".to_string()
        } else {
            self.job_title.join(" / ")
        }
    }
}
