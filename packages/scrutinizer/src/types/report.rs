//! The persisted result set.
//!
//! Field names follow the report stage's input contract
//! (`step_3_job_scrutinizer_results.json`), so the downstream renderer can
//! consume the file unchanged.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use crate::types::job::AcceptedJob;

/// One accepted job as it appears in the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedJob {
    pub matches_user_req: bool,
    pub job_title: String,
    pub job_description: String,
    pub job_url: String,
    pub agent_recommendation_rank: Option<u8>,
    pub agent_recommendation_notes: Vec<String>,
}

impl From<&AcceptedJob> for ReportedJob {
    fn from(accepted: &AcceptedJob) -> Self {
        Self {
            matches_user_req: accepted.verdict.matches,
            job_title: accepted.job.title.clone(),
            job_description: accepted.job.description.clone(),
            job_url: accepted.job.url.clone(),
            agent_recommendation_rank: accepted.verdict.rank,
            agent_recommendation_notes: accepted.verdict.notes.clone(),
        }
    }
}

/// The full result set, as serialized to the output file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobReport {
    pub jobs: Vec<ReportedJob>,
}

impl JobReport {
    /// Build a report from collected jobs, applying the stable output
    /// ordering: best rank first, ties broken by URL. Collection order is
    /// completion order and therefore not reproducible; sorting here makes
    /// persisting the same set twice byte-identical.
    pub fn from_accepted(accepted: &[AcceptedJob]) -> Self {
        let mut jobs: Vec<ReportedJob> = accepted.iter().map(ReportedJob::from).collect();
        jobs.sort_by(|a, b| {
            (Reverse(a.agent_recommendation_rank), &a.job_url)
                .cmp(&(Reverse(b.agent_recommendation_rank), &b.job_url))
        });
        Self { jobs }
    }

    /// Number of jobs in the report.
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    /// True when no job qualified.
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
