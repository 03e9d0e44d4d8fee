//! In-memory accumulation of accepted jobs.

use std::sync::Mutex;

use crate::types::job::AcceptedJob;

/// Accumulates accepted jobs in completion order.
///
/// Under bounded concurrency completion order is not input order; the
/// persister applies a stable sort before serialization, so no ordering
/// is promised here. Uniqueness by URL is guaranteed upstream by the
/// ledger and not re-checked.
#[derive(Debug, Default)]
pub struct ResultCollector {
    jobs: Mutex<Vec<AcceptedJob>>,
}

impl ResultCollector {
    /// Create an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one accepted job.
    pub fn collect(&self, job: AcceptedJob) {
        self.jobs.lock().unwrap().push(job);
    }

    /// Number of jobs collected so far.
    pub fn len(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    /// True when nothing has been collected.
    pub fn is_empty(&self) -> bool {
        self.jobs.lock().unwrap().is_empty()
    }

    /// Consume the collector, yielding the jobs in completion order.
    pub fn into_jobs(self) -> Vec<AcceptedJob> {
        self.jobs.into_inner().unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::job::{AnalysisVerdict, ValidatedJob};
    use chrono::NaiveDate;

    fn accepted(url: &str) -> AcceptedJob {
        AcceptedJob {
            job: ValidatedJob {
                url: url.to_string(),
                title: "Engineer".into(),
                description: "Work".into(),
                posted_at: NaiveDate::from_ymd_opt(2026, 8, 1).unwrap(),
                required_experience: None,
            },
            verdict: AnalysisVerdict::acceptance(3, vec![]),
        }
    }

    #[test]
    fn preserves_completion_order() {
        let collector = ResultCollector::new();
        collector.collect(accepted("https://a.example/2"));
        collector.collect(accepted("https://a.example/1"));

        let urls: Vec<_> = collector
            .into_jobs()
            .into_iter()
            .map(|j| j.job.url)
            .collect();
        assert_eq!(urls, vec!["https://a.example/2", "https://a.example/1"]);
    }
}
