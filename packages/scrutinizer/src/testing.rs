//! Testing utilities including mock implementations.
//!
//! Useful for exercising the pipeline without real extraction or
//! judgment calls. The mock analyzer can return raw text, which flows
//! through the same parse-and-repair path as production output, so
//! malformed-output behavior is testable end to end.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::analyzer::parse_verdict;
use crate::error::{AnalysisError, AnalysisResult};
use crate::traits::analyzer::JobAnalyzer;
use crate::types::criteria::SearchCriteria;
use crate::types::job::{AnalysisVerdict, ValidatedJob};

pub use crate::scrapers::mock::{MockScrape, MockScraper};

/// A canned analysis outcome for one URL.
#[derive(Debug, Clone)]
pub enum MockAnalysis {
    /// Return this verdict directly
    Verdict(AnalysisVerdict),
    /// Return this raw text, routed through parse-and-repair
    RawText(String),
    /// Simulate a service failure with this message
    Fail(String),
}

/// Mock analyzer for testing.
///
/// # Example
///
/// ```rust
/// use scrutinizer::testing::{MockAnalysis, MockAnalyzer};
/// use scrutinizer::types::AnalysisVerdict;
///
/// let mock = MockAnalyzer::new().with_analysis(
///     "https://a.example/job1",
///     MockAnalysis::Verdict(AnalysisVerdict::acceptance(4, vec!["good fit".into()])),
/// );
/// ```
#[derive(Default)]
pub struct MockAnalyzer {
    outcomes: Arc<RwLock<HashMap<String, MockAnalysis>>>,
    calls: Arc<RwLock<Vec<String>>>,
}

impl MockAnalyzer {
    /// Create a new empty mock analyzer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an outcome for a URL.
    pub fn add_analysis(&self, url: impl Into<String>, outcome: MockAnalysis) {
        self.outcomes.write().unwrap().insert(url.into(), outcome);
    }

    /// Register an outcome for a URL (builder pattern).
    pub fn with_analysis(self, url: impl Into<String>, outcome: MockAnalysis) -> Self {
        self.add_analysis(url, outcome);
        self
    }

    /// URLs analyzed so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    /// Clear recorded calls.
    pub fn reset_calls(&self) {
        self.calls.write().unwrap().clear();
    }
}

impl Clone for MockAnalyzer {
    fn clone(&self) -> Self {
        Self {
            outcomes: Arc::clone(&self.outcomes),
            calls: Arc::clone(&self.calls),
        }
    }
}

#[async_trait]
impl JobAnalyzer for MockAnalyzer {
    async fn analyze(
        &self,
        job: &ValidatedJob,
        _criteria: &SearchCriteria,
    ) -> AnalysisResult<AnalysisVerdict> {
        self.calls.write().unwrap().push(job.url.clone());

        let outcome = self.outcomes.read().unwrap().get(&job.url).cloned();
        match outcome {
            Some(MockAnalysis::Verdict(verdict)) => Ok(verdict),
            Some(MockAnalysis::RawText(raw)) => parse_verdict(&raw, &job.url),
            Some(MockAnalysis::Fail(message)) => Err(AnalysisError::Service(message.into())),
            None => Err(AnalysisError::Service(
                format!("no canned outcome for {}", job.url).into(),
            )),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
