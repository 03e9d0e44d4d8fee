//! Analyzer trait for relevance judgments.
//!
//! The judgment capability is opaque free-form reasoning over text; this
//! trait pins down its input/output contract only. Implementations must
//! tolerate malformed output from the underlying capability — see
//! [`crate::analyzer::repair`] for the recovery stage — and must never
//! fabricate a verdict when nothing can be recovered.

use async_trait::async_trait;

use crate::error::AnalysisResult;
use crate::types::criteria::SearchCriteria;
use crate::types::job::{AnalysisVerdict, ValidatedJob};

/// Analyzer trait for judging a validated record against search criteria.
///
/// The judgment policy implementations are expected to apply:
/// - Inclusion by similarity: records in a closely related domain or
///   using closely related tools to the required stack are accepted;
///   clearly different stacks are rejected.
/// - Experience ceiling: postings demanding more experience than the
///   user states are rejected.
/// - Freshness: postings older than the window are rejected, as a second
///   line of defense behind the validator.
#[async_trait]
pub trait JobAnalyzer: Send + Sync {
    /// Judge one validated record. An accepting verdict carries a rank
    /// in 1..=5 plus supporting notes; notes feed the report, never
    /// pipeline control.
    async fn analyze(
        &self,
        job: &ValidatedJob,
        criteria: &SearchCriteria,
    ) -> AnalysisResult<AnalysisVerdict>;

    /// Get the analyzer name (for logging/debugging).
    fn name(&self) -> &str {
        "unknown"
    }
}
