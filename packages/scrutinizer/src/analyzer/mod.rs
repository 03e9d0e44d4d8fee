//! Relevance analysis: judgment client, prompts, and verdict recovery.
//!
//! The judgment capability returns either a structured verdict or raw
//! text. Parsing is a shared, explicit contract: [`parse_verdict`] first
//! tries the text as-is, then hands it to the [`repair`] stage, and only
//! then gives up — malformed output is never silently dropped and a
//! verdict is never fabricated.

pub mod openai;
pub mod prompts;
pub mod repair;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, AnalysisResult};
use crate::types::job::AnalysisVerdict;

pub use openai::OpenAiAnalyzer;

/// Wire shape of a verdict as emitted by the judgment capability.
///
/// Accepts both the compact form (`matches`/`rank`/`notes`) and the
/// report-style field names, since models echo whichever schema the
/// prompt mentions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerdictPayload {
    #[serde(alias = "matches_user_req")]
    pub matches: bool,

    #[serde(default, alias = "agent_recommendation_rank")]
    pub rank: Option<i64>,

    #[serde(default, alias = "agent_recommendation_notes")]
    pub notes: Vec<String>,
}

/// Parse raw judgment output into a verdict, repairing if necessary.
pub fn parse_verdict(raw: &str, url: &str) -> AnalysisResult<AnalysisVerdict> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(AnalysisError::EmptyResponse {
            url: url.to_string(),
        });
    }

    let payload = match serde_json::from_str::<VerdictPayload>(trimmed) {
        Ok(payload) => payload,
        Err(_) => {
            tracing::warn!(url = %url, "verdict not well-formed, attempting repair");
            repair::recover_payload(raw).ok_or_else(|| AnalysisError::UnparseableVerdict {
                url: url.to_string(),
            })?
        }
    };

    payload_into_verdict(payload, url)
}

/// Enforce verdict hygiene: an accepting verdict must carry a rank in
/// 1..=5; a rejecting verdict carries no rank at all.
fn payload_into_verdict(payload: VerdictPayload, url: &str) -> AnalysisResult<AnalysisVerdict> {
    if !payload.matches {
        return Ok(AnalysisVerdict {
            matches: false,
            rank: None,
            notes: payload.notes,
        });
    }

    match payload.rank {
        Some(rank @ 1..=5) => Ok(AnalysisVerdict {
            matches: true,
            rank: Some(rank as u8),
            notes: payload.notes,
        }),
        other => Err(AnalysisError::InvalidRank {
            url: url.to_string(),
            rank: other.unwrap_or(0),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_well_formed_verdict() {
        let verdict =
            parse_verdict(r#"{"matches": true, "rank": 4, "notes": ["good fit"]}"#, "u").unwrap();
        assert!(verdict.matches);
        assert_eq!(verdict.rank, Some(4));
        assert_eq!(verdict.notes, vec!["good fit"]);
    }

    #[test]
    fn accepts_report_style_field_names() {
        let verdict = parse_verdict(
            r#"{"matches_user_req": true, "agent_recommendation_rank": 2, "agent_recommendation_notes": ["ok"]}"#,
            "u",
        )
        .unwrap();
        assert_eq!(verdict.rank, Some(2));
    }

    #[test]
    fn rejection_drops_rank() {
        let verdict = parse_verdict(r#"{"matches": false, "rank": 5}"#, "u").unwrap();
        assert!(!verdict.matches);
        assert_eq!(verdict.rank, None);
    }

    #[test]
    fn match_without_rank_is_invalid() {
        let err = parse_verdict(r#"{"matches": true}"#, "u").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRank { rank: 0, .. }));
    }

    #[test]
    fn out_of_range_rank_is_invalid() {
        let err = parse_verdict(r#"{"matches": true, "rank": 9}"#, "u").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidRank { rank: 9, .. }));
    }

    #[test]
    fn empty_text_is_empty_response() {
        let err = parse_verdict("   ", "u").unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyResponse { .. }));
    }

    #[test]
    fn garbage_without_payload_is_unparseable() {
        let err = parse_verdict("no json here at all", "u").unwrap_err();
        assert!(matches!(err, AnalysisError::UnparseableVerdict { .. }));
    }
}
