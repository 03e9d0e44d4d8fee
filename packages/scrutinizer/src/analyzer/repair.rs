//! Best-effort recovery of a verdict embedded in malformed output.
//!
//! Free-form judgment output is unreliable: models wrap JSON in prose,
//! markdown fences, or `<think>` scratchpads. Given text containing one
//! structurally valid verdict payload plus extraneous characters, this
//! stage must recover exactly that payload; given no recoverable payload
//! it reports failure by returning `None` — it never invents one.

use std::sync::LazyLock;

use regex::Regex;

use crate::analyzer::VerdictPayload;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(.*?)```").expect("fence pattern is valid")
});

/// Try to recover a verdict payload from raw judgment output.
///
/// Order of attempts:
/// 1. the whole text,
/// 2. the contents of each markdown code fence,
/// 3. every balanced `{...}` object found in the text, left to right.
pub fn recover_payload(raw: &str) -> Option<VerdictPayload> {
    let trimmed = raw.trim();
    if let Ok(payload) = serde_json::from_str(trimmed) {
        return Some(payload);
    }

    for captures in FENCED_BLOCK.captures_iter(raw) {
        if let Some(block) = captures.get(1) {
            if let Some(payload) = parse_candidate(block.as_str()) {
                return Some(payload);
            }
        }
    }

    for candidate in balanced_objects(raw) {
        if let Some(payload) = parse_candidate(candidate) {
            return Some(payload);
        }
    }

    None
}

fn parse_candidate(text: &str) -> Option<VerdictPayload> {
    serde_json::from_str(text.trim()).ok()
}

/// Yield every balanced top-level-or-nested `{...}` slice in the text.
///
/// Brace matching is string-aware so braces inside JSON strings do not
/// confuse the scan. Inputs are single LLM responses, so the quadratic
/// worst case is irrelevant.
fn balanced_objects(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut candidates = Vec::new();

    for (start, &byte) in bytes.iter().enumerate() {
        if byte != b'{' {
            continue;
        }
        if let Some(end) = matching_brace(bytes, start) {
            candidates.push(&text[start..=end]);
        }
    }

    candidates
}

/// Index of the brace closing the object that opens at `start`.
fn matching_brace(bytes: &[u8], start: usize) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, &byte) in bytes[start..].iter().enumerate() {
        if in_string {
            match byte {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match byte {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(start + offset);
                }
            }
            _ => {}
        }
    }

    None
}
