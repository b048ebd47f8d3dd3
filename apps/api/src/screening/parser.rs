//! Reply parser — distills a semi-structured model reply into a `ScoreRecord`.
//!
//! Total by construction: every input maps to a record. Bad JSON degrades to
//! an error-scored record instead of failing the batch.

use serde_json::Value;

use crate::screening::records::ScoreRecord;

const PARSE_FAILURE_REASON: &str =
    "Failed to parse AI response. This might indicate an issue with the analysis service.";

/// Parses a raw model reply into the three-field record.
///
/// Models pad JSON with prose and code fences, so this first carves out the
/// span from the first `{` to the last `}` (falling back to the whole reply
/// when no such span exists) and then reads the three fields individually,
/// defaulting each one that is absent, null, non-string, or empty.
pub fn parse_score_record(raw: &str) -> ScoreRecord {
    match serde_json::from_str::<Value>(candidate_json(raw)) {
        Ok(value) => ScoreRecord {
            candidate_name: string_field(&value, "candidate_name", "Unknown"),
            score: string_field(&value, "score", "Unknown"),
            reason: string_field(&value, "reason", "No reason provided"),
        },
        Err(err) => {
            tracing::warn!(error = %err, "Model reply was not valid JSON");
            ScoreRecord {
                candidate_name: "Unknown".to_string(),
                score: "Error - JSON Parse Failed".to_string(),
                reason: PARSE_FAILURE_REASON.to_string(),
            }
        }
    }
}

/// The widest `{...}` span in the reply. Greedy on purpose: replies carry at
/// most one JSON object, and trailing prose rarely contains a closing brace.
fn candidate_json(raw: &str) -> &str {
    match (raw.find('{'), raw.rfind('}')) {
        (Some(start), Some(end)) if start < end => &raw[start..=end],
        _ => raw,
    }
}

fn string_field(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
        .to_string()
}
