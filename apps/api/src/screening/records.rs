use serde::{Deserialize, Serialize};

/// The three-field record distilled from one model reply.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub candidate_name: String,
    pub score: String,
    pub reason: String,
}

/// One screened resume: the parsed record tagged with its source file.
/// Serialized in camelCase for frontend consumers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub file_name: String,
    pub candidate_name: String,
    pub score: String,
    pub reason: String,
}

impl AnalysisResult {
    pub fn from_record(file_name: impl Into<String>, record: ScoreRecord) -> Self {
        Self {
            file_name: file_name.into(),
            candidate_name: record.candidate_name,
            score: record.score,
            reason: record.reason,
        }
    }

    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::classify(&self.score)
    }
}

/// Display bucket for a free-form score label. Scores stay free-form strings
/// end to end; bands only drive presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Good,
    Average,
    NotQualified,
    Overqualified,
    Error,
}

impl ScoreBand {
    /// Buckets a score label. Lowercases, collapses each whitespace run to a
    /// single hyphen (no trimming), and routes anything containing "error"
    /// to the error bucket before exact-label matching. Unrecognized labels
    /// also land in the error bucket.
    pub fn classify(score: &str) -> ScoreBand {
        let normalized = normalize_label(score);
        if normalized.contains("error") {
            return ScoreBand::Error;
        }
        match normalized.as_str() {
            "excellent" => ScoreBand::Excellent,
            "good" => ScoreBand::Good,
            "average" => ScoreBand::Average,
            "not-qualified" => ScoreBand::NotQualified,
            "overqualified" => ScoreBand::Overqualified,
            _ => ScoreBand::Error,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "excellent",
            ScoreBand::Good => "good",
            ScoreBand::Average => "average",
            ScoreBand::NotQualified => "not-qualified",
            ScoreBand::Overqualified => "overqualified",
            ScoreBand::Error => "error",
        }
    }
}

fn normalize_label(score: &str) -> String {
    let mut out = String::with_capacity(score.len());
    let mut in_whitespace = false;
    for ch in score.to_lowercase().chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                out.push('-');
                in_whitespace = true;
            }
        } else {
            out.push(ch);
            in_whitespace = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_labels_classify() {
        assert_eq!(ScoreBand::classify("Excellent"), ScoreBand::Excellent);
        assert_eq!(ScoreBand::classify("Good"), ScoreBand::Good);
        assert_eq!(ScoreBand::classify("Average"), ScoreBand::Average);
        assert_eq!(ScoreBand::classify("Not Qualified"), ScoreBand::NotQualified);
        assert_eq!(
            ScoreBand::classify("Overqualified"),
            ScoreBand::Overqualified
        );
    }

    #[test]
    fn test_whitespace_runs_collapse_to_one_hyphen() {
        assert_eq!(
            ScoreBand::classify("NOT   \tQualified"),
            ScoreBand::NotQualified
        );
    }

    #[test]
    fn test_error_substring_wins_over_exact_match() {
        assert_eq!(
            ScoreBand::classify("Error - Text Extraction Failed"),
            ScoreBand::Error
        );
        assert_eq!(ScoreBand::classify("Analysis Error"), ScoreBand::Error);
    }

    #[test]
    fn test_unrecognized_label_buckets_as_error() {
        assert_eq!(ScoreBand::classify("Strong Match"), ScoreBand::Error);
        assert_eq!(ScoreBand::classify(""), ScoreBand::Error);
    }

    #[test]
    fn test_surrounding_whitespace_is_not_trimmed() {
        // " Good " normalizes to "-good-", which matches nothing.
        assert_eq!(ScoreBand::classify(" Good "), ScoreBand::Error);
    }

    #[test]
    fn test_result_merges_record_with_file_name() {
        let record = ScoreRecord {
            candidate_name: "Ada Lovelace".to_string(),
            score: "Excellent".to_string(),
            reason: "Deep systems background.".to_string(),
        };
        let result = AnalysisResult::from_record("ada.pdf", record);

        assert_eq!(result.file_name, "ada.pdf");
        assert_eq!(result.candidate_name, "Ada Lovelace");
        assert_eq!(result.score_band(), ScoreBand::Excellent);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let result = AnalysisResult {
            file_name: "cv.pdf".to_string(),
            candidate_name: "Unknown".to_string(),
            score: "Average".to_string(),
            reason: "Partial overlap.".to_string(),
        };
        let json = serde_json::to_value(&result).unwrap();

        assert_eq!(json["fileName"], "cv.pdf");
        assert_eq!(json["candidateName"], "Unknown");
    }
}
