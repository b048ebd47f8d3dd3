// Prompt constants for the screening engine.

/// Analysis prompt template. Replace `{job_description}`, `{file_name}`, and
/// `{resume_text}` before sending. Instructs the model to reply with a JSON
/// object carrying exactly candidate_name, score, and reason.
pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"
Compare this resume to the following job description and provide a detailed analysis:

Job Description:
{job_description}

Resume (File: {file_name}):
{resume_text}

IMPORTANT: Only analyze the actual content provided. If the resume content seems incomplete or problematic, mention this in your analysis.

Please analyze the candidate's qualifications and return the result strictly in valid JSON format with the following keys:
- candidate_name (string, extract from resume if possible, otherwise "Unknown")
- score (one of: "Not Qualified", "Average", "Good", "Excellent", "Overqualified")
- reason (string, maximum 3 sentences explaining the score)

Focus on:
- Relevant skills and experience
- Education alignment
- Years of experience
- Technical competencies
- Overall fit for the role

If the resume content appears incomplete or problematic, reflect this in your scoring and reasoning.
"#;

pub fn build_analysis_prompt(job_description: &str, resume_text: &str, file_name: &str) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{job_description}", job_description)
        .replace("{file_name}", file_name)
        .replace("{resume_text}", resume_text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_are_substituted() {
        let prompt = build_analysis_prompt(
            "Senior Rust engineer, 5+ years.",
            "Jane Doe. Rust since 2016.",
            "jane_doe.pdf",
        );

        assert!(prompt.contains("Job Description:\nSenior Rust engineer, 5+ years."));
        assert!(prompt.contains("Resume (File: jane_doe.pdf):\nJane Doe. Rust since 2016."));
        assert!(!prompt.contains("{job_description}"));
        assert!(!prompt.contains("{file_name}"));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_template_pins_the_output_contract() {
        assert!(ANALYSIS_PROMPT_TEMPLATE.contains("strictly in valid JSON format"));
        assert!(ANALYSIS_PROMPT_TEMPLATE.contains(
            r#"score (one of: "Not Qualified", "Average", "Good", "Excellent", "Overqualified")"#
        ));
        assert!(ANALYSIS_PROMPT_TEMPLATE.contains("maximum 3 sentences"));
    }
}
