//! Resume analysis prompt template.

pub const ANALYSIS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume text and provide a detailed analysis strictly in JSON format.

The JSON object must contain exactly these keys:
- "domain": a string, which MUST be one of: {domains}
- "skills": an array of strings naming the concrete skills, tools and technologies the candidate demonstrates
- "suggestions": an array of strings with actionable advice for improving the resume

Do not return any text, markdown, or explanation outside of the single JSON object.

Resume Text:
"""{resume_text}""""#;

/// Fills the template with the allowed domains and the resume text.
pub fn build_analysis_prompt(resume_text: &str, domains: &[&str]) -> String {
    ANALYSIS_PROMPT_TEMPLATE
        .replace("{domains}", &domains.join(", "))
        .replace("{resume_text}", resume_text)
}
