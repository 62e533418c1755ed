// All LLM prompt text for the analysis module.

/// Section header tokens the template asks the model to emit, in order.
pub const MATCH_PERCENTAGE_HEADER: &str = "MATCH_PERCENTAGE:";
pub const MISSING_KEYWORDS_HEADER: &str = "MISSING_KEYWORDS:";
pub const PROFILE_SUMMARY_HEADER: &str = "PROFILE_SUMMARY:";

/// Fills the ATS evaluation template with the résumé excerpt and job description.
///
/// Interpolation is raw and single-pass: neither input is escaped, and
/// placeholder-like text inside one input is never expanded by the other.
pub fn compose_prompt(resume_text: &str, job_description: &str) -> String {
    format!(
        r#"
As an experienced ATS (Applicant Tracking System), proficient in the technical domain encompassing
Software Engineering, Data Science, Data Analysis, Big Data Engineering, Web Developer, Mobile App
Developer, Devops Engineer, Machine Learning Engineer, Cybersecurity Analyst, Cloud Solutions Architect,
Database Administrator, Network Engineer, AI Engineer, Systems Analyst, Full Stack Developer, UI/UX
Designer, IT Project Manager, and additional specialized areas, your objective is to meticulously assess
resumes against provided job descriptions. Assign precise matching percentages and identify missing keywords.

resume: {resume_text}
description: {job_description}

I want the response in the following structure and nothing else:
{MATCH_PERCENTAGE_HEADER}
<MATCH PERCENTAGE>

{MISSING_KEYWORDS_HEADER}
<comma-separated keywords>

{PROFILE_SUMMARY_HEADER}
<A concise summary highlighting skills and experience>
"#
    )
}
