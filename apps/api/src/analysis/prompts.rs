// Prompt templates for résumé analysis.
// Replace `{role}` with the role label before sending.

/// Recruiter-perspective evaluation.
pub const HR_PROMPT_TEMPLATE: &str = "
You are an experienced Human Resource Manager, your task is to review the provided resume against the job description for a {role}.
Please share your professional evaluation on whether the candidate's profile aligns with the role.
Highlight the strengths and weaknesses of the applicant in relation to the specified job requirements.
";

/// ATS-perspective percentage match. Output order: percentage, missing keywords, final thoughts.
pub const ATS_PROMPT_TEMPLATE: &str = "
As a skilled ATS (Applicant Tracking System) scanner with a deep understanding of data science and ATS functionality,
evaluate the resume against the provided job description for a {role}. Give the percentage match if the resume matches
the job description. First the output should come as a percentage, then keywords missing and last final thoughts.
";

pub const ROLE_PLACEHOLDER: &str = "{role}";
