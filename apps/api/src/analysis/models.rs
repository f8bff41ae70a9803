use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Roles offered in the role selector. The label is what the prompt sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobRole {
    SoftwareEngineer,
    #[serde(rename = "genai")]
    GenAi,
    DataScientist,
    ProductManager,
    Designer,
    MarketingSpecialist,
}

impl JobRole {
    pub const ALL: [JobRole; 6] = [
        JobRole::SoftwareEngineer,
        JobRole::GenAi,
        JobRole::DataScientist,
        JobRole::ProductManager,
        JobRole::Designer,
        JobRole::MarketingSpecialist,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            JobRole::SoftwareEngineer => "Software Engineer",
            JobRole::GenAi => "GenAI",
            JobRole::DataScientist => "Data Scientist",
            JobRole::ProductManager => "Product Manager",
            JobRole::Designer => "Designer",
            JobRole::MarketingSpecialist => "Marketing Specialist",
        }
    }

    /// Form value used by the page's `<select>`.
    pub fn slug(&self) -> &'static str {
        match self {
            JobRole::SoftwareEngineer => "software_engineer",
            JobRole::GenAi => "genai",
            JobRole::DataScientist => "data_scientist",
            JobRole::ProductManager => "product_manager",
            JobRole::Designer => "designer",
            JobRole::MarketingSpecialist => "marketing_specialist",
        }
    }

    /// Accepts either the slug or the display label, case-insensitively.
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|role| {
            role.slug().eq_ignore_ascii_case(value) || role.label().eq_ignore_ascii_case(value)
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnalysisMode {
    /// Recruiter-style evaluation of strengths and weaknesses.
    #[serde(rename = "hr")]
    Hr,
    /// Percentage match, missing keywords, final thoughts.
    #[serde(rename = "ats")]
    Ats,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 2] = [AnalysisMode::Hr, AnalysisMode::Ats];

    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::Hr => "HR Manager Perspective",
            AnalysisMode::Ats => "ATS Scanner Perspective",
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            AnalysisMode::Hr => "hr",
            AnalysisMode::Ats => "ats",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL.into_iter().find(|mode| {
            mode.slug().eq_ignore_ascii_case(value) || mode.label().eq_ignore_ascii_case(value)
        })
    }
}

/// What the user asked for. The résumé travels separately as raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// May be empty; the job description field is optional.
    pub job_description: String,
    pub role: JobRole,
    pub mode: AnalysisMode,
}

/// Model output, shown verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AnalysisResult(pub String);

impl AnalysisResult {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub analysis: AnalysisResult,
    pub role: JobRole,
    pub mode: AnalysisMode,
    pub model: String,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct OptionEntry {
    pub slug: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub roles: Vec<OptionEntry>,
    pub modes: Vec<OptionEntry>,
}

impl OptionsResponse {
    pub fn current() -> Self {
        Self {
            roles: JobRole::ALL
                .iter()
                .map(|r| OptionEntry {
                    slug: r.slug(),
                    label: r.label(),
                })
                .collect(),
            modes: AnalysisMode::ALL
                .iter()
                .map(|m| OptionEntry {
                    slug: m.slug(),
                    label: m.label(),
                })
                .collect(),
        }
    }
}
