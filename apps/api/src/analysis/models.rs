use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Skill reported when the reasoning service output could not be used.
pub const FALLBACK_SKILL: &str = "AI Analysis Error";

const FALLBACK_SUGGESTION: &str =
    "The AI model could not process the request. Please check server logs.";

/// Closed set of career fields. Keys the job catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum CareerDomain {
    SoftwareDevelopment,
    DataScience,
    ProjectManagement,
    Cybersecurity,
    UiUxDesign,
}

impl CareerDomain {
    pub const ALL: [CareerDomain; 5] = [
        CareerDomain::SoftwareDevelopment,
        CareerDomain::DataScience,
        CareerDomain::ProjectManagement,
        CareerDomain::Cybersecurity,
        CareerDomain::UiUxDesign,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CareerDomain::SoftwareDevelopment => "Software Development",
            CareerDomain::DataScience => "Data Science",
            CareerDomain::ProjectManagement => "Project Management",
            CareerDomain::Cybersecurity => "Cybersecurity",
            CareerDomain::UiUxDesign => "UI/UX Design",
        }
    }
}

impl fmt::Display for CareerDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a known career domain")]
pub struct UnknownDomain(pub String);

impl FromStr for CareerDomain {
    type Err = UnknownDomain;

    /// Case-insensitive and whitespace-trimmed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        CareerDomain::ALL
            .into_iter()
            .find(|d| d.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownDomain(wanted.to_string()))
    }
}

impl From<CareerDomain> for String {
    fn from(domain: CareerDomain) -> Self {
        domain.as_str().to_string()
    }
}

impl TryFrom<String> for CareerDomain {
    type Error = UnknownDomain;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Structured career profile derived from a resume.
///
/// Always well-formed once it leaves the analysis client: `domain` is a known
/// value and both lists are present (possibly empty).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub domain: CareerDomain,
    pub skills: Vec<String>,
    pub suggestions: Vec<String>,
}

impl AnalysisResult {
    /// The deterministic analysis substituted for any unusable AI response.
    pub fn fallback() -> Self {
        Self {
            domain: CareerDomain::SoftwareDevelopment,
            skills: vec![FALLBACK_SKILL.to_string()],
            suggestions: vec![FALLBACK_SUGGESTION.to_string()],
        }
    }

    pub fn is_fallback(&self) -> bool {
        *self == Self::fallback()
    }
}
