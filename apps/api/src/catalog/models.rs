use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::analysis::models::CareerDomain;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    pub id: String,
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(default)]
    pub description: String,
    /// Ordered; duplicates allowed.
    #[serde(default)]
    pub required_skills: Vec<String>,
}

/// A posting plus its skill gap against one candidate.
///
/// `matching_skills` and `missing_skills` partition `required_skills`, both
/// in the order the posting lists them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedJob {
    #[serde(flatten)]
    pub posting: JobPosting,
    pub matching_skills: Vec<String>,
    pub missing_skills: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogSource {
    Static,
    Scraped,
}

/// Immutable snapshot of postings keyed by domain.
#[derive(Debug, Clone)]
pub struct JobCatalog {
    postings: HashMap<CareerDomain, Vec<JobPosting>>,
    refreshed_at: DateTime<Utc>,
    source: CatalogSource,
}

impl JobCatalog {
    pub fn new(postings: HashMap<CareerDomain, Vec<JobPosting>>, source: CatalogSource) -> Self {
        Self {
            postings,
            refreshed_at: Utc::now(),
            source,
        }
    }

    /// Parses a JSON object keyed by domain display value. Keys that are not
    /// known domains are skipped with a warning.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<String, Vec<JobPosting>> = serde_json::from_str(json)?;
        let mut postings = HashMap::new();

        for (key, jobs) in raw {
            match key.parse::<CareerDomain>() {
                Ok(domain) => {
                    postings.insert(domain, jobs);
                }
                Err(e) => warn!("Skipping catalog section: {e}"),
            }
        }

        Ok(Self::new(postings, CatalogSource::Static))
    }

    pub fn postings(&self, domain: CareerDomain) -> Option<&[JobPosting]> {
        self.postings.get(&domain).map(Vec::as_slice)
    }

    pub fn posting_count(&self) -> usize {
        self.postings.values().map(Vec::len).sum()
    }

    pub fn refreshed_at(&self) -> DateTime<Utc> {
        self.refreshed_at
    }

    pub fn source(&self) -> CatalogSource {
        self.source
    }

    /// Every distinct required skill, first spelling wins, in domain then posting order.
    pub fn skill_vocabulary(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        CareerDomain::ALL
            .iter()
            .filter_map(|domain| self.postings.get(domain))
            .flatten()
            .flat_map(|posting| posting.required_skills.iter())
            .map(|skill| skill.trim())
            .filter(|skill| !skill.is_empty() && seen.insert(skill.to_lowercase()))
            .map(String::from)
            .collect()
    }
}
