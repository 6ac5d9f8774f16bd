//! Job board adapters: where to search and how to read a results page.
//!
//! Markup drift on a board only ever requires a new `SelectorConfig`.

use std::path::Path;

use anyhow::Context;
use reqwest::Url;
use serde::{Deserialize, Serialize};

use crate::scraping::ScrapeError;

/// CSS selectors for one board's result list. Field selectors are evaluated
/// relative to each card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectorConfig {
    pub card: String,
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
}

pub trait JobBoardAdapter: Send + Sync {
    fn name(&self) -> &str;
    fn search_url(&self, term: &str) -> Result<Url, ScrapeError>;
    fn selectors(&self) -> &SelectorConfig;
}

/// Adapter defined entirely by data, loadable from a JSON file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfiguredAdapter {
    pub name: String,
    pub base_url: String,
    /// Query parameter that carries the search term.
    pub query_param: String,
    #[serde(default)]
    pub fixed_params: Vec<(String, String)>,
    pub selectors: SelectorConfig,
}

impl ConfiguredAdapter {
    /// US search on Indeed.
    pub fn indeed() -> Self {
        Self {
            name: "indeed".to_string(),
            base_url: "https://www.indeed.com/jobs".to_string(),
            query_param: "q".to_string(),
            fixed_params: vec![("l".to_string(), "United States".to_string())],
            selectors: SelectorConfig {
                card: "#jobsearch-ResultsList > li".to_string(),
                title: "h2.jobTitle a".to_string(),
                company: r#"[data-testid="company-name"]"#.to_string(),
                location: r#"[data-testid="text-location"]"#.to_string(),
                description: ".job-snippet".to_string(),
            },
        }
    }

    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read job board config '{}'", path.display()))?;
        serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse job board config '{}'", path.display()))
    }
}

impl JobBoardAdapter for ConfiguredAdapter {
    fn name(&self) -> &str {
        &self.name
    }

    fn search_url(&self, term: &str) -> Result<Url, ScrapeError> {
        let mut url =
            Url::parse(&self.base_url).map_err(|e| ScrapeError::InvalidUrl(e.to_string()))?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair(&self.query_param, term.trim());
            for (key, value) in &self.fixed_params {
                query.append_pair(key, value);
            }
        }
        Ok(url)
    }

    fn selectors(&self) -> &SelectorConfig {
        &self.selectors
    }
}
