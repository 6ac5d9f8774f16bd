//! Catalog Refresher: periodically rebuilds the catalog from a job board.
//!
//! Runs on its own task, never on a request path. Each pass scrapes every
//! domain, tags scraped postings with skills from the seed catalog's vocabulary
//! and swaps in the new snapshot in one step. Domains that scraped nothing keep
//! their previous postings.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::info;

use crate::analysis::models::CareerDomain;
use crate::catalog::models::{CatalogSource, JobCatalog, JobPosting};
use crate::catalog::store::CatalogStore;
use crate::scraping::{JobBoardAdapter, JobBoardScraper};

pub struct CatalogRefresher {
    store: Arc<CatalogStore>,
    scraper: JobBoardScraper,
    adapter: Arc<dyn JobBoardAdapter>,
    /// Captured from the catalog at construction; scraped snapshots only carry
    /// the skills they happened to mention.
    vocabulary: Vec<String>,
}

impl CatalogRefresher {
    pub fn new(
        store: Arc<CatalogStore>,
        scraper: JobBoardScraper,
        adapter: Arc<dyn JobBoardAdapter>,
    ) -> Self {
        let vocabulary = store.snapshot().skill_vocabulary();
        Self {
            store,
            scraper,
            adapter,
            vocabulary,
        }
    }

    /// Runs one refresh pass. Returns the number of scraped postings swapped in.
    pub async fn refresh_once(&self) -> usize {
        let previous = self.store.snapshot();
        let mut postings = HashMap::new();
        let mut scraped_total = 0;

        for domain in CareerDomain::ALL {
            let scraped = self
                .scraper
                .scrape(domain.as_str(), self.adapter.as_ref())
                .await;

            if scraped.is_empty() {
                if let Some(existing) = previous.postings(domain) {
                    postings.insert(domain, existing.to_vec());
                }
                continue;
            }

            scraped_total += scraped.len();
            let tagged = scraped
                .into_iter()
                .map(|posting| tag_required_skills(posting, &self.vocabulary))
                .collect();
            postings.insert(domain, tagged);
        }

        if scraped_total == 0 {
            info!("Catalog refresh scraped nothing, keeping current catalog");
            return 0;
        }

        let catalog = JobCatalog::new(postings, CatalogSource::Scraped);
        info!(
            "Catalog refreshed: {} scraped postings, {} total",
            scraped_total,
            catalog.posting_count()
        );
        self.store.replace(catalog);
        scraped_total
    }

    /// Refreshes immediately and then every `every`.
    pub fn spawn(self, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                self.refresh_once().await;
            }
        })
    }
}

/// Sets `required_skills` to every vocabulary skill named in the title or
/// description, in vocabulary order.
pub fn tag_required_skills(mut posting: JobPosting, vocabulary: &[String]) -> JobPosting {
    let haystack = format!("{} {}", posting.title, posting.description).to_lowercase();
    posting.required_skills = vocabulary
        .iter()
        .filter(|skill| contains_term(&haystack, &skill.to_lowercase()))
        .cloned()
        .collect();
    posting
}

/// Whole-term containment: the match may not be flanked by alphanumerics.
fn contains_term(haystack: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    haystack.match_indices(term).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + term.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraping::browser::testing::{Behavior, FakeBrowser};
    use crate::scraping::ConfiguredAdapter;

    fn seed_catalog() -> JobCatalog {
        JobCatalog::from_json(
            r#"{
                "Data Science": [
                    {"id": "seed-ds", "title": "Data Analyst", "company": "Acme", "location": "Remote",
                     "requiredSkills": ["SQL", "Python", "Tableau"]}
                ],
                "Software Development": [
                    {"id": "seed-sd", "title": "Backend Engineer", "company": "Initech", "location": "Austin, TX",
                     "requiredSkills": ["Go", "Docker", "C++"]}
                ]
            }"#,
        )
        .unwrap()
    }

    const PAGE: &str = r#"<html><body><ul id="jobsearch-ResultsList">
        <li>
            <h2 class="jobTitle"><a>Senior Python Developer</a></h2>
            <span data-testid="company-name">Globex</span>
            <div data-testid="text-location">Boston, MA</div>
            <div class="job-snippet">Ship services with Docker and SQL. Google experience a plus.</div>
        </li>
    </ul></body></html>"#;

    fn single_card(title: &str, snippet: &str) -> String {
        format!(
            r#"<html><body><ul id="jobsearch-ResultsList"><li>
                <h2 class="jobTitle"><a>{title}</a></h2>
                <span data-testid="company-name">Globex</span>
                <div data-testid="text-location">Boston, MA</div>
                <div class="job-snippet">{snippet}</div>
            </li></ul></body></html>"#
        )
    }

    fn refresher(store: Arc<CatalogStore>, browser: &FakeBrowser) -> CatalogRefresher {
        CatalogRefresher::new(
            store,
            JobBoardScraper::new(Arc::new(browser.clone()), Duration::from_secs(5)),
            Arc::new(ConfiguredAdapter::indeed()),
        )
    }

    #[test]
    fn test_tagging_matches_whole_terms_only() {
        let vocabulary: Vec<String> = ["Go", "SQL", "C++", "Docker", "R"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let posting = JobPosting {
            id: "1".to_string(),
            title: "Engineer (C++)".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            description: "Google-scale systems; MySQL and docker. Rust preferred.".to_string(),
            required_skills: vec![],
        };

        let tagged = tag_required_skills(posting, &vocabulary);

        assert_eq!(tagged.required_skills, vec!["C++", "Docker"]);
    }

    #[tokio::test]
    async fn test_refresh_swaps_in_scraped_snapshot() {
        let store = Arc::new(CatalogStore::new(seed_catalog()));
        let browser = FakeBrowser::serving(PAGE);

        let scraped = refresher(store.clone(), &browser).refresh_once().await;

        assert_eq!(scraped, CareerDomain::ALL.len());
        let snapshot = store.snapshot();
        assert_eq!(snapshot.source(), CatalogSource::Scraped);
        let jobs = snapshot.postings(CareerDomain::DataScience).unwrap();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].company, "Globex");
        assert_eq!(jobs[0].required_skills, vec!["Docker", "SQL", "Python"]);
        assert_eq!(browser.closes(), CareerDomain::ALL.len());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_current_snapshot() {
        let store = Arc::new(CatalogStore::new(seed_catalog()));
        let before = store.snapshot();
        let browser = FakeBrowser::with_behavior(Behavior::FailNavigation);

        let scraped = refresher(store.clone(), &browser).refresh_once().await;

        assert_eq!(scraped, 0);
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
        assert_eq!(browser.closes(), CareerDomain::ALL.len());
    }

    #[tokio::test]
    async fn test_repeated_refreshes_keep_seed_vocabulary() {
        let store = Arc::new(CatalogStore::new(seed_catalog()));
        let browser =
            FakeBrowser::serving(&single_card("Python Developer", "Ship services with Docker."));
        let refresher = refresher(store.clone(), &browser);

        refresher.refresh_once().await;
        let first = store.snapshot();
        assert_eq!(
            first.postings(CareerDomain::DataScience).unwrap()[0].required_skills,
            vec!["Docker", "Python"]
        );

        browser.serve(&single_card("Analyst", "Tableau and SQL dashboards."));
        refresher.refresh_once().await;

        let jobs = store.snapshot();
        let jobs = jobs.postings(CareerDomain::DataScience).unwrap();
        assert_eq!(jobs[0].title, "Analyst");
        assert_eq!(jobs[0].required_skills, vec!["SQL", "Tableau"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_refresher_runs_immediately() {
        let store = Arc::new(CatalogStore::new(seed_catalog()));
        let browser = FakeBrowser::serving(PAGE);
        let handle = refresher(store.clone(), &browser).spawn(Duration::from_secs(3600));

        for _ in 0..100 {
            if store.snapshot().source() == CatalogSource::Scraped {
                break;
            }
            tokio::task::yield_now().await;
        }

        assert_eq!(store.snapshot().source(), CatalogSource::Scraped);
        handle.abort();
    }
}
