//! Job Board Scraper: bounded, best-effort extraction of postings.
//!
//! Never raises: any launch, navigation, timeout or selector failure is logged
//! and turned into an empty list. The browser session is released exactly once
//! on every exit path, including cancellation.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, warn};

use crate::catalog::models::JobPosting;
use crate::scraping::adapter::{JobBoardAdapter, SelectorConfig};
use crate::scraping::browser::{BrowserLauncher, BrowserSession};
use crate::scraping::ScrapeError;

/// Accepted postings per scrape.
pub const MAX_POSTINGS: usize = 10;

const NO_DESCRIPTION: &str = "No description available.";

pub struct JobBoardScraper {
    launcher: Arc<dyn BrowserLauncher>,
    timeout: Duration,
}

impl JobBoardScraper {
    pub fn new(launcher: Arc<dyn BrowserLauncher>, timeout: Duration) -> Self {
        Self { launcher, timeout }
    }

    pub async fn scrape(&self, domain_term: &str, adapter: &dyn JobBoardAdapter) -> Vec<JobPosting> {
        info!("Starting {} scrape for domain: {}", adapter.name(), domain_term);

        match tokio::time::timeout(self.timeout, self.run(domain_term, adapter)).await {
            Ok(Ok(postings)) => {
                info!("Scraped {} jobs for {}", postings.len(), domain_term);
                postings
            }
            Ok(Err(e)) => {
                warn!("Scrape for {} failed: {}", domain_term, e);
                Vec::new()
            }
            Err(_) => {
                warn!("Scrape for {} timed out after {:?}", domain_term, self.timeout);
                Vec::new()
            }
        }
    }

    async fn run(
        &self,
        domain_term: &str,
        adapter: &dyn JobBoardAdapter,
    ) -> Result<Vec<JobPosting>, ScrapeError> {
        let url = adapter.search_url(domain_term)?;
        let browser = self.launcher.launch().await?;
        let mut session = ScrapeSession::new(domain_term, url, MAX_POSTINGS, browser);

        let outcome = session.extract(adapter.selectors()).await;
        session.close().await;
        outcome
    }
}

/// One scrape invocation's state. Owns the browser session and guarantees it
/// is closed once: explicitly via `close`, or from `Drop` if the scrape future
/// is abandoned.
struct ScrapeSession {
    domain_term: String,
    url: Url,
    cap: usize,
    browser: Option<Box<dyn BrowserSession>>,
}

impl ScrapeSession {
    fn new(domain_term: &str, url: Url, cap: usize, browser: Box<dyn BrowserSession>) -> Self {
        Self {
            domain_term: domain_term.to_string(),
            url,
            cap,
            browser: Some(browser),
        }
    }

    async fn extract(&mut self, selectors: &SelectorConfig) -> Result<Vec<JobPosting>, ScrapeError> {
        let browser = self
            .browser
            .as_deref_mut()
            .ok_or_else(|| ScrapeError::Launch("browser session already closed".to_string()))?;

        info!("Navigating to: {}", self.url);
        browser.goto(&self.url).await?;
        let html = browser.content().await?;

        debug!("Page loaded for {}, extracting job cards", self.domain_term);
        extract_postings(&html, selectors, self.cap)
    }

    /// A failing close is logged and never replaces the scrape outcome.
    async fn close(mut self) {
        if let Some(mut browser) = self.browser.take() {
            if let Err(e) = browser.close().await {
                warn!("Failed to close browser session for {}: {}", self.domain_term, e);
            }
        }
    }
}

impl Drop for ScrapeSession {
    fn drop(&mut self) {
        let Some(mut browser) = self.browser.take() else {
            return;
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let domain_term = std::mem::take(&mut self.domain_term);
                handle.spawn(async move {
                    if let Err(e) = browser.close().await {
                        warn!("Failed to close abandoned browser session for {}: {}", domain_term, e);
                    }
                });
            }
            Err(_) => warn!(
                "No runtime available to close abandoned browser session for {}",
                self.domain_term
            ),
        }
    }
}

struct CompiledSelectors {
    card: Selector,
    title: Selector,
    company: Selector,
    location: Selector,
    description: Selector,
}

impl CompiledSelectors {
    fn compile(config: &SelectorConfig) -> Result<Self, ScrapeError> {
        Ok(Self {
            card: compile("card", &config.card)?,
            title: compile("title", &config.title)?,
            company: compile("company", &config.company)?,
            location: compile("location", &config.location)?,
            description: compile("description", &config.description)?,
        })
    }
}

fn compile(field: &'static str, selector: &str) -> Result<Selector, ScrapeError> {
    Selector::parse(selector).map_err(|_| ScrapeError::Selector {
        field,
        selector: selector.to_string(),
    })
}

/// Extracts up to `cap` postings from a results page.
///
/// Cards missing a title, company or location are discarded and do not count
/// toward `cap`. Ids are `"{title}-{card index}"`.
pub fn extract_postings(
    html: &str,
    selectors: &SelectorConfig,
    cap: usize,
) -> Result<Vec<JobPosting>, ScrapeError> {
    let selectors = CompiledSelectors::compile(selectors)?;
    let document = Html::parse_document(html);
    let mut postings = Vec::new();

    for (index, card) in document.select(&selectors.card).enumerate() {
        if postings.len() >= cap {
            break;
        }

        let title = field_text(&card, &selectors.title);
        let company = field_text(&card, &selectors.company);
        let location = field_text(&card, &selectors.location);

        if title.is_empty() || company.is_empty() || location.is_empty() {
            debug!("Discarding incomplete job card #{}", index);
            continue;
        }

        let description = field_text(&card, &selectors.description);
        debug!("Found job: {} at {}", title, company);

        postings.push(JobPosting {
            id: format!("{title}-{index}"),
            title,
            company,
            location,
            description: if description.is_empty() {
                NO_DESCRIPTION.to_string()
            } else {
                description
            },
            required_skills: Vec::new(),
        });
    }

    Ok(postings)
}

fn field_text(card: &ElementRef, selector: &Selector) -> String {
    card.select(selector)
        .next()
        .map(|element| clean_text(&element.text().collect::<Vec<_>>().join(" ")))
        .unwrap_or_default()
}

fn clean_text(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
