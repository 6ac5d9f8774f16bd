//! Browser sessions used by the scraper.
//!
//! `BrowserLauncher` / `BrowserSession` are the seam a headless browser
//! plugs into. `HttpBrowser` is the default: it fetches pages with a desktop
//! browser user agent and treats a fully received body as a settled page.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::scraping::ScrapeError;

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[async_trait]
pub trait BrowserLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, ScrapeError>;
}

#[async_trait]
pub trait BrowserSession: Send {
    /// Navigates and waits until the page has settled.
    async fn goto(&mut self, url: &Url) -> Result<(), ScrapeError>;

    /// HTML of the current page.
    async fn content(&mut self) -> Result<String, ScrapeError>;

    async fn close(&mut self) -> Result<(), ScrapeError>;
}

pub struct HttpBrowser {
    client: Client,
}

impl HttpBrowser {
    pub fn new(page_timeout: Duration) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(page_timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl BrowserLauncher for HttpBrowser {
    async fn launch(&self) -> Result<Box<dyn BrowserSession>, ScrapeError> {
        Ok(Box::new(HttpSession {
            client: self.client.clone(),
            page: None,
        }))
    }
}

struct HttpSession {
    client: Client,
    page: Option<String>,
}

#[async_trait]
impl BrowserSession for HttpSession {
    async fn goto(&mut self, url: &Url) -> Result<(), ScrapeError> {
        let response = self.client.get(url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Navigation(format!("{url} returned {status}")));
        }

        let html = response.text().await?;
        debug!("Fetched {} bytes from {}", html.len(), url);
        self.page = Some(html);
        Ok(())
    }

    async fn content(&mut self) -> Result<String, ScrapeError> {
        self.page
            .clone()
            .ok_or_else(|| ScrapeError::Navigation("no page loaded".to_string()))
    }

    async fn close(&mut self) -> Result<(), ScrapeError> {
        self.page = None;
        Ok(())
    }
}
