//! Job board scraping: best-effort catalog refresh from a live job board.
//! Runs out of band from request handling; every failure degrades to an empty result.

use thiserror::Error;

pub mod adapter;
pub mod browser;
pub mod scraper;

pub use adapter::{ConfiguredAdapter, JobBoardAdapter};
pub use browser::HttpBrowser;
pub use scraper::JobBoardScraper;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("invalid search URL: {0}")]
    InvalidUrl(String),

    #[error("browser launch failed: {0}")]
    Launch(String),

    #[error("navigation failed: {0}")]
    Navigation(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid {field} selector '{selector}'")]
    Selector { field: &'static str, selector: String },
}
