mod analysis;
mod catalog;
mod config;
mod errors;
mod extraction;
mod llm_client;
mod routes;
mod scraping;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::ResumeAnalyzer;
use crate::catalog::{CatalogRefresher, CatalogStore};
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::scraping::{ConfiguredAdapter, HttpBrowser, JobBoardAdapter, JobBoardScraper};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting SkillBridge API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.anthropic_api_key.clone())?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    let analyzer = Arc::new(ResumeAnalyzer::new(Arc::new(llm), config.ai_timeout));

    // Load the static job catalog
    let catalog = Arc::new(CatalogStore::load(&config.jobs_file)?);

    if config.catalog_refresh_interval.is_zero() {
        info!("Catalog refresh disabled, serving static catalog");
    } else {
        spawn_catalog_refresh(&config, catalog.clone())?;
    }

    let state = AppState {
        analyzer,
        catalog,
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Starts the background job board refresh on its own task.
fn spawn_catalog_refresh(config: &Config, catalog: Arc<CatalogStore>) -> Result<()> {
    let adapter: Arc<dyn JobBoardAdapter> = match &config.job_board_config {
        Some(path) => Arc::new(ConfiguredAdapter::from_file(path)?),
        None => Arc::new(ConfiguredAdapter::indeed()),
    };
    let browser = HttpBrowser::new(config.scrape_timeout)?;
    let scraper = JobBoardScraper::new(Arc::new(browser), config.scrape_timeout);

    info!(
        "Catalog refresh from '{}' every {:?}",
        adapter.name(),
        config.catalog_refresh_interval
    );
    CatalogRefresher::new(catalog, scraper, adapter).spawn(config.catalog_refresh_interval);
    Ok(())
}
