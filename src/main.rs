//! # Headlines
//!
//! A small HTTP service that scrapes the front pages of several news sites
//! and serves their headlines as one normalized JSON feed.
//!
//! ## Features
//!
//! - Scrapes headlines from Prothom Alo, Manab Zamin, and Daily Star Bangla
//! - Fetches every source concurrently; a failing source degrades to an
//!   empty entry instead of failing the response
//! - Memoizes raw page bodies per URL and caches the aggregated feed for
//!   one minute
//! - Serves the feed at `/api/headlines` and a small frontend at `/`
//!
//! ## Usage
//!
//! ```sh
//! headlines --port 8080
//! ```
//!
//! ## Architecture
//!
//! A request flows through:
//! 1. **Result cache**: a fresh aggregated feed is returned immediately
//! 2. **Aggregation**: one task per source, joined in configuration order
//! 3. **Fetching**: a User-Agent/timeout GET, served from the body cache when possible
//! 4. **Extraction**: per-site markup rules produce the headline list

use clap::Parser;
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregator;
mod cache;
mod cli;
mod config;
mod error;
mod fetcher;
mod models;
mod scrapers;
mod server;
mod utils;

use cache::{BodyCache, ResultCache};
use cli::Cli;
use config::Config;
use fetcher::Fetcher;
use scrapers::Source;
use server::AppState;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    info!(version = env!("CARGO_PKG_VERSION"), "headlines starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = Config::load(&args)?;

    // Shared state lives here and is handed out by reference.
    let body_cache = Arc::new(BodyCache::new());
    let result_cache = Arc::new(ResultCache::new());
    let fetcher = Arc::new(Fetcher::new(
        &config.user_agent,
        config.timeout,
        Arc::clone(&body_cache),
    )?);

    let sources: Vec<Arc<dyn Source>> = config
        .sources
        .iter()
        .map(|source| source.site.build(&source.url, Arc::clone(&fetcher)))
        .collect();
    for source in &sources {
        let metadata = source.metadata();
        info!(name = %metadata.name, homepage = %metadata.homepage_url, "Configured source");
    }

    let router = server::build_router(AppState::new(sources, result_cache));
    server::serve(&args.bind_addr(), router).await?;

    info!(cached_bodies = body_cache.len(), "Server stopped");
    Ok(())
}
