//! # Article Harvest
//!
//! A bounded, one-shot crawler for a single news site. It discovers article
//! links from configured seed listing pages, fetches each article, extracts
//! a normalized record (title, authors, date, topics, breadcrumb trail,
//! body text), and persists the raw page plus the structured record per
//! article.
//!
//! ## Usage
//!
//! ```sh
//! article_harvest -c ./crawler_config.json -o ./artifacts
//! ```
//!
//! ## Architecture
//!
//! The run is a straight pipeline:
//! 1. **Validation**: the JSON configuration is validated field by field;
//!    any violation terminates the run before network activity
//! 2. **Discovery**: seed listing pages are walked in configuration order
//!    until the configured article cap is reached
//! 3. **Extraction**: discovered articles are fetched and parsed
//!    concurrently (bounded, order-preserving)
//! 4. **Persistence**: raw text and record files are written per article
//!    id, in increasing id order

use clap::Parser;
use futures::stream::{self, StreamExt};
use std::error::Error;
use tracing::{debug, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod config;
mod crawler;
mod dates;
mod fetch;
mod models;
mod outputs;
mod parser;

use cli::Cli;
use config::Config;
use crawler::Crawler;
use fetch::Fetcher;
use parser::parse_article;

/// How many article pages are fetched and parsed at a time.
const PARALLEL_FETCHES: usize = 8;

#[tokio::main]
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

    let start_time = std::time::Instant::now();
    info!("article_harvest starting up");

    let args = Cli::parse();
    debug!(?args.config, ?args.output_dir, "Parsed CLI arguments");

    // Configuration errors are terminal and happen before any I/O.
    let config = Config::from_file(&args.config)?;
    let fetcher = Fetcher::new(&config)?;

    outputs::prepare_environment(&args.output_dir).await?;

    // ---- Discover article links ----
    let crawler = Crawler::new(&config);
    let links = crawler.find_articles(&fetcher).await;
    if links.is_empty() {
        warn!("No article links discovered; nothing to do");
        return Ok(());
    }

    // ---- Fetch and extract concurrently, ids in discovery order ----
    info!(
        count = links.len(),
        parallel_fetches = PARALLEL_FETCHES,
        "Starting article extraction"
    );
    let results: Vec<_> = stream::iter(links.iter().enumerate())
        .map(|(i, url)| parse_article(&fetcher, url, i + 1))
        .buffered(PARALLEL_FETCHES)
        .collect()
        .await;

    // ---- Persist in increasing id order ----
    let mut saved = 0usize;
    let mut skipped = 0usize;
    for (url, result) in links.iter().zip(results) {
        match result {
            Ok((article, raw_text)) => {
                outputs::raw::write_raw(&args.output_dir, article.id, &raw_text).await?;
                outputs::json::write_meta(&args.output_dir, &article).await?;
                saved += 1;
            }
            Err(e) => {
                warn!(%url, error = %e, "Skipping article");
                skipped += 1;
            }
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        discovered = links.len(),
        saved,
        skipped,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
