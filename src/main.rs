//! # newsstand
//!
//! A news digest pipeline that fetches headline or search pages from the
//! NewsAPI provider, filters and normalizes the raw articles into a canonical
//! internal record, infers a topical category per article, derives trending
//! phrases / top sources / category counts, and writes a JSON digest plus a
//! Markdown document.
//!
//! ## Usage
//!
//! ```sh
//! newsstand -j ./json -m ./markdown
//! newsstand -j ./json -m ./markdown -q "rate hike" --pages 2
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Fetching**: Request one or more pages from the provider (sequential,
//!    with retry and backoff per request)
//! 2. **Normalization**: Filter junk records, clean titles/content, infer
//!    categories, estimate relative time and read time
//! 3. **Analytics**: Recompute trending phrases, top sources, and category
//!    counts over the full fetched set
//! 4. **Output**: Write the JSON digest and Markdown report

use chrono::Local;
use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod categorize;
mod clean;
mod cli;
mod client;
mod config;
mod models;
mod normalize;
mod outputs;
mod timefmt;
mod trending;
mod utils;

use cli::Cli;
use client::NewsClient;
use config::Config;
use models::Digest;
use trending::{
    count_by_category, extract_top_sources, extract_trending_topics, DEFAULT_SOURCE_LIMIT,
    DEFAULT_TRENDING_LIMIT,
};
use utils::ensure_writable_dir;

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
    info!("newsstand starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.json_output_dir, ?args.markdown_output_dir, "Parsed CLI arguments");

    // ---- Config & API key ----
    let config = match args.config.as_deref() {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    let Some(api_key) = args.api_key.clone().or_else(|| config.api_key.clone()) else {
        error!("No API key; pass --api-key, set NEWSAPI_KEY, or add api_key to config.yaml");
        return Err("missing API key".into());
    };

    // Early check: ensure both output dirs are writable
    for dir in [&args.json_output_dir, &args.markdown_output_dir] {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "Output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Fetch pages ----
    let client = NewsClient::new(&config, api_key);
    let country = args.country.as_deref().unwrap_or(&config.country);
    let feed = match (&args.query, &args.category) {
        (Some(query), _) => format!("search: {}", query),
        (None, Some(category)) => format!("{} headlines", category),
        (None, None) => "top-headlines".to_string(),
    };
    info!(%feed, first_page = args.page, pages = args.pages, "Fetching");

    let mut articles = Vec::new();
    let mut total_results = 0u64;
    // Pages are fetched sequentially; the per-request retry decorator already
    // bounds how long a bad page can stall the run.
    for page_number in args.page..args.page + args.pages {
        let page = match &args.query {
            Some(query) => client.search(query, page_number).await,
            None => {
                client
                    .top_headlines(args.category.as_deref(), Some(country), page_number)
                    .await
            }
        };
        match page {
            Ok(page) => {
                if page_number == args.page {
                    total_results = page.total_results;
                }
                let count = page.articles.len();
                articles.extend(page.articles);
                info!(page = page_number, count, "Fetched page");
                if count == 0 {
                    debug!(page = page_number, "Empty page; stopping pagination");
                    break;
                }
            }
            Err(e) => {
                // A failing later page still leaves a usable digest.
                if articles.is_empty() {
                    error!(page = page_number, error = %e, "First page failed");
                    return Err(e);
                }
                warn!(page = page_number, error = %e, "Page failed; continuing with what we have");
                break;
            }
        }
    }
    info!(count = articles.len(), total_results, "Fetch complete");

    // ---- Analytics ----
    let trending = extract_trending_topics(&articles, DEFAULT_TRENDING_LIMIT);
    let top_sources = extract_top_sources(&articles, DEFAULT_SOURCE_LIMIT);
    let category_counts = count_by_category(&articles);
    info!(
        trending = trending.len(),
        sources = top_sources.len(),
        categories = category_counts.len(),
        "Analytics extracted"
    );

    // ---- Build digest ----
    let digest = Digest {
        local_date: Local::now().date_naive().to_string(),
        feed,
        total_results,
        articles,
        trending,
        top_sources,
        category_counts,
    };

    // ---- JSON output ----
    if let Err(e) = outputs::json::write_digest(&digest, &args.json_output_dir).await {
        error!(error = %e, "Failed to write JSON digest");
    }

    // ---- Markdown output ----
    let md = outputs::markdown::digest_to_markdown(&digest);
    let output_markdown_filename = format!(
        "{}/{}_{}.md",
        args.markdown_output_dir,
        digest.local_date,
        utils::slugify(&digest.feed)
    );
    info!(path = %output_markdown_filename, "Writing Markdown");
    if let Err(e) = tokio::fs::write(&output_markdown_filename, md).await {
        error!(path = %output_markdown_filename, error = %e, "Failed writing Markdown");
    } else {
        info!(path = %output_markdown_filename, "Wrote digest Markdown");
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        articles = digest.articles.len(),
        "Execution complete"
    );

    Ok(())
}
