//! Command-line interface definitions for newsstand.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! The API key can be provided via a flag, the `NEWSAPI_KEY` environment
//! variable, or the config file.

use clap::Parser;

/// Command-line arguments for the newsstand application.
///
/// # Examples
///
/// ```sh
/// # Top headlines digest
/// newsstand -j ./json -m ./markdown
///
/// # Keyword search, three pages deep
/// newsstand -j ./json -m ./markdown -q "rate hike" --pages 3
///
/// # Provider category narrowed to one country
/// newsstand -j ./json -m ./markdown --category technology --country in
/// ```
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Output directory for the JSON digest file
    #[arg(short, long)]
    pub json_output_dir: String,

    /// Output directory for the Markdown digest file
    #[arg(short, long)]
    pub markdown_output_dir: String,

    /// Search query (uses the /everything endpoint instead of headlines)
    #[arg(short, long)]
    pub query: Option<String>,

    /// Provider category for headline queries (business, technology, ...)
    #[arg(long, conflicts_with = "query")]
    pub category: Option<String>,

    /// ISO 3166-1 country code for headline queries, e.g. "us", "in"
    #[arg(long, conflicts_with = "query")]
    pub country: Option<String>,

    /// First page to fetch (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: u32,

    /// How many consecutive pages to fetch
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// Optional path to a config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,

    /// NewsAPI key (overrides the config file)
    #[arg(long, env = "NEWSAPI_KEY")]
    pub api_key: Option<String>,
}
