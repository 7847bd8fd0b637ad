//! Data models for raw provider articles and their normalized representations.
//!
//! This module defines the core data structures used throughout the pipeline:
//! - [`RawArticle`] / [`RawSource`]: article data as decoded from the NewsAPI
//!   response page, every field optional
//! - [`NormalizedArticle`]: the canonical internal record produced by the
//!   normalizer, immutable once constructed
//! - [`FeedPage`]: one fetched page after filtering and normalization
//! - [`Digest`]: the full output shape written to JSON and Markdown,
//!   including the derived analytics
//!
//! Serialized field names use camelCase where they mirror the provider's JSON
//! schema (`urlToImage`, `publishedAt`, `readTime`), hence the explicit
//! `#[serde(rename)]` attributes.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::categorize::Category;

/// The source block nested inside a provider article.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawSource {
    /// Provider-assigned source id, often null.
    pub id: Option<String>,
    /// Human-readable source name, e.g. "Reuters".
    pub name: Option<String>,
}

/// A raw article record as returned by the news provider.
///
/// Nothing here is trusted: any field may be missing, and titles may carry
/// the provider's "[Removed]" sentinel for deleted articles. The filter and
/// normalizer handle every absence with a documented fallback.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawArticle {
    #[serde(default)]
    pub source: RawSource,
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub url_to_image: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    /// Body text, usually truncated by the provider with a "[+N chars]" marker.
    pub content: Option<String>,
}

/// The canonical internal article record consumed by the outputs.
///
/// Constructed once per raw record at fetch time and never mutated. Every
/// article carries a non-empty `id` and a category ([`Category::World`] when
/// no keyword rule matched).
///
/// # Id Uniqueness
///
/// `id` is `{source name}-{page-local index}-{publishedAt}`. Uniqueness holds
/// only within a single fetched page: two pages can collide when the same
/// source publishes at the same timestamp. Known limitation, kept as-is.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NormalizedArticle {
    pub id: String,
    /// Display title with the trailing " - Source" suffix removed.
    pub title: String,
    /// Raw description text; may be empty.
    pub summary: String,
    /// Body text with truncation markers replaced by an ellipsis.
    pub content: String,
    /// First comma-separated author name, else source name, else "Unknown".
    pub author: String,
    /// Provider-supplied source name; may be empty.
    pub source: String,
    pub url: String,
    /// Display image URL, or the configured fallback when absent.
    pub image: String,
    pub category: Category,
    /// Human-relative publication time, e.g. "2h ago".
    pub time: String,
    /// Estimated reading time, e.g. "4 min".
    #[serde(rename = "readTime")]
    pub read_time: String,
    /// Original timestamp, retained for sorting and debugging.
    #[serde(rename = "publishedAt")]
    pub published_at: String,
}

/// One fetched page after filtering and normalization.
///
/// `total_results` is the provider's count for the whole query, passed
/// through unchanged; `articles` is only the current page's slice of it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FeedPage {
    pub total_results: u64,
    pub articles: Vec<NormalizedArticle>,
}

/// A trending phrase (one word or an adjacent-word pair), title-cased for
/// display. Rank is implicit in position within the surrounding list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TrendingTopic {
    pub phrase: String,
}

/// An article count for a single source name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SourceCount {
    pub name: String,
    pub count: usize,
}

/// The complete digest for one run: the normalized articles plus the
/// analytics derived from them. Serialized to JSON and rendered to Markdown.
#[derive(Debug, Serialize, Deserialize)]
pub struct Digest {
    /// The date of the run in `YYYY-MM-DD` format.
    pub local_date: String,
    /// Human-readable description of what was fetched, e.g. "top-headlines"
    /// or "search: apple".
    pub feed: String,
    /// Provider's total result count for the query.
    pub total_results: u64,
    pub articles: Vec<NormalizedArticle>,
    pub trending: Vec<TrendingTopic>,
    pub top_sources: Vec<SourceCount>,
    pub category_counts: HashMap<Category, usize>,
}
