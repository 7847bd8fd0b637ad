//! Article normalization: raw provider records → canonical internal records.
//!
//! This is a pure transformation stage with no I/O and no failure modes:
//! garbage in, degraded-but-valid out. Missing optional fields degrade to the
//! documented fallbacks rather than raising.
//!
//! The pipeline per fetched page is [`filter_valid`] (drop junk records the
//! provider couldn't or wouldn't fill in) followed by [`normalize_article`]
//! over the survivors, in order, which is what [`normalize_page`] composes.

use tracing::{debug, instrument};

use crate::categorize::infer_category;
use crate::clean::{clean_news_content, clean_news_title};
use crate::config::FALLBACK_IMAGE;
use crate::models::{NormalizedArticle, RawArticle};
use crate::timefmt::{estimate_read_time, format_relative_time};

/// Transform one raw article into a [`NormalizedArticle`].
///
/// `index` is the record's position within the current page and only feeds
/// the id, so ids are unique within one fetched page.
///
/// # Fallbacks
///
/// - title: `"Untitled"` when absent, then suffix-cleaned
/// - content: description when absent, empty when both are
/// - author: first comma-separated author segment, else source name, else
///   `"Unknown"`
/// - url: `"#"`; image: the fixed placeholder
pub fn normalize_article(raw: &RawArticle, index: usize) -> NormalizedArticle {
    let source = raw.source.name.clone().unwrap_or_default();
    let description = raw.description.clone().unwrap_or_default();
    let published_at = raw.published_at.clone().unwrap_or_default();
    // Empty content counts as absent, same as the author chain below.
    let body = raw
        .content
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or(description.as_str());

    let author = raw
        .author
        .as_deref()
        .and_then(|a| a.split(',').next())
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .or_else(|| (!source.is_empty()).then(|| source.clone()))
        .unwrap_or_else(|| "Unknown".to_string());

    NormalizedArticle {
        id: format!("{}-{}-{}", source, index, published_at),
        title: clean_news_title(raw.title.as_deref().unwrap_or("Untitled")),
        summary: description.clone(),
        content: clean_news_content(body),
        author,
        source,
        url: raw.url.clone().unwrap_or_else(|| "#".to_string()),
        image: raw
            .url_to_image
            .clone()
            .unwrap_or_else(|| FALLBACK_IMAGE.to_string()),
        category: infer_category(
            raw.title.as_deref().unwrap_or_default(),
            &description,
        ),
        time: format_relative_time(&published_at),
        read_time: estimate_read_time(raw.content.as_deref().unwrap_or_default(), &description),
        published_at,
    }
}

/// Keep only records worth showing: a title must be present, must not be the
/// provider's literal `"[Removed]"` sentinel, and an image URL must exist.
/// Order is preserved; no other fields are inspected.
pub fn filter_valid(articles: Vec<RawArticle>) -> Vec<RawArticle> {
    articles
        .into_iter()
        .filter(|a| {
            a.title
                .as_deref()
                .is_some_and(|t| !t.is_empty() && t != "[Removed]")
                && a.url_to_image.as_deref().is_some_and(|u| !u.is_empty())
        })
        .collect()
}

/// Filter then normalize one page of raw articles.
#[instrument(level = "debug", skip_all)]
pub fn normalize_page(articles: Vec<RawArticle>) -> Vec<NormalizedArticle> {
    let received = articles.len();
    let normalized: Vec<NormalizedArticle> = filter_valid(articles)
        .iter()
        .enumerate()
        .map(|(index, raw)| normalize_article(raw, index))
        .collect();
    debug!(
        received,
        kept = normalized.len(),
        dropped = received - normalized.len(),
        "Normalized page"
    );
    normalized
}
