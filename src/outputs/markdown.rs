//! Markdown rendering for the digest.
//!
//! Produces a single readable document per run: the sidebar-style analytics
//! sections first (trending phrases, category counts, top sources), then the
//! article listing with per-article metadata lines.

use std::fmt::Write;

use crate::categorize::Category;
use crate::clean::{truncate_chars, truncate_words};
use crate::models::Digest;
use crate::utils::upcase;

/// How many words of body text each article entry shows.
const PREVIEW_WORDS: usize = 60;

/// How many characters of the summary line each article entry shows.
const SUMMARY_CHARS: usize = 200;

/// Render a [`Digest`] as a Markdown document.
pub fn digest_to_markdown(digest: &Digest) -> String {
    let mut md = String::new();

    writeln!(md, "# {} — {}\n", upcase(&digest.feed), digest.local_date).unwrap();
    writeln!(
        md,
        "_{} articles shown of {} total results._\n",
        digest.articles.len(),
        digest.total_results
    )
    .unwrap();

    // ---- Trending ----
    writeln!(md, "## Trending\n").unwrap();
    if digest.trending.is_empty() {
        writeln!(md, "No data yet.\n").unwrap();
    } else {
        for (i, topic) in digest.trending.iter().enumerate() {
            writeln!(md, "{}. {}", i + 1, topic.phrase).unwrap();
        }
        writeln!(md).unwrap();
    }

    // ---- Browse ----
    writeln!(md, "## Browse\n").unwrap();
    writeln!(md, "- All ({})", digest.articles.len()).unwrap();
    for category in Category::ALL {
        let count = digest.category_counts.get(&category).copied().unwrap_or(0);
        if count > 0 {
            writeln!(md, "- {} ({})", category, count).unwrap();
        }
    }
    writeln!(md).unwrap();

    // ---- Top Sources ----
    writeln!(md, "## Top Sources\n").unwrap();
    if digest.top_sources.is_empty() {
        writeln!(md, "No sources found.\n").unwrap();
    } else {
        for source in &digest.top_sources {
            writeln!(md, "- {} ({})", source.name, source.count).unwrap();
        }
        writeln!(md).unwrap();
    }

    // ---- Articles ----
    writeln!(md, "## Articles\n").unwrap();
    for article in &digest.articles {
        writeln!(md, "### {}\n", article.title).unwrap();
        writeln!(
            md,
            "**{}** · {} · {} · {} · {}\n",
            article.category, article.author, article.source, article.time, article.read_time
        )
        .unwrap();
        if !article.summary.is_empty() {
            writeln!(md, "_{}_\n", truncate_chars(&article.summary, SUMMARY_CHARS)).unwrap();
        }
        if !article.content.is_empty() && article.content != article.summary {
            writeln!(md, "{}\n", truncate_words(&article.content, PREVIEW_WORDS)).unwrap();
        }
        writeln!(md, "[Read more]({})\n", article.url).unwrap();
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NormalizedArticle, SourceCount, TrendingTopic};
    use std::collections::HashMap;

    fn digest() -> Digest {
        Digest {
            local_date: "2026-02-19".to_string(),
            feed: "top-headlines".to_string(),
            total_results: 42,
            articles: vec![NormalizedArticle {
                id: "Reuters-0-2026-02-19T14:43:00Z".to_string(),
                title: "Fed raises rates".to_string(),
                summary: "The Federal Reserve raised rates.".to_string(),
                content: "The Fed moved again today. …".to_string(),
                author: "Jane Doe".to_string(),
                source: "Reuters".to_string(),
                url: "https://example.com/fed".to_string(),
                image: "https://example.com/fed.jpg".to_string(),
                category: Category::Business,
                time: "2h ago".to_string(),
                read_time: "1 min".to_string(),
                published_at: "2026-02-19T14:43:00Z".to_string(),
            }],
            trending: vec![
                TrendingTopic { phrase: "Rate Hike".to_string() },
                TrendingTopic { phrase: "Inflation".to_string() },
            ],
            top_sources: vec![SourceCount { name: "Reuters".to_string(), count: 1 }],
            category_counts: HashMap::from([(Category::Business, 1)]),
        }
    }

    #[test]
    fn test_markdown_contains_all_sections() {
        let md = digest_to_markdown(&digest());
        assert!(md.contains("## Trending"));
        assert!(md.contains("1. Rate Hike"));
        assert!(md.contains("## Browse"));
        assert!(md.contains("- Business (1)"));
        assert!(md.contains("## Top Sources"));
        assert!(md.contains("- Reuters (1)"));
        assert!(md.contains("### Fed raises rates"));
        assert!(md.contains("[Read more](https://example.com/fed)"));
    }

    #[test]
    fn test_markdown_metadata_line() {
        let md = digest_to_markdown(&digest());
        assert!(md.contains("**Business** · Jane Doe · Reuters · 2h ago · 1 min"));
    }

    #[test]
    fn test_empty_analytics_render_placeholders() {
        let mut d = digest();
        d.trending.clear();
        d.top_sources.clear();
        let md = digest_to_markdown(&d);
        assert!(md.contains("No data yet."));
        assert!(md.contains("No sources found."));
    }

    #[test]
    fn test_zero_count_categories_omitted() {
        let md = digest_to_markdown(&digest());
        assert!(!md.contains("- Sports"));
    }
}
