//! Frequency-based analytics over the current article set.
//!
//! Three derivations feed the digest's sidebar sections, all recomputed from
//! scratch over the full article collection on every call:
//!
//! - [`extract_trending_topics`]: surface the most frequent meaningful words
//!   and adjacent-word pairs across titles
//! - [`extract_top_sources`]: count articles per source name
//! - [`count_by_category`]: tally articles per inferred category
//!
//! Each call owns its aggregation state for the duration of one invocation
//! and discards it on return; there is no shared or incremental state.

use itertools::Itertools;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use tracing::debug;

use crate::categorize::Category;
use crate::models::{NormalizedArticle, SourceCount, TrendingTopic};
use crate::utils::title_case_phrase;

/// How many trending phrases the digest shows.
pub const DEFAULT_TRENDING_LIMIT: usize = 6;

/// How many sources the digest shows.
pub const DEFAULT_SOURCE_LIMIT: usize = 5;

/// Common English function words excluded from trending candidates.
static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "a", "an", "the", "and", "or", "but", "in", "on", "at", "to", "for", "of", "with",
        "is", "are", "was", "were", "be", "been", "has", "have", "had", "it", "its", "as",
        "by", "from", "that", "this", "his", "her", "their", "our", "we", "he", "she", "they",
        "i", "you", "not", "no", "new", "over", "after", "before", "up", "out", "says", "say",
        "will", "more", "than", "just", "how", "what", "when", "who", "all", "about", "into",
    ])
});

/// Insertion-ordered frequency map.
///
/// Scores live in a `Vec` in first-seen order with a `HashMap` index into it,
/// so the stable descending sort breaks score ties by first appearance. That
/// makes the ranking deterministic for a fixed input order.
struct FreqMap {
    index: HashMap<String, usize>,
    entries: Vec<(String, u64)>,
}

impl FreqMap {
    fn new() -> Self {
        Self {
            index: HashMap::new(),
            entries: Vec::new(),
        }
    }

    fn bump(&mut self, key: String, weight: u64) {
        match self.index.get(&key) {
            Some(&slot) => self.entries[slot].1 += weight,
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, weight));
            }
        }
    }

    /// Top `n` keys by descending score, first-seen order on ties.
    fn top(self, n: usize) -> Vec<(String, u64)> {
        self.entries
            .into_iter()
            .sorted_by(|a, b| b.1.cmp(&a.1))
            .take(n)
            .collect()
    }
}

/// Split a title into trending candidate tokens.
///
/// Strips everything except ASCII letters, digits, apostrophes, and hyphens,
/// splits on whitespace, then drops short tokens and stop words (stop-word
/// check is case-insensitive, length is counted on the original token).
fn title_tokens(title: &str) -> Vec<String> {
    let stripped: String = title
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '\'' || *c == '-')
        .collect();

    stripped
        .split_whitespace()
        .filter(|w| w.chars().count() > 3 && !STOP_WORDS.contains(w.to_lowercase().as_str()))
        .map(str::to_string)
        .collect()
}

/// Extract the top `top_n` trending phrases from article titles.
///
/// Every surviving single token scores +1 and every adjacent token bigram
/// scores +2 into one shared case-insensitive frequency map, so a phrase
/// repeated across titles outranks single words of comparable frequency.
/// Phrases are title-cased for display.
pub fn extract_trending_topics(articles: &[NormalizedArticle], top_n: usize) -> Vec<TrendingTopic> {
    let mut freq = FreqMap::new();

    for article in articles {
        if article.title.is_empty() {
            continue;
        }
        let words = title_tokens(&article.title);

        for word in &words {
            freq.bump(word.to_lowercase(), 1);
        }
        for pair in words.windows(2) {
            freq.bump(format!("{} {}", pair[0], pair[1]).to_lowercase(), 2);
        }
    }

    let topics: Vec<TrendingTopic> = freq
        .top(top_n)
        .into_iter()
        .map(|(phrase, _)| TrendingTopic {
            phrase: title_case_phrase(&phrase),
        })
        .collect();
    debug!(count = topics.len(), "Extracted trending topics");
    topics
}

/// Count articles per non-empty source name and return the top `top_n`.
pub fn extract_top_sources(articles: &[NormalizedArticle], top_n: usize) -> Vec<SourceCount> {
    let mut counts = FreqMap::new();
    for article in articles {
        if article.source.is_empty() {
            continue;
        }
        counts.bump(article.source.clone(), 1);
    }

    counts
        .top(top_n)
        .into_iter()
        .map(|(name, count)| SourceCount {
            name,
            count: count as usize,
        })
        .collect()
}

/// Tally articles per category. Consumed as a lookup table; no ordering.
pub fn count_by_category(articles: &[NormalizedArticle]) -> HashMap<Category, usize> {
    let mut counts = HashMap::new();
    for article in articles {
        *counts.entry(article.category).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(title: &str, source: &str, category: Category) -> NormalizedArticle {
        NormalizedArticle {
            id: format!("{}-0-", source),
            title: title.to_string(),
            summary: String::new(),
            content: String::new(),
            author: source.to_string(),
            source: source.to_string(),
            url: "#".to_string(),
            image: String::new(),
            category,
            time: String::new(),
            read_time: "1 min".to_string(),
            published_at: String::new(),
        }
    }

    #[test]
    fn test_title_tokens_strip_and_filter() {
        let tokens = title_tokens("Apple's chip: a breakthrough, says CEO!");
        // "says" is a stop word, "CEO" and "a" are too short.
        assert_eq!(tokens, vec!["Apple's", "chip", "breakthrough"]);
    }

    #[test]
    fn test_bigram_outranks_singles() {
        let articles = vec![
            article("Apple unveils new chip", "Verge", Category::Technology),
            article("Apple chip breakthrough stuns market", "Wired", Category::Technology),
        ];

        // Wide limit so the once-seen singles make the list too.
        let topics = extract_trending_topics(&articles, 12);
        let phrases: Vec<&str> = topics.iter().map(|t| t.phrase.as_str()).collect();
        assert!(phrases.contains(&"Apple Chip"));
        let apple_chip = phrases.iter().position(|p| *p == "Apple Chip").unwrap();
        let breakthrough = phrases.iter().position(|p| *p == "Breakthrough").unwrap();
        assert!(apple_chip < breakthrough, "bigram must outrank once-seen singles");
    }

    #[test]
    fn test_trending_tie_break_is_first_seen() {
        let articles = vec![
            article("Wildfire spreads", "AP", Category::Climate),
            article("Drought worsens", "AP", Category::Climate),
        ];
        // Both bigrams score 2; the one seen first wins the tie. The singles
        // all score 1 and keep their own first-seen order below them.
        let topics = extract_trending_topics(&articles, 6);
        assert_eq!(topics[0].phrase, "Wildfire Spreads");
        assert_eq!(topics[1].phrase, "Drought Worsens");
        assert_eq!(topics[2].phrase, "Wildfire");
    }

    #[test]
    fn test_trending_respects_limit_and_is_title_cased() {
        let articles = vec![article(
            "rainforest carbon credits debated fiercely worldwide again",
            "BBC",
            Category::Climate,
        )];
        let topics = extract_trending_topics(&articles, 3);
        assert_eq!(topics.len(), 3);
        for topic in &topics {
            let first = topic.phrase.chars().next().unwrap();
            assert!(first.is_ascii_uppercase() || first.is_ascii_digit());
        }
    }

    #[test]
    fn test_top_sources_sorted_desc() {
        let articles = vec![
            article("A story here", "Reuters", Category::World),
            article("B story here", "Reuters", Category::World),
            article("C story here", "AP", Category::World),
            article("D story here", "", Category::World),
        ];

        let sources = extract_top_sources(&articles, 5);
        assert_eq!(
            sources,
            vec![
                SourceCount { name: "Reuters".to_string(), count: 2 },
                SourceCount { name: "AP".to_string(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_top_sources_limit() {
        let articles: Vec<NormalizedArticle> = (0..8)
            .map(|i| article("Story", &format!("Source{}", i), Category::World))
            .collect();
        assert_eq!(extract_top_sources(&articles, 5).len(), 5);
    }

    #[test]
    fn test_count_by_category() {
        let articles = vec![
            article("A", "X", Category::Business),
            article("B", "X", Category::Business),
            article("C", "X", Category::World),
        ];

        let counts = count_by_category(&articles);
        assert_eq!(counts.get(&Category::Business), Some(&2));
        assert_eq!(counts.get(&Category::World), Some(&1));
        assert_eq!(counts.get(&Category::Sports), None);
    }
}
