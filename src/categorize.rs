//! Keyword-based category inference for normalized articles.
//!
//! NewsAPI's free tier doesn't return a category field on articles, so the
//! category is inferred from the title and description text. Classification
//! is lexical, not semantic: each category owns a fixed keyword alternation,
//! and the first rule that matches wins. False positives are expected and
//! acceptable; the contract is determinism, not ground-truth accuracy.
//!
//! Rule order is significant and must be preserved: an article matching both
//! a Business keyword and a Technology keyword is classified Business because
//! that rule is checked first.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of topical categories an article can be assigned.
///
/// [`Category::World`] is the fallback for text that matches no keyword rule,
/// so every article carries a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Business,
    Technology,
    Health,
    Science,
    Climate,
    Sports,
    World,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Technology,
        Category::Health,
        Category::Science,
        Category::Climate,
        Category::Sports,
        Category::World,
    ];

    /// Display name, identical to the serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Business => "Business",
            Category::Technology => "Technology",
            Category::Health => "Health",
            Category::Science => "Science",
            Category::Climate => "Climate",
            Category::Sports => "Sports",
            Category::World => "World",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered classification rules. Evaluated top to bottom; first match wins.
///
/// The alternations match substrings, not whole words ("said" contains "ai"),
/// which keeps the rules cheap and matches how the heuristic behaves in
/// practice on headline text.
static RULES: Lazy<Vec<(Category, Regex)>> = Lazy::new(|| {
    vec![
        (
            Category::Business,
            Regex::new("stock|market|nasdaq|walmart|amazon|economy|trade|inflation|gdp|revenue|earnings").unwrap(),
        ),
        (
            Category::Health,
            Regex::new("health|alzheimer|heart|blood|medical|disease|cancer|covid|vaccine|surgery").unwrap(),
        ),
        (
            Category::Science,
            Regex::new("science|nasa|crispr|gene|research|study|species|biology|physics|astronomy").unwrap(),
        ),
        (
            Category::Climate,
            Regex::new("climate|carbon|emission|wildfire|flood|drought|environment|rainforest").unwrap(),
        ),
        (
            Category::Technology,
            Regex::new("ai|tech|apple|google|microsoft|meta|openai|software|chip|robot|cyber").unwrap(),
        ),
        (
            Category::Sports,
            Regex::new("soccer|football|nba|nfl|nhl|sport|olympic|tennis|golf|match|goal|arsenal|wolves").unwrap(),
        ),
    ]
});

/// Infer a category from an article's title and description.
///
/// The haystack is the case-folded concatenation of both fields. Same text
/// always yields the same category.
pub fn infer_category(title: &str, description: &str) -> Category {
    let text = format!("{} {}", title, description).to_lowercase();
    for (category, pattern) in RULES.iter() {
        if pattern.is_match(&text) {
            return *category;
        }
    }
    Category::World
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_business_keywords() {
        assert_eq!(infer_category("Nasdaq hits record high", ""), Category::Business);
        assert_eq!(infer_category("Inflation cools in April", ""), Category::Business);
    }

    #[test]
    fn test_priority_order_business_beats_technology() {
        // Matches both "stock market" (Business) and "robot"/"ai" (Technology);
        // Business is checked first.
        assert_eq!(
            infer_category("Stock market reacts to robot AI launch", ""),
            Category::Business
        );
    }

    #[test]
    fn test_health_beats_technology() {
        assert_eq!(
            infer_category("Vaccine software rollout expands", ""),
            Category::Health
        );
    }

    #[test]
    fn test_description_contributes() {
        assert_eq!(
            infer_category("Quiet day in parliament", "debate over carbon emission caps"),
            Category::Climate
        );
    }

    #[test]
    fn test_default_world() {
        assert_eq!(infer_category("Leaders meet in summit", ""), Category::World);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(infer_category("NASA LAUNCHES PROBE", ""), Category::Science);
    }

    #[test]
    fn test_deterministic() {
        let a = infer_category("Apple unveils new chip", "silicon roadmap");
        let b = infer_category("Apple unveils new chip", "silicon roadmap");
        assert_eq!(a, b);
        assert_eq!(a, Category::Technology);
    }

    #[test]
    fn test_display_matches_serialized_form() {
        let json = serde_json::to_string(&Category::Climate).unwrap();
        assert_eq!(json, "\"Climate\"");
        assert_eq!(Category::Climate.to_string(), "Climate");
    }
}
