//! Text cleaners for raw provider article fields.
//!
//! NewsAPI article fields arrive with provider artifacts that look bad in a
//! digest: titles carry a trailing " - Source Name" suffix, and the free tier
//! truncates `content` mid-sentence with a "[+N chars]" marker. The functions
//! here strip those artifacts and provide word/character truncation for
//! display contexts.
//!
//! All four functions are pure and total: no error conditions, empty input
//! yields empty output, and the two cleaners are idempotent (running them a
//! second time changes nothing).

use once_cell::sync::Lazy;
use regex::Regex;

/// Matches a trailing " - Source", " – Source", or " | Source" title suffix.
///
/// The separator must be a single dash, en-dash, or pipe surrounded by single
/// spaces, and the source segment must not itself contain a separator, so
/// only the last suffix is stripped.
static TITLE_SUFFIX_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s[-–|]\s[^-–|]+$").unwrap());

/// Matches the "[+N chars]" truncation marker NewsAPI appends to partial content.
static TRUNCATION_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\+\d+ chars\]").unwrap());

/// Strip the " - Source Name" suffix NewsAPI appends to titles.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(clean_news_title("Fed raises rates - Reuters"), "Fed raises rates");
/// assert_eq!(clean_news_title("No suffix here"), "No suffix here");
/// ```
pub fn clean_news_title(title: &str) -> String {
    TITLE_SUFFIX_RE.replace(title, "").trim().to_string()
}

/// Replace the first "[+N chars]" marker in partial content with an ellipsis.
///
/// Content without a marker is returned unchanged (trimmed).
pub fn clean_news_content(content: &str) -> String {
    TRUNCATION_MARKER_RE.replace(content, "…").trim().to_string()
}

/// Truncate a string to a maximum number of whitespace-delimited words.
///
/// Input at or under the limit is returned unchanged; otherwise the first
/// `max_words` words are joined by single spaces with an ellipsis appended.
pub fn truncate_words(text: &str, max_words: usize) -> String {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= max_words {
        return text.to_string();
    }
    let mut out = words[..max_words].join(" ");
    out.push('…');
    out
}

/// Truncate a string to a maximum number of characters.
///
/// Trailing whitespace is trimmed before the ellipsis is appended so the cut
/// never ends in "word …".
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{}…", cut.trim_end())
}
