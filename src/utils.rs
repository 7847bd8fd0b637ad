//! Utility functions for string formatting and file system checks.
//!
//! Small helpers used across the pipeline:
//! - Phrase and word casing for display (trending topics, feed names)
//! - Slugification for output filenames
//! - String truncation for logging
//! - Output directory validation

use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Truncate a string for logging purposes.
///
/// Long strings are truncated to at most `max` bytes with an ellipsis and
/// byte count indicator appended. The cut lands on the nearest char boundary
/// at or below `max`, so multi-byte input (provider error messages are
/// uncontrolled text) never panics.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(truncate_for_log("short", 100), "short");
/// assert_eq!(truncate_for_log(&"a".repeat(500), 10), "aaaaaaaaaa…(+490 bytes)");
/// ```
pub fn truncate_for_log(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }
    let cut = (0..=max).rev().find(|&i| s.is_char_boundary(i)).unwrap_or(0);
    format!("{}…(+{} bytes)", &s[..cut], s.len() - cut)
}

/// Convert a feed name to a filename-friendly slug.
///
/// Lowercases the text, removes special characters, and replaces spaces
/// with hyphens.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify("search: apple"), "search-apple");
/// assert_eq!(slugify("top-headlines"), "top-headlines");
/// ```
pub fn slugify(text: &str) -> String {
    text.to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Capitalize the first character of a string.
///
/// Used for feed names in the Markdown header (e.g. "top-headlines" stays a
/// slug in filenames but reads "Top-headlines" in the title line).
pub fn upcase(s: &str) -> String {
    let mut c = s.chars();
    match c.next() {
        None => String::new(),
        Some(f) => f.to_uppercase().collect::<String>() + c.as_str(),
    }
}

/// Title-case a phrase for display: every alphanumeric character that starts
/// a word (following whitespace, a hyphen, or an apostrophe) is uppercased.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(title_case_phrase("apple chip"), "Apple Chip");
/// assert_eq!(title_case_phrase("covid-19 wave"), "Covid-19 Wave");
/// ```
pub fn title_case_phrase(phrase: &str) -> String {
    let mut out = String::with_capacity(phrase.len());
    let mut boundary = true;
    for c in phrase.chars() {
        if boundary && c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
        boundary = !c.is_ascii_alphanumeric();
    }
    out
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then performs a write test by
/// creating and immediately deleting a probe file.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or is not writable
/// (permission denied, read-only filesystem, etc.).
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(path).await {
        return Err(Box::new(e));
    }
    // Try a small sync write using std fs (simpler error surface)
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    match stdfs::File::create(&probe_path) {
        Ok(_) => {
            let _ = stdfs::remove_file(&probe_path);
            info!("Output directory is writable");
            Ok(())
        }
        Err(e) => Err(Box::new(e)),
    }
}
