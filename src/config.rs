//! YAML configuration for the provider client and digest defaults.
//!
//! Configuration is optional: every field has a default matching the
//! provider's conventions, so the application runs with nothing but an API
//! key. The key itself can live in the config file or come from the
//! `NEWSAPI_KEY` environment variable / `--api-key` flag, which take
//! precedence over the file.
//!
//! # Example config.yaml
//!
//! ```yaml
//! api_key: "0123456789abcdef"
//! page_size: 30
//! country: us
//! ```

use serde::{Deserialize, Serialize};
use std::error::Error;
use tracing::info;

/// Placeholder image shown when an article has no image of its own.
pub const FALLBACK_IMAGE: &str =
    "https://images.unsplash.com/photo-1504711434969-e33886168f5c?w=800&q=80";

/// Application configuration, deserialized from YAML.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// NewsAPI key. Optional here because the CLI flag / env var may supply it.
    pub api_key: Option<String>,
    /// Base URL of the provider API.
    pub base_url: String,
    /// Articles requested per page.
    pub page_size: u32,
    /// Default ISO 3166-1 country code for headline queries.
    pub country: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://newsapi.org/v2".to_string(),
            page_size: 30,
            country: "us".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file.
    ///
    /// Missing fields fall back to their defaults; a missing file is an error
    /// (pass no path at all to run on pure defaults).
    pub fn load(path: &str) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&raw)?;
        info!(path, "Loaded configuration");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.base_url, "https://newsapi.org/v2");
        assert_eq!(config.page_size, 30);
        assert_eq!(config.country, "us");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config: Config = serde_yaml::from_str("page_size: 10\n").unwrap();
        assert_eq!(config.page_size, 10);
        assert_eq!(config.base_url, "https://newsapi.org/v2");
    }

    #[test]
    fn test_full_yaml() {
        let yaml = "api_key: abc123\nbase_url: https://example.test/v2\npage_size: 5\ncountry: in\n";
        let config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api_key.as_deref(), Some("abc123"));
        assert_eq!(config.base_url, "https://example.test/v2");
        assert_eq!(config.country, "in");
    }
}
