//! Output generation modules for JSON and Markdown digests.
//!
//! # Submodules
//!
//! - [`json`]: Writes the [`crate::models::Digest`] to a JSON file for API
//!   consumption
//! - [`markdown`]: Renders the digest as a readable Markdown document
//!
//! # Output Structure
//!
//! ```text
//! json_output_dir/
//! └── 2026-02-19/
//!     └── top-headlines.json
//!
//! markdown_output_dir/
//! └── 2026-02-19_top-headlines.md
//! ```

pub mod json;
pub mod markdown;
