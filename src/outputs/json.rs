//! JSON output generation for the digest.
//!
//! Serializes the complete [`Digest`] (articles plus derived analytics) to a
//! JSON file for consumption by external clients.
//!
//! # Output Structure
//!
//! Files are organized by date with one file per feed:
//! ```text
//! json_output_dir/
//! └── 2026-02-19/
//!     ├── top-headlines.json
//!     └── search-apple.json
//! ```

use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

use crate::models::Digest;
use crate::utils::slugify;

/// Write a [`Digest`] to a JSON file under a date-based directory.
///
/// # Output Path
///
/// `{json_output_dir}/{local_date}/{feed slug}.json`
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_digest(digest: &Digest, json_output_dir: &str) -> Result<(), Box<dyn Error>> {
    let json = serde_json::to_string(digest)?;

    let full_json_dir = format!("{}/{}", json_output_dir, digest.local_date);
    info!(%full_json_dir, "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(%full_json_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = format!("{}/{}.json", full_json_dir, slugify(&digest.feed));
    info!(path = %output_json_filename, "Writing JSON");
    fs::write(&output_json_filename, json).await?;
    info!(path = %output_json_filename, "Wrote JSON digest file");

    Ok(())
}
