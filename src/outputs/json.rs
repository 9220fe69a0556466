//! JSON output for job records.
//!
//! The file is UTF-8, indented with two spaces, and keeps non-ASCII text as
//! is (no `\u` escapes). Absent fields are written as `null`.

use crate::models::JobRecord;
use crate::utils::ensure_parent_dir;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{error, info, instrument};

/// Serialize a [`JobRecord`] in the output format.
pub fn to_json(record: &JobRecord) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(record)
}

/// Write a [`JobRecord`] to `path`, creating parent directories as needed.
///
/// # Errors
///
/// Returns an error if serialization, directory creation, or the write fails.
#[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
pub async fn write_record(record: &JobRecord, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
    let path = path.as_ref();
    let json = to_json(record)?;

    if let Err(e) = ensure_parent_dir(path).await {
        error!(error = %e, "Failed to prepare output directory");
        return Err(e);
    }

    fs::write(path, json).await?;
    info!("Wrote job record JSON");
    Ok(())
}
