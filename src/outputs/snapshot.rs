//! Timestamped snapshot persistence for the scrape job.
//!
//! # Output Structure
//!
//! ```text
//! data_dir/
//! └── 2025-05-06_20-30-00/
//!     ├── ECI_2024_000007.html   # raw response body
//!     └── eci_poc_data.csv       # header + one ScrapedRecord row
//! ```
//!
//! Both files are written into a hidden staging directory
//! (`.<timestamp>.partial`) which is renamed to the run directory only after
//! every write succeeded. A failed run leaves no run directory behind, and a
//! run directory that already exists for the same second is an error rather
//! than a merge.

use crate::errors::ScrapeError;
use crate::models::ScrapedRecord;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{error, info, instrument, warn};

/// File name of the one-row record CSV.
pub const RECORD_CSV_NAME: &str = "eci_poc_data.csv";

/// Paths written by one successful [`persist`] call.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub dir: PathBuf,
    pub html_path: PathBuf,
    pub csv_path: PathBuf,
}

/// Write the raw page and its record into `data_dir/<run_timestamp>/`.
///
/// # Arguments
///
/// * `data_dir` - Root directory; created recursively if missing
/// * `run_timestamp` - Directory name, `YYYY-MM-DD_HH-MM-SS`
/// * `file_stem` - Filesystem-safe registration number for the HTML file
/// * `record` - The row written under the fixed header
/// * `raw_html` - Response body, written untouched
///
/// # Errors
///
/// [`ScrapeError::Io`] if a directory cannot be created (including when the
/// run directory already exists) or a file cannot be written, and
/// [`ScrapeError::Csv`] if the record fails to serialize. On error the run
/// directory does not exist.
#[instrument(level = "info", skip_all, fields(data_dir = %data_dir.display(), %run_timestamp))]
pub async fn persist(
    data_dir: &Path,
    run_timestamp: &str,
    file_stem: &str,
    record: &ScrapedRecord,
    raw_html: &str,
) -> Result<Snapshot, ScrapeError> {
    let csv_bytes = record_to_csv(record)?;

    fs::create_dir_all(data_dir)
        .await
        .map_err(|source| io_error(data_dir, source))?;

    let dir = data_dir.join(run_timestamp);
    let exists = fs::try_exists(&dir)
        .await
        .map_err(|source| io_error(&dir, source))?;
    if exists {
        error!(path = %dir.display(), "Run directory already exists");
        return Err(io_error(
            &dir,
            io::Error::new(io::ErrorKind::AlreadyExists, "run directory already exists"),
        ));
    }

    let staging = data_dir.join(format!(".{run_timestamp}.partial"));
    fs::create_dir(&staging)
        .await
        .map_err(|source| io_error(&staging, source))?;

    let html_name = format!("{file_stem}.html");
    if let Err(e) = write_files(&staging, &html_name, raw_html, &csv_bytes).await {
        error!(error = %e, "Failed to write snapshot files");
        discard(&staging).await;
        return Err(e);
    }

    if let Err(source) = fs::rename(&staging, &dir).await {
        error!(path = %dir.display(), error = %source, "Failed to move snapshot into place");
        discard(&staging).await;
        return Err(io_error(&dir, source));
    }
    info!(path = %dir.display(), "Created directory");

    let snapshot = Snapshot {
        html_path: dir.join(&html_name),
        csv_path: dir.join(RECORD_CSV_NAME),
        dir,
    };
    info!(path = %snapshot.html_path.display(), bytes = raw_html.len(), "Raw HTML saved");
    info!(path = %snapshot.csv_path.display(), "CSV data saved");
    Ok(snapshot)
}

async fn write_files(
    staging: &Path,
    html_name: &str,
    raw_html: &str,
    csv_bytes: &[u8],
) -> Result<(), ScrapeError> {
    let csv_path = staging.join(RECORD_CSV_NAME);
    fs::write(&csv_path, csv_bytes)
        .await
        .map_err(|source| io_error(&csv_path, source))?;

    let html_path = staging.join(html_name);
    fs::write(&html_path, raw_html)
        .await
        .map_err(|source| io_error(&html_path, source))?;
    Ok(())
}

/// Best-effort removal of a staging directory after a failed run.
async fn discard(staging: &Path) {
    if let Err(e) = fs::remove_dir_all(staging).await {
        warn!(path = %staging.display(), error = %e, "Failed to remove staging directory");
    }
}

/// Serialize one record with its header row.
fn record_to_csv(record: &ScrapedRecord) -> Result<Vec<u8>, ScrapeError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.serialize(record)?;
    writer
        .into_inner()
        .map_err(|e| ScrapeError::Csv(csv::Error::from(e.into_error())))
}

fn io_error(path: &Path, source: std::io::Error) -> ScrapeError {
    ScrapeError::Io {
        path: path.to_path_buf(),
        source,
    }
}
