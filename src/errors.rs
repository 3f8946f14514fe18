//! Error types for the two batch jobs.
//!
//! Every failure is fatal: nothing in this crate retries or recovers. The
//! variants exist so the process boundary can log a precise cause before
//! exiting non-zero.

use std::path::PathBuf;
use thiserror::Error;

/// Failures of the scrape job, in the order they can occur during a run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Raised when `FORCE_CRASH=true`; precedes any network or disk activity.
    #[error("Simulated scraping failure for alerting validation")]
    SimulatedFailure,

    /// Transport error, timeout, or non-2xx status.
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV record: {0}")]
    Csv(#[from] csv::Error),
}

/// Failures of the dashboard job.
#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read dataset: {0}")]
    Csv(#[from] csv::Error),

    #[error("failed to serialize chart: {0}")]
    Chart(#[from] serde_json::Error),

    #[error("failed to render dashboard template: {0}")]
    Template(#[from] askama::Error),
}
