//! European Citizens' Initiative page scraper.
//!
//! One run fetches a single initiative page, reads its `<title>`, and writes a
//! raw snapshot plus a one-row CSV record into a fresh timestamped directory.
//!
//! # Ordering
//!
//! 1. Crash-test check (`FORCE_CRASH`), before any network activity
//! 2. Fetch, which must fully succeed before anything touches the disk
//! 3. Title extraction, where a missing title degrades to a sentinel
//! 4. Persist, see [`crate::outputs::snapshot`]
//!
//! Nothing is retried; every failure is returned to the caller as-is.

use crate::errors::ScrapeError;
use crate::models::{FetchResult, RegistrationNumber, ScrapedRecord, UNKNOWN_TITLE};
use crate::outputs::snapshot::{self, Snapshot};
use crate::utils::{run_timestamp, truncate_for_log};
use chrono::Local;
use reqwest::Client;
use scraper::{Html, Selector};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Identifying User-Agent sent with every request.
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) ECI-Tracker-POC/1.0";

/// Source of page bodies.
///
/// The job only talks to the network through this trait, so tests can prove
/// that crash mode never issues a request.
pub trait PageFetcher {
    async fn fetch(&self, url: &Url) -> Result<FetchResult, ScrapeError>;
}

/// [`PageFetcher`] backed by a `reqwest` client with a fixed User-Agent and
/// a per-request timeout.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ScrapeError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(ScrapeError::Client)?;
        Ok(Self { client })
    }
}

impl PageFetcher for HttpFetcher {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &Url) -> Result<FetchResult, ScrapeError> {
        let fetch_error = |source| ScrapeError::Fetch {
            url: url.to_string(),
            source,
        };

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(fetch_error)?
            .error_for_status()
            .map_err(fetch_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(fetch_error)?;
        debug!(status, bytes = body.len(), preview = %truncate_for_log(&body, 200), "Fetched page");

        Ok(FetchResult { status, body })
    }
}

/// Everything one scrape run needs.
#[derive(Debug, Clone)]
pub struct ScrapeJob {
    pub url: Url,
    pub registration_number: RegistrationNumber,
    pub data_dir: PathBuf,
    pub force_crash: bool,
}

/// What a successful run produced.
#[derive(Debug)]
pub struct ScrapeOutcome {
    pub record: ScrapedRecord,
    pub snapshot: Snapshot,
}

/// Run the fetch-extract-persist pipeline once.
///
/// # Errors
///
/// - [`ScrapeError::SimulatedFailure`] when `job.force_crash` is set; the
///   fetcher is never called and no directory is created
/// - [`ScrapeError::Fetch`] on any transport failure or non-2xx status; no
///   directory is created
/// - [`ScrapeError::Io`] / [`ScrapeError::Csv`] from persisting
#[instrument(level = "info", skip_all, fields(url = %job.url, registration_number = %job.registration_number))]
pub async fn run<F: PageFetcher>(fetcher: &F, job: &ScrapeJob) -> Result<ScrapeOutcome, ScrapeError> {
    if job.force_crash {
        warn!("Crash mode activated via environment variable");
        return Err(ScrapeError::SimulatedFailure);
    }

    info!(url = %job.url, "Fetching data");
    let page = fetcher.fetch(&job.url).await?;

    let title = extract_title(&page.body);
    info!(status = page.status, %title, "Successfully scraped page");

    let timestamp = run_timestamp(&Local::now());
    let record = ScrapedRecord {
        registration_number: job.registration_number.to_string(),
        scraped_title: title,
        timestamp_scraped: timestamp.clone(),
        source_url: job.url.to_string(),
    };

    let snapshot = snapshot::persist(
        &job.data_dir,
        &timestamp,
        &job.registration_number.file_stem(),
        &record,
        &page.body,
    )
    .await?;

    Ok(ScrapeOutcome { record, snapshot })
}

/// Read the page title, trimmed, or [`UNKNOWN_TITLE`] when there is none.
///
/// Only the first non-empty line of the `<title>` text is kept, so a title
/// split across lines still yields a single-line CSV field.
pub fn extract_title(html: &str) -> String {
    let document = Html::parse_document(html);
    let selector = Selector::parse("title").expect("static selector is valid");

    document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>())
        .and_then(|text| {
            text.lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string())
}
