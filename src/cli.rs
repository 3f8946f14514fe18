//! Command-line interface definitions for the ECI tracker.
//!
//! The two jobs are independent subcommands; each invocation runs exactly one.
//! Options can be provided via flags or, where noted, environment variables.

use crate::models::RegistrationNumber;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use url::Url;

pub const DEFAULT_URL: &str =
    "https://citizens-initiative.europa.eu/initiatives/details/2024/000007_en";
pub const DEFAULT_REGISTRATION_NUMBER: &str = "ECI(2024)000007";

/// Command-line arguments for the ECI tracker.
///
/// # Examples
///
/// ```sh
/// # Snapshot the initiative page into data/<timestamp>/
/// eci_tracker scrape
///
/// # Exercise the alerting path without touching the network
/// FORCE_CRASH=true eci_tracker scrape
///
/// # Rebuild docs/index.html from data/eci_initiatives.csv
/// eci_tracker dashboard
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Fetch one initiative page and persist an HTML snapshot plus a CSV record
    Scrape(ScrapeArgs),
    /// Aggregate the initiatives dataset into a static HTML dashboard
    Dashboard(DashboardArgs),
}

#[derive(Args, Debug)]
pub struct ScrapeArgs {
    /// Initiative page to fetch
    #[arg(long, env = "ECI_URL", default_value = DEFAULT_URL)]
    pub url: Url,

    /// Registration number recorded for the page
    #[arg(long, env = "ECI_REGISTRATION_NUMBER", default_value = DEFAULT_REGISTRATION_NUMBER)]
    pub registration_number: RegistrationNumber,

    /// Root directory for timestamped snapshot folders
    #[arg(short, long, default_value = "data")]
    pub data_dir: PathBuf,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 15)]
    pub timeout_secs: u64,

    /// Fail immediately with a simulated error when set to "true" (any case)
    #[arg(long, env = "FORCE_CRASH")]
    pub force_crash: Option<String>,
}

impl ScrapeArgs {
    pub fn crash_requested(&self) -> bool {
        crash_requested(self.force_crash.as_deref())
    }
}

#[derive(Args, Debug)]
pub struct DashboardArgs {
    /// Initiatives dataset
    #[arg(short, long, default_value = "data/eci_initiatives.csv")]
    pub input: PathBuf,

    /// Dashboard page, overwritten on every run
    #[arg(short, long, default_value = "docs/index.html")]
    pub output: PathBuf,
}

/// Whether the crash-test flag value asks for a simulated failure.
///
/// Only `"true"` (ignoring ASCII case) enables crash mode; anything else,
/// including absence, proceeds normally.
pub fn crash_requested(flag: Option<&str>) -> bool {
    flag.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}
