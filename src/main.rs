//! # ECI Tracker
//!
//! Two independent batch jobs around European Citizens' Initiatives:
//!
//! - `scrape`: fetch one initiative page, read its title, and persist the raw
//!   HTML plus a one-row CSV record into `data/<YYYY-MM-DD_HH-MM-SS>/`
//! - `dashboard`: aggregate `data/eci_initiatives.csv` into three charts and
//!   write them into the static page `docs/index.html`
//!
//! ## Usage
//!
//! ```sh
//! eci_tracker scrape
//! FORCE_CRASH=true eci_tracker scrape   # exits non-zero without fetching
//! eci_tracker dashboard
//! ```
//!
//! Both jobs fail loudly: any error is logged and returned from `main`, so the
//! process exits non-zero and external alerting can observe it.

use clap::Parser;
use std::error::Error;
use std::time::Duration;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod charts;
mod cli;
mod dataset;
mod errors;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::{Cli, Command, DashboardArgs, ScrapeArgs};
use scrapers::eci::{self, HttpFetcher, ScrapeJob};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    match args.command {
        Command::Scrape(scrape) => run_scrape(scrape).await?,
        Command::Dashboard(dashboard) => run_dashboard(dashboard).await?,
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );
    Ok(())
}

async fn run_scrape(args: ScrapeArgs) -> Result<(), Box<dyn Error>> {
    info!("Starting ECI scraper");

    let job = ScrapeJob {
        force_crash: args.crash_requested(),
        url: args.url,
        registration_number: args.registration_number,
        data_dir: args.data_dir,
    };
    let fetcher = HttpFetcher::new(Duration::from_secs(args.timeout_secs))?;

    match eci::run(&fetcher, &job).await {
        Ok(outcome) => {
            info!(
                dir = %outcome.snapshot.dir.display(),
                html = %outcome.snapshot.html_path.display(),
                csv = %outcome.snapshot.csv_path.display(),
                title = %outcome.record.scraped_title,
                "Scrape completed successfully"
            );
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Scrape failed");
            Err(e.into())
        }
    }
}

async fn run_dashboard(args: DashboardArgs) -> Result<(), Box<dyn Error>> {
    info!("Starting dashboard build");

    if let Err(e) = outputs::dashboard::build_dashboard(&args.input, &args.output).await {
        error!(
            input = %args.input.display(),
            output = %args.output.display(),
            error = %e,
            "Dashboard build failed"
        );
        return Err(e.into());
    }
    Ok(())
}
