//! Page scrapers.
//!
//! | Source | Module | Method |
//! |--------|--------|--------|
//! | European Citizens' Initiative register | [`eci`] | single-page HTML snapshot |
//!
//! A scraper exposes a `run` entry point that fails fast: no retries, and any
//! error is returned before partial output reaches the disk.

pub mod eci;
