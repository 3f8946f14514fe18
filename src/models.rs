//! Data models shared by the scrape and dashboard jobs.
//!
//! - [`RegistrationNumber`]: validated `ECI(YYYY)NNNNNN` identifier
//! - [`FetchResult`]: raw body and status of one HTTP GET
//! - [`ScrapedRecord`]: the single CSV row persisted per scrape run
//! - [`Initiative`]: one row of the dashboard dataset

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Sentinel used when a page has no usable `<title>`.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Outcome label substituted for empty `commission_outcome` cells.
pub const PENDING_OUTCOME: &str = "Pending";

static REGISTRATION_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^ECI\(\d{4}\)\d{6}$").expect("registration pattern is valid"));

/// Identifier of a European Citizens' Initiative, e.g. `ECI(2024)000007`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationNumber(String);

impl RegistrationNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Filesystem-safe form used for the snapshot file name.
    ///
    /// `ECI(2024)000007` becomes `ECI_2024_000007`.
    pub fn file_stem(&self) -> String {
        self.0.replace(['(', ')'], "_")
    }
}

impl FromStr for RegistrationNumber {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if REGISTRATION_RE.is_match(s) {
            Ok(Self(s.to_string()))
        } else {
            Err(format!("'{s}' is not of the form ECI(YYYY)NNNNNN"))
        }
    }
}

impl fmt::Display for RegistrationNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw response of a single GET, discarded once written to disk.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub status: u16,
    pub body: String,
}

/// Metadata scraped from one initiative page.
///
/// Field order matches the CSV header
/// `registration_number,scraped_title,timestamp_scraped,source_url`.
/// Every field is populated; a missing title is mapped to [`UNKNOWN_TITLE`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapedRecord {
    pub registration_number: String,
    pub scraped_title: String,
    pub timestamp_scraped: String,
    pub source_url: String,
}

/// One initiative row of `eci_initiatives.csv`.
///
/// Columns not listed here are ignored.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Initiative {
    pub primary_policy_area: String,
    pub signatures_numeric: f64,
    pub commission_outcome: Option<String>,
    pub registration_year: i32,
    pub title: String,
}

impl Initiative {
    /// Outcome label with nulls and blanks coerced to [`PENDING_OUTCOME`].
    pub fn outcome_label(&self) -> &str {
        match self.commission_outcome.as_deref().map(str::trim) {
            Some(outcome) if !outcome.is_empty() => outcome,
            _ => PENDING_OUTCOME,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registration_number_parse() {
        let reg: RegistrationNumber = "ECI(2024)000007".parse().unwrap();
        assert_eq!(reg.as_str(), "ECI(2024)000007");
        assert_eq!(reg.to_string(), "ECI(2024)000007");
    }

    #[test]
    fn test_registration_number_rejects_malformed() {
        assert!("ECI2024000007".parse::<RegistrationNumber>().is_err());
        assert!("ECI(24)000007".parse::<RegistrationNumber>().is_err());
        assert!("ECI(2024)7".parse::<RegistrationNumber>().is_err());
        assert!("".parse::<RegistrationNumber>().is_err());
    }

    #[test]
    fn test_file_stem_has_no_parentheses() {
        for raw in ["ECI(2024)000007", "ECI(2012)000001", "ECI(2099)999999"] {
            let stem = raw.parse::<RegistrationNumber>().unwrap().file_stem();
            assert!(!stem.contains('('));
            assert!(!stem.contains(')'));
        }
        let reg: RegistrationNumber = "ECI(2024)000007".parse().unwrap();
        assert_eq!(reg.file_stem(), "ECI_2024_000007");
    }

    #[test]
    fn test_outcome_label_defaults_to_pending() {
        let mut initiative = Initiative {
            primary_policy_area: "Environment".to_string(),
            signatures_numeric: 1_000.0,
            commission_outcome: None,
            registration_year: 2022,
            title: "Save the Bees".to_string(),
        };
        assert_eq!(initiative.outcome_label(), "Pending");

        initiative.commission_outcome = Some("   ".to_string());
        assert_eq!(initiative.outcome_label(), "Pending");

        initiative.commission_outcome = Some("Answered".to_string());
        assert_eq!(initiative.outcome_label(), "Answered");
    }
}
