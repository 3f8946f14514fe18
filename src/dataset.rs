//! Initiative dataset loading and the derived views behind each chart.
//!
//! Every view is recomputed from the full dataset on each run; nothing is
//! cached between invocations.

use crate::errors::DashboardError;
use crate::models::Initiative;
use itertools::Itertools;
use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;
use tracing::{info, instrument};

/// Read `eci_initiatives.csv` from disk.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub fn load_initiatives(path: &Path) -> Result<Vec<Initiative>, DashboardError> {
    let file = std::fs::File::open(path).map_err(|source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let initiatives = read_initiatives(file)?;
    info!(count = initiatives.len(), "Loaded initiatives");
    Ok(initiatives)
}

/// Parse initiative rows from any CSV source with a header row.
///
/// Extra columns are ignored; an empty `commission_outcome` cell becomes
/// `None` and is later shown as "Pending".
pub fn read_initiatives<R: Read>(source: R) -> Result<Vec<Initiative>, DashboardError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(source);
    let rows = reader.deserialize().collect::<Result<Vec<Initiative>, _>>()?;
    Ok(rows)
}

/// Total signatures per policy area, ordered by area name.
pub fn signatures_by_area(initiatives: &[Initiative]) -> Vec<(String, f64)> {
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for initiative in initiatives {
        *totals.entry(initiative.primary_policy_area.as_str()).or_default() +=
            initiative.signatures_numeric;
    }
    totals
        .into_iter()
        .map(|(area, total)| (area.to_string(), total))
        .collect()
}

/// Number of initiatives per commission outcome, with nulls counted as
/// "Pending". Most frequent first; ties keep first-appearance order.
pub fn outcome_counts(initiatives: &[Initiative]) -> Vec<(String, usize)> {
    let labels: Vec<&str> = initiatives.iter().map(Initiative::outcome_label).collect();
    let counts = labels.iter().copied().counts();
    labels
        .into_iter()
        .unique()
        .sorted_by_key(|label| Reverse(counts[label]))
        .map(|label| (label.to_string(), counts[label]))
        .collect()
}

/// Rows grouped by policy area for the scatter view. Areas appear in the
/// order they are first seen; row order within an area follows the dataset.
pub fn initiatives_by_area(initiatives: &[Initiative]) -> Vec<(&str, Vec<&Initiative>)> {
    let mut groups: Vec<(&str, Vec<&Initiative>)> = Vec::new();
    for initiative in initiatives {
        let area = initiative.primary_policy_area.as_str();
        match groups.iter_mut().find(|(seen, _)| *seen == area) {
            Some((_, rows)) => rows.push(initiative),
            None => groups.push((area, vec![initiative])),
        }
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
registration_number,title,primary_policy_area,signatures_numeric,commission_outcome,registration_year
ECI(2019)000016,Save Bees and Farmers,Environment,1054973,Answered,2019
ECI(2012)000003,Right2Water,Public Services,1659543,Answered,2012
ECI(2022)000002,Fur Free Europe,Animal Welfare,1502319,,2022
ECI(2021)000006,Stop Finning,Environment,1119996,Answered,2021
";

    #[test]
    fn test_read_initiatives_ignores_extra_columns() {
        let rows = read_initiatives(SAMPLE.as_bytes()).unwrap();
        assert_eq!(rows.len(), 4);
        assert_eq!(rows[0].title, "Save Bees and Farmers");
        assert_eq!(rows[0].registration_year, 2019);
        assert_eq!(rows[2].commission_outcome, None);
    }

    #[test]
    fn test_read_initiatives_missing_column_fails() {
        let csv = "title,primary_policy_area\nA,Environment\n";
        assert!(read_initiatives(csv.as_bytes()).is_err());
    }

    #[test]
    fn test_load_initiatives_missing_file() {
        let err = load_initiatives(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, DashboardError::Io { .. }));
    }

    #[test]
    fn test_signatures_by_area_sums_and_sorts() {
        let rows = read_initiatives(SAMPLE.as_bytes()).unwrap();
        let totals = signatures_by_area(&rows);
        assert_eq!(
            totals,
            vec![
                ("Animal Welfare".to_string(), 1_502_319.0),
                ("Environment".to_string(), 2_174_969.0),
                ("Public Services".to_string(), 1_659_543.0),
            ]
        );
    }

    #[test]
    fn test_outcome_counts_fills_pending() {
        let rows = read_initiatives(SAMPLE.as_bytes()).unwrap();
        let counts = outcome_counts(&rows);
        assert_eq!(
            counts,
            vec![("Answered".to_string(), 3), ("Pending".to_string(), 1)]
        );
    }

    #[test]
    fn test_outcome_counts_ties_keep_first_appearance() {
        let csv = "\
title,primary_policy_area,signatures_numeric,commission_outcome,registration_year
A,X,1,Withdrawn,2020
B,X,1,Answered,2020
";
        let rows = read_initiatives(csv.as_bytes()).unwrap();
        let counts = outcome_counts(&rows);
        assert_eq!(
            counts,
            vec![("Withdrawn".to_string(), 1), ("Answered".to_string(), 1)]
        );
    }

    #[test]
    fn test_initiatives_by_area_groups_rows() {
        let rows = read_initiatives(SAMPLE.as_bytes()).unwrap();
        let groups = initiatives_by_area(&rows);
        let areas: Vec<&str> = groups.iter().map(|(area, _)| *area).collect();
        assert_eq!(areas, vec!["Environment", "Public Services", "Animal Welfare"]);
        let env: Vec<&str> = groups[0].1.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(env, vec!["Save Bees and Farmers", "Stop Finning"]);
    }
}
