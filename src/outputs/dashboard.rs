//! Static HTML dashboard generation.
//!
//! Loads the initiative dataset, builds the three charts, and embeds them in
//! `templates/dashboard.html`. The output file is fully regenerated and
//! overwritten on every run.

use crate::charts::{
    PLOTLY_CDN, outcome_donut_chart, signatures_by_area_chart, signatures_scatter_chart,
};
use crate::dataset::load_initiatives;
use crate::errors::DashboardError;
use crate::models::Initiative;
use askama::Template;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

#[derive(Template)]
#[template(path = "dashboard.html")]
struct DashboardPage<'a> {
    page_title: &'a str,
    heading: &'a str,
    plotly_src: &'a str,
    signatures_chart: String,
    outcomes_chart: String,
    scatter_chart: String,
}

/// Render the full dashboard document for a dataset.
pub fn render_dashboard(initiatives: &[Initiative]) -> Result<String, DashboardError> {
    let page = DashboardPage {
        page_title: "ECI Dashboard POC",
        heading: "EU Citizens' Initiatives Tracker",
        plotly_src: PLOTLY_CDN,
        signatures_chart: signatures_by_area_chart(initiatives).to_fragment()?,
        outcomes_chart: outcome_donut_chart(initiatives).to_fragment()?,
        scatter_chart: signatures_scatter_chart(initiatives).to_fragment()?,
    };
    Ok(page.render()?)
}

/// Write the page, creating the parent directory if needed.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_dashboard(path: &Path, html: &str) -> Result<(), DashboardError> {
    let io_error = |source| DashboardError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).await.map_err(io_error)?;
    }
    fs::write(path, html).await.map_err(io_error)?;
    info!(bytes = html.len(), "Dashboard written");
    Ok(())
}

/// Run the aggregate-render job: `input` CSV in, `output` HTML out.
#[instrument(level = "info", skip_all, fields(input = %input.display(), output = %output.display()))]
pub async fn build_dashboard(input: &Path, output: &Path) -> Result<(), DashboardError> {
    let initiatives = load_initiatives(input)?;
    let html = render_dashboard(&initiatives)?;
    write_dashboard(output, &html).await?;
    info!(
        initiatives = initiatives.len(),
        path = %output.display(),
        "Dashboard successfully updated"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::read_initiatives;
    use tempfile::tempdir;

    const DATASET: &str = "\
title,primary_policy_area,signatures_numeric,commission_outcome,registration_year
Save Bees and Farmers,Environment,1054973,Answered,2019
Fur Free Europe,Animal Welfare,1502319,,2022
";

    #[test]
    fn test_render_dashboard_embeds_three_charts() {
        let rows = read_initiatives(DATASET.as_bytes()).unwrap();
        let html = render_dashboard(&rows).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>ECI Dashboard POC</title>"));
        assert!(html.contains("Initiatives Tracker</h1>"));
        assert_eq!(html.matches("https://cdn.plot.ly/plotly-2.32.0.min.js").count(), 1);
        assert_eq!(html.matches("Plotly.newPlot(").count(), 3);
        assert!(html.contains(r#"id="chart-signatures-by-area""#));
        assert!(html.contains(r#"id="chart-outcomes""#));
        assert!(html.contains(r#"id="chart-signatures-scatter""#));
    }

    #[test]
    fn test_render_dashboard_fragments_are_not_escaped() {
        let rows = read_initiatives(DATASET.as_bytes()).unwrap();
        let html = render_dashboard(&rows).unwrap();
        assert!(!html.contains("&lt;div"));
        assert!(html.contains(r#""labels":["Answered","Pending"]"#));
    }

    #[tokio::test]
    async fn test_build_dashboard_pending_category() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("eci_initiatives.csv");
        let output = tmp.path().join("docs").join("index.html");
        std::fs::write(
            &input,
            "title,primary_policy_area,signatures_numeric,commission_outcome,registration_year\n\
             Only One,Environment,1200,,2024\n",
        )
        .unwrap();

        build_dashboard(&input, &output).await.unwrap();

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(html.contains(r#""labels":["Pending"]"#));
        assert!(html.contains(r#""values":[1]"#));
    }

    #[tokio::test]
    async fn test_build_dashboard_overwrites_output() {
        let tmp = tempdir().unwrap();
        let input = tmp.path().join("eci_initiatives.csv");
        let output = tmp.path().join("index.html");
        std::fs::write(&input, DATASET).unwrap();
        std::fs::write(&output, "stale").unwrap();

        build_dashboard(&input, &output).await.unwrap();

        let html = std::fs::read_to_string(&output).unwrap();
        assert!(!html.contains("stale"));
        assert!(html.contains("Plotly.newPlot("));
    }

    #[tokio::test]
    async fn test_build_dashboard_missing_input() {
        let tmp = tempdir().unwrap();
        let output = tmp.path().join("index.html");
        let err = build_dashboard(&tmp.path().join("missing.csv"), &output)
            .await
            .unwrap_err();
        assert!(matches!(err, DashboardError::Io { .. }));
        assert!(!output.exists());
    }
}
