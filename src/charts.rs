//! Plotly.js figures for the dashboard.
//!
//! Each chart is a figure description (traces + layout) serialized to JSON and
//! wrapped in an embeddable fragment: a target `<div>` and a `<script>` that
//! calls `Plotly.newPlot`. The fragments carry no document wrapper and do not
//! bundle Plotly.js; the page loads it once from [`PLOTLY_CDN`].

use crate::dataset::{initiatives_by_area, outcome_counts, signatures_by_area};
use crate::models::Initiative;
use serde_json::{Value, json};

pub const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.32.0.min.js";

const CHART_HEIGHT: u32 = 400;
const SCATTER_SIZE_MAX: f64 = 40.0;

/// Plotly's qualitative "Pastel" palette.
const PASTEL: [&str; 11] = [
    "rgb(102, 197, 204)",
    "rgb(246, 207, 113)",
    "rgb(248, 156, 116)",
    "rgb(220, 176, 242)",
    "rgb(135, 197, 95)",
    "rgb(158, 185, 243)",
    "rgb(254, 136, 177)",
    "rgb(201, 219, 116)",
    "rgb(139, 224, 164)",
    "rgb(180, 151, 231)",
    "rgb(179, 179, 179)",
];

/// Plotly's default qualitative colorway, used to colour series by area.
const COLORWAY: [&str; 10] = [
    "#636efa", "#EF553B", "#00cc96", "#ab63fa", "#FFA15A", "#19d3f3", "#FF6692", "#B6E880",
    "#FF97FF", "#FECB52",
];

/// A Plotly figure bound to a DOM id.
#[derive(Debug, Clone)]
pub struct Figure {
    pub id: String,
    pub data: Vec<Value>,
    pub layout: Value,
}

impl Figure {
    /// Render as an HTML fragment for embedding in a page that already loads
    /// Plotly.js.
    pub fn to_fragment(&self) -> Result<String, serde_json::Error> {
        let data = script_safe(&serde_json::to_string(&self.data)?);
        let layout = script_safe(&serde_json::to_string(&self.layout)?);
        let id = &self.id;
        Ok(format!(
            r#"<div>
    <div id="{id}" class="plotly-graph-div" style="height:{CHART_HEIGHT}px; width:100%;"></div>
    <script type="text/javascript">
        window.PLOTLYENV = window.PLOTLYENV || {{}};
        if (document.getElementById("{id}")) {{
            Plotly.newPlot("{id}", {data}, {layout}, {{"responsive": true}});
        }}
    </script>
</div>"#
        ))
    }
}

/// Keep serialized JSON from closing the surrounding `<script>` element.
fn script_safe(json: &str) -> String {
    json.replace("</", "<\\/")
}

/// Shared layout: white template, fixed height, tight margins.
fn base_layout(title: &str) -> Value {
    json!({
        "title": { "text": title },
        "height": CHART_HEIGHT,
        "margin": { "l": 20, "r": 20, "t": 50, "b": 20 },
        "template": {
            "layout": {
                "colorway": COLORWAY,
                "paper_bgcolor": "white",
                "plot_bgcolor": "white",
                "xaxis": { "gridcolor": "#EBF0F8", "zerolinecolor": "#EBF0F8" },
                "yaxis": { "gridcolor": "#EBF0F8", "zerolinecolor": "#EBF0F8" },
            }
        },
    })
}

/// Bar chart of total signatures per policy area, one coloured series per area.
pub fn signatures_by_area_chart(initiatives: &[Initiative]) -> Figure {
    let data = signatures_by_area(initiatives)
        .into_iter()
        .map(|(area, total)| {
            json!({
                "type": "bar",
                "name": area,
                "legendgroup": area,
                "x": [area],
                "y": [total],
                "texttemplate": "%{y:.2s}",
                "textposition": "auto",
                "hovertemplate": "Policy Area=%{x}<br>Total Signatures=%{y}<extra></extra>",
            })
        })
        .collect();

    let mut layout = base_layout("Total Signatures by Policy Area");
    layout["barmode"] = json!("relative");
    layout["xaxis"] = json!({ "title": { "text": "Policy Area" } });
    layout["yaxis"] = json!({ "title": { "text": "Total Signatures" } });

    Figure {
        id: "chart-signatures-by-area".to_string(),
        data,
        layout,
    }
}

/// Donut chart of initiatives per commission outcome.
pub fn outcome_donut_chart(initiatives: &[Initiative]) -> Figure {
    let (labels, values): (Vec<String>, Vec<usize>) =
        outcome_counts(initiatives).into_iter().unzip();

    let data = vec![json!({
        "type": "pie",
        "labels": labels,
        "values": values,
        "hole": 0.45,
        "textposition": "inside",
        "textinfo": "percent+label",
        "marker": { "colors": PASTEL },
        "sort": false,
    })];

    let mut layout = base_layout("Initiatives by Commission Outcome");
    layout["showlegend"] = json!(false);

    Figure {
        id: "chart-outcomes".to_string(),
        data,
        layout,
    }
}

/// Bubble scatter of signatures against registration year, one series per
/// policy area, bubble area proportional to signatures.
pub fn signatures_scatter_chart(initiatives: &[Initiative]) -> Figure {
    let max_signatures = initiatives
        .iter()
        .map(|i| i.signatures_numeric)
        .fold(0.0_f64, f64::max);
    let sizeref = if max_signatures > 0.0 {
        2.0 * max_signatures / (SCATTER_SIZE_MAX * SCATTER_SIZE_MAX)
    } else {
        1.0
    };

    let data = initiatives_by_area(initiatives)
        .into_iter()
        .map(|(area, rows)| {
            let years: Vec<i32> = rows.iter().map(|i| i.registration_year).collect();
            let signatures: Vec<f64> = rows.iter().map(|i| i.signatures_numeric).collect();
            let titles: Vec<&str> = rows.iter().map(|i| i.title.as_str()).collect();
            json!({
                "type": "scatter",
                "mode": "markers",
                "name": area,
                "legendgroup": area,
                "x": years,
                "y": signatures,
                "hovertext": titles,
                "hovertemplate": "<b>%{hovertext}</b><br><br>Registration Year=%{x}<br>Total Signatures=%{y}<extra></extra>",
                "marker": {
                    "size": signatures,
                    "sizemode": "area",
                    "sizeref": sizeref,
                },
            })
        })
        .collect();

    let mut layout = base_layout("Signatures per Initiative by Year");
    layout["xaxis"] = json!({ "title": { "text": "Registration Year" }, "dtick": 1 });
    layout["yaxis"] = json!({ "title": { "text": "Total Signatures" } });

    Figure {
        id: "chart-signatures-scatter".to_string(),
        data,
        layout,
    }
}
