//! Chart backends. The web build drives Chart.js through JS interop; native
//! builds render SVG themselves.

use serde_json::{json, Value};

use super::series::{ChartSeries, SeriesKind};

#[cfg(target_arch = "wasm32")]
mod chartjs;
mod svg;

#[cfg(target_arch = "wasm32")]
pub use chartjs::{ChartJsBackend, ChartJsChart};
pub use svg::{render_svg, SvgBackend, SvgChart};

/// Backend used by the current platform.
#[cfg(target_arch = "wasm32")]
pub type PlatformBackend = ChartJsBackend;
#[cfg(not(target_arch = "wasm32"))]
pub type PlatformBackend = SvgBackend;

/// Chart.js configuration for a line chart of all four series.
pub fn chart_config(series: &ChartSeries) -> Value {
    let datasets: Vec<Value> = SeriesKind::ALL
        .into_iter()
        .map(|kind| {
            json!({
                "label": kind.label(),
                "data": series.values(kind),
                "borderColor": kind.color(),
                "backgroundColor": kind.fill(),
                "borderWidth": 2,
                "pointRadius": 2,
                "tension": 0.3,
                "fill": false,
            })
        })
        .collect();

    json!({
        "type": "line",
        "data": {
            "labels": series.labels,
            "datasets": datasets,
        },
        "options": {
            "responsive": true,
            "maintainAspectRatio": false,
            "interaction": { "mode": "index", "intersect": false },
            "plugins": { "legend": { "position": "bottom" } },
            "scales": {
                "y": { "beginAtZero": true, "ticks": { "precision": 0 } }
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::metadata::DailyMetricRow;
    use crate::analytics::series::build_series;

    #[test]
    fn config_has_one_dataset_per_metric() {
        let series = build_series(&[DailyMetricRow {
            date: "2024-01-01".into(),
            page_views: 5,
            property_views: 2,
            project_views: 1,
            form_submissions: 0,
        }]);
        let config = chart_config(&series);

        assert_eq!(config["type"], "line");
        assert_eq!(config["data"]["labels"], json!(["Jan 1"]));
        let datasets = config["data"]["datasets"].as_array().unwrap();
        assert_eq!(datasets.len(), 4);
        assert_eq!(datasets[0]["label"], "Page Views");
        assert_eq!(datasets[0]["data"], json!([5]));
        assert_eq!(datasets[3]["label"], "Form Submissions");
        assert_eq!(config["options"]["scales"]["y"]["beginAtZero"], true);
    }
}
