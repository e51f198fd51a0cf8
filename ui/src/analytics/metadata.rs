//! Daily metric rows embedded by the server-side template.
//!
//! The producer is loosely typed: counts may arrive as numbers, numeric
//! strings, `null`, or not at all. Rows decode with default-on-missing
//! semantics so a bad field costs one value, never the whole payload.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use time::{format_description::well_known::Rfc3339, macros::format_description, Date, OffsetDateTime};

use crate::core::config::DashboardConfig;
use crate::core::error::MetadataError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyMetricRow {
    #[serde(default, deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_count")]
    pub page_views: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub property_views: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub project_views: u64,
    #[serde(default, deserialize_with = "lenient_count")]
    pub form_submissions: u64,
}

impl DailyMetricRow {
    /// Calendar day of this row, if `date` is `YYYY-MM-DD` or RFC 3339.
    pub fn day(&self) -> Option<Date> {
        parse_day(&self.date)
    }
}

/// Decode a JSON array of rows.
pub fn parse_rows(raw: &str) -> Result<Vec<DailyMetricRow>, MetadataError> {
    serde_json::from_str(raw).map_err(MetadataError::Malformed)
}

/// Decode rows, degrading a malformed payload to an empty list.
pub fn rows_or_empty(raw: &str) -> Vec<DailyMetricRow> {
    parse_rows(raw).unwrap_or_else(|err| {
        tracing::warn!(%err, "discarding malformed analytics metadata");
        Vec::new()
    })
}

/// Rows supplied by the hosting page (web) or the configured file (desktop).
pub fn load_embedded(config: &DashboardConfig) -> Vec<DailyMetricRow> {
    match read_source(config) {
        Ok(raw) => {
            let rows = rows_or_empty(&raw);
            tracing::info!(rows = rows.len(), "analytics metadata loaded");
            rows
        }
        Err(err) => {
            tracing::debug!(%err, "no analytics metadata");
            Vec::new()
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn read_source(config: &DashboardConfig) -> Result<String, MetadataError> {
    crate::core::platform::element_attribute(
        &config.metadata_element_id,
        &config.metadata_attribute,
    )
    .ok_or_else(|| {
        MetadataError::Unavailable(format!(
            "#{} has no {} attribute",
            config.metadata_element_id, config.metadata_attribute
        ))
    })
}

#[cfg(not(target_arch = "wasm32"))]
fn read_source(config: &DashboardConfig) -> Result<String, MetadataError> {
    let path = config
        .metadata_path
        .as_deref()
        .ok_or_else(|| MetadataError::Unavailable("metadata_path is not set".to_string()))?;
    std::fs::read_to_string(path).map_err(|err| MetadataError::Unavailable(format!("{path}: {err}")))
}

pub(crate) fn parse_day(raw: &str) -> Option<Date> {
    let trimmed = raw.trim();
    Date::parse(trimmed, &format_description!("[year]-[month]-[day]"))
        .ok()
        .or_else(|| {
            OffsetDateTime::parse(trimmed, &Rfc3339)
                .ok()
                .map(|stamp| stamp.date())
        })
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(coerce_count(&value))
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    })
}

fn coerce_count(value: &Value) -> u64 {
    match value {
        Value::Number(number) => number
            .as_u64()
            .or_else(|| number.as_f64().and_then(truncate_non_negative))
            .unwrap_or(0),
        Value::String(text) => {
            let trimmed = text.trim();
            trimmed
                .parse::<u64>()
                .ok()
                .or_else(|| trimmed.parse::<f64>().ok().and_then(truncate_non_negative))
                .unwrap_or(0)
        }
        _ => 0,
    }
}

fn truncate_non_negative(value: f64) -> Option<u64> {
    (value.is_finite() && value >= 0.0).then(|| value.trunc() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use time::macros::date;

    #[test]
    fn decodes_well_formed_rows() {
        let rows = parse_rows(
            r#"[{"date":"2024-01-01","page_views":5,"property_views":2,"project_views":1,"form_submissions":0}]"#,
        )
        .unwrap();
        assert_eq!(
            rows,
            vec![DailyMetricRow {
                date: "2024-01-01".into(),
                page_views: 5,
                property_views: 2,
                project_views: 1,
                form_submissions: 0,
            }]
        );
    }

    #[test]
    fn bad_and_missing_counts_become_zero() {
        let rows = parse_rows(
            r#"[{"date":"2024-01-02","page_views":"bad","property_views":null,"project_views":-4}]"#,
        )
        .unwrap();
        let row = &rows[0];
        assert_eq!(row.page_views, 0);
        assert_eq!(row.property_views, 0);
        assert_eq!(row.project_views, 0);
        assert_eq!(row.form_submissions, 0);
    }

    #[test]
    fn numeric_strings_and_floats_are_accepted() {
        assert_eq!(coerce_count(&json!("12")), 12);
        assert_eq!(coerce_count(&json!(" 7 ")), 7);
        assert_eq!(coerce_count(&json!("3.9")), 3);
        assert_eq!(coerce_count(&json!(4.5)), 4);
        assert_eq!(coerce_count(&json!(true)), 0);
        assert_eq!(coerce_count(&json!([1])), 0);
    }

    #[test]
    fn non_string_dates_keep_their_json_text() {
        let rows = parse_rows(r#"[{"date":20240101},{"date":null},{}]"#).unwrap();
        assert_eq!(rows[0].date, "20240101");
        assert_eq!(rows[1].date, "");
        assert_eq!(rows[2].date, "");
    }

    #[test]
    fn malformed_payload_degrades_to_empty() {
        assert!(matches!(parse_rows("{not json"), Err(MetadataError::Malformed(_))));
        assert!(rows_or_empty("{not json").is_empty());
        assert!(rows_or_empty(r#"{"rows": []}"#).is_empty());
    }

    #[test]
    fn days_parse_from_plain_and_rfc3339_dates() {
        assert_eq!(parse_day("2024-06-15"), Some(date!(2024 - 06 - 15)));
        assert_eq!(parse_day("2024-06-15T08:30:00Z"), Some(date!(2024 - 06 - 15)));
        assert_eq!(parse_day("15/06/2024"), None);
        assert_eq!(parse_day(""), None);
    }

    #[test]
    fn missing_metadata_file_yields_no_rows() {
        let config = DashboardConfig {
            metadata_path: Some("/nonexistent/propdash/metrics.json".into()),
            ..DashboardConfig::default()
        };
        assert!(load_embedded(&config).is_empty());
        assert!(load_embedded(&DashboardConfig::default()).is_empty());
    }
}
