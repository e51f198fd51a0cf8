//! Export of the rows behind the current chart, and delivery of the bytes.
//!
//! Web builds trigger a browser download; desktop builds write into the
//! platform data dir and report the path.

use time::{macros::format_description, OffsetDateTime};

use crate::core::error::ExportError;

use super::metadata::DailyMetricRow;
use super::series::build_series;

const CSV_HEADER: [&str; 6] = [
    "date",
    "label",
    "page_views",
    "property_views",
    "project_views",
    "form_submissions",
];

/// One CSV line per row, labels matching the chart.
pub fn build_csv(rows: &[DailyMetricRow]) -> String {
    let series = build_series(rows);
    let mut csv = CSV_HEADER.join(",");
    csv.push('\n');

    for (idx, row) in rows.iter().enumerate() {
        let fields = [
            row.date.clone(),
            series.labels[idx].clone(),
            row.page_views.to_string(),
            row.property_views.to_string(),
            row.project_views.to_string(),
            row.form_submissions.to_string(),
        ];
        let line = fields
            .iter()
            .map(|field| escape_csv(field))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

pub fn build_json(rows: &[DailyMetricRow]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(rows)?)
}

fn escape_csv(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let needs_quotes = value.contains(',') || value.contains('"') || value.contains('\n');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

pub fn export_filename(extension: &str) -> String {
    format!("propdash-analytics-{}.{extension}", timestamp_slug())
}

fn timestamp_slug() -> String {
    OffsetDateTime::now_utc()
        .format(&format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| "export".into())
}

/// Where an export ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    /// Written to disk (desktop).
    Saved(String),
    /// Handed to the browser as a download (web).
    Downloaded,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportReceipt {
    pub delivery: Delivery,
    pub copied: bool,
}

impl ExportReceipt {
    fn delivered(path: Option<String>, copied: bool) -> Self {
        Self {
            delivery: path.map_or(Delivery::Downloaded, Delivery::Saved),
            copied,
        }
    }
}

/// Deliver the rows as pretty JSON and copy them to the clipboard. A
/// clipboard failure does not fail the export.
pub async fn perform_json_export(rows: Vec<DailyMetricRow>) -> Result<ExportReceipt, ExportError> {
    let json = build_json(&rows)?;
    let copied = match copy_to_clipboard(json.clone()).await {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(%err, "clipboard copy skipped");
            false
        }
    };
    let filename = export_filename("json");
    let path = download_bytes(&filename, "application/json", json.into_bytes()).await?;
    Ok(ExportReceipt::delivered(path, copied))
}

pub async fn perform_csv_export(rows: Vec<DailyMetricRow>) -> Result<ExportReceipt, ExportError> {
    let csv = build_csv(&rows);
    let filename = export_filename("csv");
    let path = download_bytes(&filename, "text/csv", csv.into_bytes()).await?;
    Ok(ExportReceipt::delivered(path, false))
}

pub async fn perform_png_export(png: Vec<u8>) -> Result<ExportReceipt, ExportError> {
    let filename = export_filename("png");
    let path = download_bytes(&filename, "image/png", png).await?;
    Ok(ExportReceipt::delivered(path, false))
}

async fn copy_to_clipboard(payload: String) -> Result<(), ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;

        let clipboard_err = |msg: &str| ExportError::Clipboard(msg.to_string());
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| clipboard_err("document unavailable"))?;
        let body = document.body().ok_or_else(|| clipboard_err("missing body"))?;

        let textarea = document
            .create_element("textarea")
            .map_err(|_| clipboard_err("unable to create textarea"))?
            .dyn_into::<web_sys::HtmlTextAreaElement>()
            .map_err(|_| clipboard_err("textarea cast failed"))?;
        textarea.set_value(&payload);
        let style = textarea.style();
        style.set_property("position", "fixed").ok();
        style.set_property("opacity", "0").ok();

        body.append_child(&textarea).ok();
        textarea.select();
        let copied = document
            .dyn_ref::<web_sys::HtmlDocument>()
            .map(|html| html.exec_command("copy").unwrap_or(false))
            .unwrap_or(false);
        textarea.remove();
        if copied {
            Ok(())
        } else {
            Err(clipboard_err("copy blocked"))
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        use arboard::Clipboard;

        let mut clipboard =
            Clipboard::new().map_err(|err| ExportError::Clipboard(err.to_string()))?;
        clipboard
            .set_text(payload)
            .map_err(|err| ExportError::Clipboard(err.to_string()))
    }
}

async fn download_bytes(
    filename: &str,
    mime: &str,
    bytes: Vec<u8>,
) -> Result<Option<String>, ExportError> {
    #[cfg(target_arch = "wasm32")]
    {
        use wasm_bindgen::JsCast;
        use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

        let delivery_err = |msg: &str| ExportError::Delivery(msg.to_string());
        let array = js_sys::Uint8Array::from(bytes.as_slice());
        let parts = js_sys::Array::new();
        parts.push(&array.buffer());

        let opts = BlobPropertyBag::new();
        opts.set_type(mime);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &opts)
            .map_err(|_| delivery_err("failed to create blob"))?;
        let url = Url::create_object_url_with_blob(&blob)
            .map_err(|_| delivery_err("unable to create download"))?;

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| delivery_err("document unavailable"))?;
        let anchor: HtmlAnchorElement = document
            .create_element("a")
            .map_err(|_| delivery_err("unable to create anchor"))?
            .dyn_into()
            .map_err(|_| delivery_err("anchor cast failed"))?;
        anchor.set_href(&url);
        anchor.set_download(filename);
        anchor.style().set_property("display", "none").ok();

        document
            .body()
            .ok_or_else(|| delivery_err("missing body"))?
            .append_child(&anchor)
            .ok();
        anchor.click();
        anchor.remove();
        Url::revoke_object_url(&url).ok();

        Ok(None)
    }

    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = mime;
        let dir = desktop_export_dir()?;
        std::fs::create_dir_all(&dir)?;
        let path = dir.join(filename);
        std::fs::write(&path, bytes)?;
        tracing::info!(path = %path.display(), "export written");
        Ok(Some(path.to_string_lossy().to_string()))
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn desktop_export_dir() -> Result<std::path::PathBuf, ExportError> {
    let dirs = directories::ProjectDirs::from("com", "Propdash", "Propdash").ok_or_else(|| {
        ExportError::Delivery("unable to determine export directory".to_string())
    })?;
    Ok(dirs.data_dir().join("exports"))
}
