use dioxus::prelude::*;

use crate::analytics::export::{
    perform_csv_export, perform_json_export, perform_png_export, Delivery, ExportReceipt,
};
use crate::analytics::DailyMetricRow;
use crate::core::error::ExportError;
use crate::t;

use super::chart_panel::ChartHandle;

#[derive(Clone, Debug, PartialEq)]
enum ExportStatus {
    Idle,
    Working(ExportKind),
    Done(String),
    Error(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum ExportKind {
    Json,
    Csv,
    Png,
}

impl ExportKind {
    fn format_name(self) -> &'static str {
        match self {
            Self::Json => "JSON",
            Self::Csv => "CSV",
            Self::Png => "PNG",
        }
    }
}

fn receipt_message(kind: ExportKind, receipt: &ExportReceipt) -> String {
    let format = kind.format_name();
    let mut message = match &receipt.delivery {
        Delivery::Saved(path) => t!("export-saved", format = format, path = path.clone()),
        Delivery::Downloaded => t!("export-downloaded", format = format),
    };
    if receipt.copied {
        message.push(' ');
        message.push_str(&t!("export-copied"));
    }
    message
}

#[component]
pub fn ExportPanel(rows: Vec<DailyMetricRow>, chart_ready: bool) -> Element {
    let chart = try_use_context::<ChartHandle>();
    let has_rows = !rows.is_empty();
    let mut status = use_signal(|| ExportStatus::Idle);
    let mut busy = use_signal(|| false);

    let feedback = match &status() {
        ExportStatus::Idle => None,
        ExportStatus::Working(kind) => Some((
            "dashboard-card__meta".to_string(),
            t!("export-working", format = kind.format_name()),
        )),
        ExportStatus::Done(message) => Some((
            "dashboard-card__meta dashboard-card__meta--success".to_string(),
            format!("✅ {message}"),
        )),
        ExportStatus::Error(err) => Some((
            "dashboard-card__meta dashboard-card__meta--error".to_string(),
            format!("⚠️ {err}"),
        )),
    };

    let start_export = use_callback(move |kind: ExportKind| {
        if busy() {
            return;
        }
        busy.set(true);
        status.set(ExportStatus::Working(kind));

        let rows = rows.clone();
        let snapshot = match kind {
            ExportKind::Png => Some(
                chart
                    .as_ref()
                    .ok_or(ExportError::NoChart)
                    .and_then(ChartHandle::png_snapshot),
            ),
            _ => None,
        };

        spawn(async move {
            let outcome = match (kind, snapshot) {
                (ExportKind::Json, _) => perform_json_export(rows).await,
                (ExportKind::Csv, _) => perform_csv_export(rows).await,
                (ExportKind::Png, Some(Ok(png))) => perform_png_export(png).await,
                (ExportKind::Png, Some(Err(err))) => Err(err),
                (ExportKind::Png, None) => Err(ExportError::NoChart),
            };
            match outcome {
                Ok(receipt) => status.set(ExportStatus::Done(receipt_message(kind, &receipt))),
                Err(err) => {
                    tracing::warn!(%err, ?kind, "export failed");
                    status.set(ExportStatus::Error(err.to_string()));
                }
            }
            busy.set(false);
        });
    });

    rsx! {
        section { class: "dashboard-card export",
            div { class: "dashboard-card__header",
                h2 { {t!("export-heading")} }
            }

            if !has_rows {
                p { class: "dashboard-card__placeholder", {t!("export-placeholder")} }
            } else {
                p { {t!("export-intro")} }

                div { class: "export__actions",
                    button {
                        r#type: "button",
                        class: "button button--primary",
                        disabled: busy(),
                        onclick: move |_| start_export.call(ExportKind::Json),
                        {t!("export-json")}
                    }
                    button {
                        r#type: "button",
                        class: "button",
                        disabled: busy(),
                        onclick: move |_| start_export.call(ExportKind::Csv),
                        {t!("export-csv")}
                    }
                    button {
                        r#type: "button",
                        class: "button button--ghost",
                        disabled: busy() || !chart_ready,
                        onclick: move |_| start_export.call(ExportKind::Png),
                        {t!("export-png")}
                    }
                }

                if let Some((class_name, message)) = feedback {
                    p { class: "{class_name}", "{message}" }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn receipts_are_described_with_their_format_and_path() {
        crate::i18n::init();
        let saved = ExportReceipt {
            delivery: Delivery::Saved("/data/exports/a.json".to_string()),
            copied: true,
        };
        let message = receipt_message(ExportKind::Json, &saved);
        assert!(message.contains("JSON"));
        assert!(message.contains("/data/exports/a.json"));
        assert!(message.ends_with(&t!("export-copied")));

        let downloaded = ExportReceipt {
            delivery: Delivery::Downloaded,
            copied: false,
        };
        let message = receipt_message(ExportKind::Csv, &downloaded);
        assert!(message.contains("CSV"));
        assert!(!message.contains(&t!("export-copied")));
    }
}
