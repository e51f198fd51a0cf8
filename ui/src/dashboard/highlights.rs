use dioxus::prelude::*;

use crate::analytics::{ChartSeries, SeriesKind};
use crate::core::format::format_count;
use crate::t;

#[component]
pub fn Highlights(series: ChartSeries) -> Element {
    let totals = series.totals();
    let latest = series.labels.last().cloned().unwrap_or_default();

    let cards: Vec<(String, String)> = SeriesKind::ALL
        .into_iter()
        .map(|kind| (metric_label(kind), format_count(totals.get(kind))))
        .collect();

    rsx! {
        section { class: "dashboard-card highlights",
            div { class: "dashboard-card__header",
                h2 { {t!("highlights-heading")} }
                if !series.is_empty() {
                    span { class: "dashboard-card__meta", {t!("highlights-latest", label = latest.clone())} }
                }
            }

            if series.is_empty() {
                p { class: "dashboard-card__placeholder", {t!("highlights-placeholder")} }
            } else {
                div { class: "highlights__grid",
                    div { class: "highlight",
                        span { class: "highlight__label", {t!("highlights-days")} }
                        strong { class: "highlight__value", "{totals.days}" }
                    }
                    for (label, value) in cards.into_iter() {
                        div { class: "highlight",
                            span { class: "highlight__label", "{label}" }
                            strong { class: "highlight__value", "{value}" }
                        }
                    }
                }
            }
        }
    }
}

fn metric_label(kind: SeriesKind) -> String {
    match kind {
        SeriesKind::PageViews => t!("metric-page-views"),
        SeriesKind::PropertyViews => t!("metric-property-views"),
        SeriesKind::ProjectViews => t!("metric-project-views"),
        SeriesKind::FormSubmissions => t!("metric-form-submissions"),
    }
}
