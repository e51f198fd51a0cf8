use dioxus::prelude::*;

use crate::analytics::{build_series, filter_rows, RangeSelection};
use crate::dashboard::{ChartPanel, DashboardState, Highlights, RangeFilter};
use crate::t;

#[component]
pub fn Analytics() -> Element {
    let _lang = try_use_context::<Signal<String>>().map(|code| code());
    let state = use_context::<Signal<DashboardState>>();
    let today = state.read().today;

    let from_input = use_signal(String::new);
    let to_input = use_signal(String::new);

    let visible_rows = use_memo(move || {
        let selection = RangeSelection::from_inputs(&from_input(), &to_input());
        let rows = filter_rows(&state.read().rows, &selection);
        tracing::debug!(?selection, kept = rows.len(), "filtered analytics rows");
        rows
    });
    let series = use_memo(move || build_series(&visible_rows.read()));

    rsx! {
        section { class: "page page-analytics",
            h1 { {t!("analytics-title")} }
            p { {t!("analytics-intro")} }

            div { class: "dashboard",
                RangeFilter { from_input, to_input, today }
                Highlights { series: series() }
                ChartPanel { rows: visible_rows() }
            }
        }
    }
}
