use dioxus::prelude::*;

use crate::analytics::build_series;
use crate::dashboard::{DashboardState, Highlights};
use crate::t;

/// Landing page: all-time totals over every embedded row.
#[component]
pub fn Overview() -> Element {
    // Re-render when the platform's language signal changes.
    let _lang = try_use_context::<Signal<String>>().map(|code| code());
    let state = use_context::<Signal<DashboardState>>();

    let series = use_memo(move || build_series(&state.read().rows));

    rsx! {
        section { class: "page page-overview",
            h1 { {t!("overview-title")} }
            p { {t!("overview-intro")} }

            Highlights { series: series() }
        }
    }
}
