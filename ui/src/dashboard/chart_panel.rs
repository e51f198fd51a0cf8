use std::cell::RefCell;
use std::rc::Rc;

use dioxus::prelude::*;

use crate::analytics::backend::PlatformBackend;
use crate::analytics::{
    build_series, ChartBackend, ChartPresenter, DailyMetricRow, PanelState, RenderPlan,
};
use crate::core::config::DashboardConfig;
use crate::core::error::ExportError;
use crate::core::timing::poll_until;
use crate::dashboard::ExportPanel;
use crate::t;

type SharedPresenter = Rc<RefCell<ChartPresenter<PlatformBackend>>>;

/// Gives descendants (the export panel) access to the live chart.
#[derive(Clone)]
pub(crate) struct ChartHandle(SharedPresenter);

impl ChartHandle {
    pub(crate) fn png_snapshot(&self) -> Result<Vec<u8>, ExportError> {
        self.0.borrow().png_snapshot()
    }
}

#[component]
pub fn ChartPanel(rows: ReadOnlySignal<Vec<DailyMetricRow>>) -> Element {
    let config = use_context::<DashboardConfig>();
    let target_id = config.chart_target_id.clone();

    let presenter: SharedPresenter = use_hook(|| {
        Rc::new(RefCell::new(ChartPresenter::new(
            PlatformBackend::default(),
            config.chart_target_id.clone(),
            config.poll_policy(),
        )))
    });
    use_context_provider(|| ChartHandle(presenter.clone()));

    let series = use_memo(move || build_series(&rows.read()));
    let mut panel = use_signal(|| PanelState::Waiting { attempt: 0 });
    let mut markup = use_signal(|| Option::<String>::None);

    let effect_presenter = presenter.clone();
    use_effect(move || {
        let plan = effect_presenter.borrow_mut().begin(series());
        markup.set(None);

        let ticket = match plan {
            RenderPlan::Settled(state) => {
                panel.set(state);
                return;
            }
            RenderPlan::AwaitLibrary(ticket) => ticket,
        };
        panel.set(PanelState::Waiting { attempt: 0 });

        let presenter = effect_presenter.clone();
        spawn(async move {
            let (backend, policy) = {
                let current = presenter.borrow();
                (*current.backend(), current.policy())
            };
            let wait = poll_until(policy, |attempt| {
                presenter.borrow_mut().note_attempt(&ticket, attempt);
                backend.is_ready()
            })
            .await;

            let state = presenter.borrow_mut().complete(ticket, wait);
            markup.set(presenter.borrow().inline_markup().map(str::to_string));
            panel.set(state);
        });
    });

    let state = panel();
    let surface = chart_surface(&target_id, markup());
    let rows_snapshot = rows();

    rsx! {
        section { class: "dashboard-card chart-panel {state.css_modifier()}",
            div { class: "dashboard-card__header",
                h2 { {t!("chart-heading")} }
            }

            div { class: "chart-panel__loading", hidden: !state.is_loading(),
                {t!("chart-loading")}
            }

            if let Some(message) = state.message() {
                p { class: "chart-panel__message", role: "status", "{message}" }
            }

            div { class: "chart-panel__surface", hidden: !state.shows_chart(),
                {surface}
            }
        }

        ExportPanel { rows: rows_snapshot, chart_ready: state.shows_chart() }
    }
}

#[cfg(target_arch = "wasm32")]
fn chart_surface(target_id: &str, _markup: Option<String>) -> Element {
    rsx! {
        canvas { id: "{target_id}", class: "chart-panel__canvas" }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn chart_surface(target_id: &str, markup: Option<String>) -> Element {
    let markup = markup.unwrap_or_default();
    rsx! {
        div { id: "{target_id}", class: "chart-panel__svg", dangerous_inner_html: "{markup}" }
    }
}
