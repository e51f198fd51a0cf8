use dioxus::prelude::*;

use ui::components::app_navbar::{register_nav, NavBuilder};
use ui::components::AppNavbar;
use ui::core::config::DashboardConfig;
use ui::core::platform::Platform;
use ui::dashboard::DashboardState;
use ui::views::{Analytics, Overview};

#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum Route {
    #[layout(WebNavbar)]
    #[route("/")]
    Overview {},
    #[route("/analytics")]
    Analytics {},
}

fn nav_overview(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Overview {},
        "{label}"
    })
}
fn nav_analytics(label: &str) -> Element {
    rsx!(Link {
        class: "navbar__link",
        to: Route::Analytics {},
        "{label}"
    })
}

fn main() {
    let config = DashboardConfig::load();
    dioxus::logger::init(config.level()).ok();
    tracing::info!(
        platform = Platform::current().as_str(),
        version = env!("CARGO_PKG_VERSION"),
        chart = %config.chart_target_id,
        "starting propdash"
    );

    LaunchBuilder::new().with_context(config).launch(App);
}

#[component]
fn App() -> Element {
    {
        ui::i18n::init();
        register_nav(NavBuilder {
            overview: nav_overview,
            analytics: nav_analytics,
        });
    }

    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    let config = use_context::<DashboardConfig>();
    let state = use_signal(|| DashboardState::load(&config));
    use_context_provider(|| state);

    rsx! {
        document::Link { rel: "stylesheet", href: ui::THEME_CSS }

        Router::<Route> {}
    }
}

/// Web layout wrapping the shared navbar around the routed page.
#[component]
fn WebNavbar() -> Element {
    rsx! {
        AppNavbar { }
        Outlet::<Route> {}
    }
}
