#![cfg_attr(all(windows, not(debug_assertions)), windows_subsystem = "windows")]

#[cfg(feature = "desktop")]
use dioxus::desktop::tao::{dpi::LogicalSize, window::WindowBuilder};
#[cfg(feature = "desktop")]
use dioxus::desktop::Config;
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
    #[layout(DesktopNavbar)]
    #[route("/")]
    Overview {},
    #[route("/analytics")]
    Analytics {},
}

const MAIN_CSS_INLINE: &str = include_str!(concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../ui/assets/theme/main.css"
)); // Embedded shared theme; desktop ships no separate asset directory.

#[cfg(feature = "desktop")]
fn main() {
    let config = DashboardConfig::load();
    dioxus::logger::init(config.level()).ok();
    tracing::info!(
        platform = Platform::current().as_str(),
        version = env!("CARGO_PKG_VERSION"),
        chart = %config.chart_target_id,
        "starting propdash"
    );

    LaunchBuilder::desktop()
        .with_cfg(
            Config::new().with_window(
                WindowBuilder::new()
                    .with_title(format!("Propdash – v{}", env!("CARGO_PKG_VERSION")))
                    .with_inner_size(LogicalSize::new(1200.0, 820.0)),
            ),
        )
        .with_context(config)
        .launch(App);
}

#[cfg(all(feature = "server", not(feature = "desktop")))]
fn main() {
    let config = DashboardConfig::load();
    LaunchBuilder::server().with_context(config).launch(App);
}

fn nav_overview(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Overview {}, "{label}" })
}
fn nav_analytics(label: &str) -> Element {
    rsx!(Link { class: "navbar__link", to: Route::Analytics {}, "{label}" })
}

#[component]
fn App() -> Element {
    ui::i18n::init();

    // AppNavbar updates this on language selection.
    let lang_code = use_signal(|| "en-US".to_string());
    use_context_provider(|| lang_code);

    let config = use_context::<DashboardConfig>();
    let state = use_signal(|| DashboardState::load(&config));
    use_context_provider(|| state);

    register_nav(NavBuilder {
        overview: nav_overview,
        analytics: nav_analytics,
    });

    rsx! {
        document::Style { "{MAIN_CSS_INLINE}" }

        // Keyed by language so the routed subtree remounts on change.
        div {
            key: "{lang_code()}",
            Router::<Route> { }
        }
    }
}

/// Desktop layout wrapping the shared navbar around the routed page.
#[component]
fn DesktopNavbar() -> Element {
    rsx! {
        AppNavbar { }

        Outlet::<Route> {}
    }
}
