//! Shared UI crate for Propdash. Analytics logic, components and views live
//! here; the platform crates only supply routing and launch configuration.

pub mod analytics;
pub mod core;
pub mod dashboard;
pub mod i18n;
pub mod views;

pub mod components {
    pub mod app_navbar;
    pub use app_navbar::register_nav;
    pub use app_navbar::AppNavbar;
    pub use app_navbar::NavBuilder;
}

use dioxus::prelude::*;

/// Shared theme. Web links it as an asset; desktop embeds the file directly.
pub const THEME_CSS: Asset = asset!("/assets/theme/main.css");
