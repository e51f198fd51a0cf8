mod highlights;
pub use highlights::Highlights;

mod range_filter;
pub use range_filter::RangeFilter;

mod chart_panel;
pub use chart_panel::ChartPanel;

mod export;
pub use export::ExportPanel;

use time::Date;

use crate::analytics::{load_embedded, today_local, DailyMetricRow};
use crate::core::config::DashboardConfig;

/// Rows shared by every dashboard view, provided through context by the
/// platform crates.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub rows: Vec<DailyMetricRow>,
    pub today: Date,
}

impl DashboardState {
    pub fn load(config: &DashboardConfig) -> Self {
        Self {
            rows: load_embedded(config),
            today: today_local(),
        }
    }
}
