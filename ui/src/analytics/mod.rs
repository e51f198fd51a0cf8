//! Analytics pipeline: embedded daily rows → range selection → aligned
//! series → chart backend.

pub mod backend;
pub mod export;
pub mod metadata;
pub mod presenter;
pub mod range;
pub mod series;

pub use metadata::{load_embedded, parse_rows, rows_or_empty, DailyMetricRow};
pub use presenter::{
    ChartBackend, ChartInstance, ChartPresenter, PanelState, RenderPlan, RenderTicket,
    EMPTY_MESSAGE, LOAD_FAILED_MESSAGE,
};
pub use range::{detect_preset, parse_date_input, today_local, QuickRangePreset, RangeSelection};
pub use series::{build_series, filter_rows, ChartSeries, SeriesKind, SeriesTotals};
