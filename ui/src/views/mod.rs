mod analytics;
pub use analytics::Analytics;

mod overview;
pub use overview::Overview;
