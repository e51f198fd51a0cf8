//! Shapes daily rows into index-aligned chart series.

use serde::Serialize;

use crate::core::format::format_day_label;

use super::metadata::DailyMetricRow;
use super::range::RangeSelection;

/// One of the four tracked metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesKind {
    PageViews,
    PropertyViews,
    ProjectViews,
    FormSubmissions,
}

impl SeriesKind {
    pub const ALL: [SeriesKind; 4] = [
        Self::PageViews,
        Self::PropertyViews,
        Self::ProjectViews,
        Self::FormSubmissions,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::PageViews => "Page Views",
            Self::PropertyViews => "Property Views",
            Self::ProjectViews => "Project Views",
            Self::FormSubmissions => "Form Submissions",
        }
    }

    /// Stroke colour shared by every chart backend.
    pub fn color(self) -> &'static str {
        match self {
            Self::PageViews => "#2563eb",
            Self::PropertyViews => "#16a34a",
            Self::ProjectViews => "#d97706",
            Self::FormSubmissions => "#dc2626",
        }
    }

    /// Translucent fill matching [`SeriesKind::color`].
    pub fn fill(self) -> &'static str {
        match self {
            Self::PageViews => "rgba(37, 99, 235, 0.12)",
            Self::PropertyViews => "rgba(22, 163, 74, 0.12)",
            Self::ProjectViews => "rgba(217, 119, 6, 0.12)",
            Self::FormSubmissions => "rgba(220, 38, 38, 0.12)",
        }
    }

    pub fn field(self) -> &'static str {
        match self {
            Self::PageViews => "page_views",
            Self::PropertyViews => "property_views",
            Self::ProjectViews => "project_views",
            Self::FormSubmissions => "form_submissions",
        }
    }

    fn read(self, row: &DailyMetricRow) -> u64 {
        match self {
            Self::PageViews => row.page_views,
            Self::PropertyViews => row.property_views,
            Self::ProjectViews => row.project_views,
            Self::FormSubmissions => row.form_submissions,
        }
    }
}

/// Labels plus four metric sequences, all the same length.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub page_views: Vec<u64>,
    pub property_views: Vec<u64>,
    pub project_views: Vec<u64>,
    pub form_submissions: Vec<u64>,
}

impl ChartSeries {
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn values(&self, kind: SeriesKind) -> &[u64] {
        match kind {
            SeriesKind::PageViews => &self.page_views,
            SeriesKind::PropertyViews => &self.property_views,
            SeriesKind::ProjectViews => &self.project_views,
            SeriesKind::FormSubmissions => &self.form_submissions,
        }
    }

    /// Largest value across all four series (0 when empty).
    pub fn peak(&self) -> u64 {
        SeriesKind::ALL
            .into_iter()
            .flat_map(|kind| self.values(kind).iter().copied())
            .max()
            .unwrap_or(0)
    }

    pub fn totals(&self) -> SeriesTotals {
        let sum = |kind| self.values(kind).iter().copied().fold(0u64, u64::saturating_add);
        SeriesTotals {
            days: self.len(),
            page_views: sum(SeriesKind::PageViews),
            property_views: sum(SeriesKind::PropertyViews),
            project_views: sum(SeriesKind::ProjectViews),
            form_submissions: sum(SeriesKind::FormSubmissions),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeriesTotals {
    pub days: usize,
    pub page_views: u64,
    pub property_views: u64,
    pub project_views: u64,
    pub form_submissions: u64,
}

impl SeriesTotals {
    pub fn get(&self, kind: SeriesKind) -> u64 {
        match kind {
            SeriesKind::PageViews => self.page_views,
            SeriesKind::PropertyViews => self.property_views,
            SeriesKind::ProjectViews => self.project_views,
            SeriesKind::FormSubmissions => self.form_submissions,
        }
    }
}

/// Build aligned series, one entry per row, in input order.
pub fn build_series(rows: &[DailyMetricRow]) -> ChartSeries {
    let mut series = ChartSeries {
        labels: Vec::with_capacity(rows.len()),
        page_views: Vec::with_capacity(rows.len()),
        property_views: Vec::with_capacity(rows.len()),
        project_views: Vec::with_capacity(rows.len()),
        form_submissions: Vec::with_capacity(rows.len()),
    };

    for row in rows {
        let label = row
            .day()
            .and_then(format_day_label)
            .unwrap_or_else(|| row.date.clone());
        series.labels.push(label);
        series.page_views.push(SeriesKind::PageViews.read(row));
        series.property_views.push(SeriesKind::PropertyViews.read(row));
        series.project_views.push(SeriesKind::ProjectViews.read(row));
        series.form_submissions.push(SeriesKind::FormSubmissions.read(row));
    }

    series
}

/// Rows inside `selection`, order preserved. An explicit range drops rows
/// whose date cannot be read.
pub fn filter_rows(rows: &[DailyMetricRow], selection: &RangeSelection) -> Vec<DailyMetricRow> {
    if !selection.is_selected() {
        return rows.to_vec();
    }
    rows.iter()
        .filter(|row| row.day().is_some_and(|day| selection.contains(day)))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::metadata::parse_rows;
    use time::macros::date;

    fn row(date: &str, counts: [u64; 4]) -> DailyMetricRow {
        DailyMetricRow {
            date: date.to_string(),
            page_views: counts[0],
            property_views: counts[1],
            project_views: counts[2],
            form_submissions: counts[3],
        }
    }

    #[test]
    fn builds_the_documented_scenario() {
        let rows = parse_rows(
            r#"[
                {"date":"2024-01-01","page_views":5,"property_views":2,"project_views":1,"form_submissions":0},
                {"date":"2024-01-02","page_views":"bad","property_views":3,"project_views":0,"form_submissions":1}
            ]"#,
        )
        .unwrap();
        let series = build_series(&rows);
        assert_eq!(series.labels, vec!["Jan 1", "Jan 2"]);
        assert_eq!(series.page_views, vec![5, 0]);
        assert_eq!(series.property_views, vec![2, 3]);
        assert_eq!(series.project_views, vec![1, 0]);
        assert_eq!(series.form_submissions, vec![0, 1]);
    }

    #[test]
    fn empty_input_gives_empty_series() {
        let series = build_series(&[]);
        assert!(series.is_empty());
        assert_eq!(series, ChartSeries::default());
        assert_eq!(series.peak(), 0);
    }

    #[test]
    fn unparsable_dates_pass_through_as_labels() {
        let series = build_series(&[row("last tuesday", [1, 1, 1, 1]), row("", [0; 4])]);
        assert_eq!(series.labels, vec!["last tuesday", ""]);
    }

    #[test]
    fn keeps_input_order_without_gap_filling() {
        let rows = [
            row("2024-03-10", [1, 0, 0, 0]),
            row("2024-03-01", [2, 0, 0, 0]),
            row("2024-03-20", [3, 0, 0, 0]),
        ];
        let series = build_series(&rows);
        assert_eq!(series.labels, vec!["Mar 10", "Mar 1", "Mar 20"]);
        assert_eq!(series.page_views, vec![1, 2, 3]);
    }

    #[test]
    fn building_twice_is_identical() {
        let rows = [row("2024-05-01", [9, 8, 7, 6]), row("oops", [1, 2, 3, 4])];
        assert_eq!(build_series(&rows), build_series(&rows));
    }

    #[test]
    fn all_sequences_share_the_row_count() {
        for count in [0usize, 1, 2, 31] {
            let rows: Vec<_> = (0..count).map(|i| row("2024-01-01", [i as u64; 4])).collect();
            let series = build_series(&rows);
            for kind in SeriesKind::ALL {
                assert_eq!(series.values(kind).len(), count);
            }
            assert_eq!(series.len(), count);
        }
    }

    #[test]
    fn totals_and_peak() {
        let series = build_series(&[row("2024-01-01", [5, 2, 1, 0]), row("2024-01-02", [3, 9, 0, 1])]);
        let totals = series.totals();
        assert_eq!(totals.days, 2);
        assert_eq!(totals.get(SeriesKind::PageViews), 8);
        assert_eq!(totals.get(SeriesKind::PropertyViews), 11);
        assert_eq!(totals.get(SeriesKind::FormSubmissions), 1);
        assert_eq!(series.peak(), 9);
    }

    #[test]
    fn filtering_keeps_order_and_drops_unreadable_dates() {
        let rows = vec![
            row("2024-06-14", [1, 0, 0, 0]),
            row("junk", [2, 0, 0, 0]),
            row("2024-06-01", [3, 0, 0, 0]),
            row("2024-06-10", [4, 0, 0, 0]),
        ];
        let selection = RangeSelection::Explicit {
            from: date!(2024 - 06 - 09),
            to: date!(2024 - 06 - 15),
        };
        let kept = filter_rows(&rows, &selection);
        let views: Vec<_> = kept.iter().map(|r| r.page_views).collect();
        assert_eq!(views, vec![1, 4]);

        assert_eq!(filter_rows(&rows, &RangeSelection::Unselected), rows);
    }
}
