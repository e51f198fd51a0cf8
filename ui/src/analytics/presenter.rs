//! Binds chart series to a charting backend that may still be loading.
//!
//! A [`ChartPresenter`] is an explicit context object: it owns the backend,
//! the single live chart instance and the panel state. A render pass is
//! `begin` → wait for the backend → `complete`. Splitting the pass lets a
//! UI keep the presenter behind a `RefCell` without holding a borrow across
//! the wait; [`ChartPresenter::present`] runs all three for owners.

use crate::core::error::{ChartError, ExportError};
use crate::core::timing::{poll_until, PollPolicy, PollTimeout};

use super::series::ChartSeries;

pub const EMPTY_MESSAGE: &str = "No data available for the selected date range.";
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load chart library. Please refresh the page.";

/// What the chart panel shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelState {
    Waiting { attempt: u32 },
    Empty,
    Rendered,
    Failed,
}

impl PanelState {
    pub fn message(self) -> Option<&'static str> {
        match self {
            Self::Empty => Some(EMPTY_MESSAGE),
            Self::Failed => Some(LOAD_FAILED_MESSAGE),
            Self::Waiting { .. } | Self::Rendered => None,
        }
    }

    pub fn is_loading(self) -> bool {
        matches!(self, Self::Waiting { .. })
    }

    pub fn shows_chart(self) -> bool {
        matches!(self, Self::Rendered)
    }

    pub fn css_modifier(self) -> &'static str {
        match self {
            Self::Waiting { .. } => "chart-panel--loading",
            Self::Empty => "chart-panel--empty",
            Self::Rendered => "chart-panel--ready",
            Self::Failed => "chart-panel--error",
        }
    }
}

/// A charting library the presenter can drive.
pub trait ChartBackend {
    type Chart: ChartInstance;

    /// Whether the library has finished loading.
    fn is_ready(&self) -> bool;

    fn create(&self, target_id: &str, series: &ChartSeries) -> Result<Self::Chart, ChartError>;
}

/// A live chart owned by the presenter.
pub trait ChartInstance {
    /// Release the library's resources. Called exactly once per instance.
    fn destroy(&mut self);

    /// Markup the host should inline into the chart target, for backends
    /// that render to a string rather than into an existing element.
    fn inline_markup(&self) -> Option<&str> {
        None
    }

    fn png_snapshot(&self) -> Result<Vec<u8>, ExportError>;
}

/// Outcome of [`ChartPresenter::begin`].
#[derive(Debug)]
pub enum RenderPlan {
    /// Nothing to wait for; the panel is already in its final state.
    Settled(PanelState),
    /// Wait for the backend, then hand the ticket to `complete`.
    AwaitLibrary(RenderTicket),
}

/// A pending render pass.
#[derive(Debug)]
pub struct RenderTicket {
    generation: u64,
    series: ChartSeries,
}

impl RenderTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

pub struct ChartPresenter<B: ChartBackend> {
    backend: B,
    target_id: String,
    policy: PollPolicy,
    chart: Option<B::Chart>,
    state: PanelState,
    generation: u64,
    library_missing: bool,
}

impl<B: ChartBackend> ChartPresenter<B> {
    pub fn new(backend: B, target_id: impl Into<String>, policy: PollPolicy) -> Self {
        Self {
            backend,
            target_id: target_id.into(),
            policy,
            chart: None,
            state: PanelState::Waiting { attempt: 0 },
            generation: 0,
            library_missing: false,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn policy(&self) -> PollPolicy {
        self.policy
    }

    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn chart(&self) -> Option<&B::Chart> {
        self.chart.as_ref()
    }

    pub fn inline_markup(&self) -> Option<&str> {
        self.chart.as_ref().and_then(|chart| chart.inline_markup())
    }

    /// Start a render pass. Any live chart is disposed first.
    pub fn begin(&mut self, series: ChartSeries) -> RenderPlan {
        self.generation = self.generation.wrapping_add(1);
        self.dispose();

        if self.library_missing {
            self.state = PanelState::Failed;
        } else if series.is_empty() {
            self.state = PanelState::Empty;
        } else {
            self.state = PanelState::Waiting { attempt: 0 };
            return RenderPlan::AwaitLibrary(RenderTicket {
                generation: self.generation,
                series,
            });
        }

        tracing::debug!(state = ?self.state, "chart pass settled without waiting");
        RenderPlan::Settled(self.state)
    }

    /// Record a probe attempt while waiting.
    pub fn note_attempt(&mut self, ticket: &RenderTicket, attempt: u32) {
        if ticket.generation == self.generation && self.state.is_loading() {
            self.state = PanelState::Waiting { attempt };
        }
    }

    /// Finish a pass once the wait resolved. Superseded tickets are ignored.
    pub fn complete(&mut self, ticket: RenderTicket, wait: Result<u32, PollTimeout>) -> PanelState {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                "dropping superseded chart pass"
            );
            return self.state;
        }

        match wait {
            Err(timeout) => {
                tracing::warn!(%timeout, "chart library never became available");
                self.library_missing = true;
                self.state = PanelState::Failed;
            }
            Ok(attempts) => {
                self.dispose();
                match self.backend.create(&self.target_id, &ticket.series) {
                    Ok(chart) => {
                        tracing::debug!(attempts, points = ticket.series.len(), "chart rendered");
                        self.chart = Some(chart);
                        self.state = PanelState::Rendered;
                    }
                    Err(err) => {
                        tracing::error!(%err, target = %self.target_id, "chart construction failed");
                        self.state = PanelState::Failed;
                    }
                }
            }
        }
        self.state
    }

    /// Run a complete render pass.
    pub async fn present(&mut self, series: ChartSeries) -> PanelState {
        let ticket = match self.begin(series) {
            RenderPlan::Settled(state) => return state,
            RenderPlan::AwaitLibrary(ticket) => ticket,
        };
        let wait = {
            let backend = &self.backend;
            poll_until(self.policy, |_| backend.is_ready()).await
        };
        self.complete(ticket, wait)
    }

    /// Destroy the live chart, if any.
    pub fn dispose(&mut self) {
        if let Some(mut chart) = self.chart.take() {
            chart.destroy();
        }
    }

    pub fn png_snapshot(&self) -> Result<Vec<u8>, ExportError> {
        self.chart
            .as_ref()
            .ok_or(ExportError::NoChart)?
            .png_snapshot()
    }
}

impl<B: ChartBackend> Drop for ChartPresenter<B> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::metadata::DailyMetricRow;
    use crate::analytics::series::build_series;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Counters {
        probes: Rc<Cell<u32>>,
        created: Rc<Cell<u32>>,
        destroyed: Rc<Cell<u32>>,
        live: Rc<Cell<i32>>,
    }

    #[derive(Clone)]
    struct FakeBackend {
        ready_on_probe: Option<u32>,
        fail_create: bool,
        counters: Counters,
    }

    impl FakeBackend {
        fn ready_after(probes: u32) -> Self {
            Self {
                ready_on_probe: Some(probes),
                fail_create: false,
                counters: Counters::default(),
            }
        }

        fn never_ready() -> Self {
            Self {
                ready_on_probe: None,
                ..Self::ready_after(1)
            }
        }
    }

    struct FakeChart {
        counters: Counters,
        destroyed: bool,
    }

    impl ChartBackend for FakeBackend {
        type Chart = FakeChart;

        fn is_ready(&self) -> bool {
            let probes = self.counters.probes.get() + 1;
            self.counters.probes.set(probes);
            self.ready_on_probe.is_some_and(|ready| probes >= ready)
        }

        fn create(&self, target_id: &str, _series: &ChartSeries) -> Result<FakeChart, ChartError> {
            if self.fail_create {
                return Err(ChartError::MissingTarget(target_id.to_string()));
            }
            assert_eq!(self.counters.live.get(), 0, "previous chart still live");
            self.counters.created.set(self.counters.created.get() + 1);
            self.counters.live.set(self.counters.live.get() + 1);
            Ok(FakeChart {
                counters: self.counters.clone(),
                destroyed: false,
            })
        }
    }

    impl ChartInstance for FakeChart {
        fn destroy(&mut self) {
            assert!(!self.destroyed, "chart destroyed twice");
            self.destroyed = true;
            self.counters.destroyed.set(self.counters.destroyed.get() + 1);
            self.counters.live.set(self.counters.live.get() - 1);
        }

        fn png_snapshot(&self) -> Result<Vec<u8>, ExportError> {
            Ok(vec![0x89, b'P', b'N', b'G'])
        }
    }

    fn series(days: usize) -> ChartSeries {
        let rows: Vec<_> = (1..=days)
            .map(|day| DailyMetricRow {
                date: format!("2024-01-{day:02}"),
                page_views: day as u64,
                ..DailyMetricRow::default()
            })
            .collect();
        build_series(&rows)
    }

    fn presenter(backend: FakeBackend) -> ChartPresenter<FakeBackend> {
        ChartPresenter::new(backend, "analytics-chart", PollPolicy::default())
    }

    #[tokio::test(start_paused = true)]
    async fn empty_dataset_skips_polling() {
        let backend = FakeBackend::ready_after(1);
        let counters = backend.counters.clone();
        let mut presenter = presenter(backend);

        let state = presenter.present(series(0)).await;
        assert_eq!(state, PanelState::Empty);
        assert_eq!(state.message(), Some("No data available for the selected date range."));
        assert_eq!(counters.probes.get(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn renders_once_the_library_appears() {
        let backend = FakeBackend::ready_after(3);
        let counters = backend.counters.clone();
        let mut presenter = presenter(backend);

        assert_eq!(presenter.present(series(2)).await, PanelState::Rendered);
        assert_eq!(counters.probes.get(), 3);
        assert_eq!(counters.created.get(), 1);
        assert!(presenter.chart().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_the_attempt_ceiling() {
        let backend = FakeBackend::never_ready();
        let counters = backend.counters.clone();
        let mut presenter = presenter(backend);

        let state = presenter.present(series(2)).await;
        assert_eq!(state, PanelState::Failed);
        assert_eq!(
            state.message(),
            Some("Failed to load chart library. Please refresh the page.")
        );
        assert_eq!(counters.probes.get(), PollPolicy::DEFAULT_MAX_ATTEMPTS);
        assert_eq!(counters.created.get(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn failure_is_terminal() {
        let backend = FakeBackend::never_ready();
        let counters = backend.counters.clone();
        let mut presenter = presenter(backend);

        presenter.present(series(1)).await;
        let probes = counters.probes.get();
        assert_eq!(presenter.present(series(3)).await, PanelState::Failed);
        assert_eq!(counters.probes.get(), probes);
    }

    #[tokio::test(start_paused = true)]
    async fn rerender_disposes_before_constructing() {
        let backend = FakeBackend::ready_after(1);
        let counters = backend.counters.clone();
        let mut presenter = presenter(backend);

        for days in [3, 5, 0, 2] {
            presenter.present(series(days)).await;
            assert!(counters.live.get() <= 1);
        }
        assert_eq!(counters.created.get(), 3);
        assert_eq!(counters.destroyed.get(), 2);
        assert_eq!(counters.live.get(), 1);

        drop(presenter);
        assert_eq!(counters.live.get(), 0);
    }

    #[test]
    fn superseded_passes_are_ignored() {
        let backend = FakeBackend::ready_after(1);
        let counters = backend.counters.clone();
        let mut presenter = presenter(backend);

        let RenderPlan::AwaitLibrary(stale) = presenter.begin(series(2)) else {
            panic!("expected a wait");
        };
        let RenderPlan::AwaitLibrary(fresh) = presenter.begin(series(4)) else {
            panic!("expected a wait");
        };
        assert!(fresh.generation() > stale.generation());

        assert_eq!(presenter.complete(stale, Ok(1)), PanelState::Waiting { attempt: 0 });
        assert_eq!(counters.created.get(), 0);
        assert_eq!(presenter.complete(fresh, Ok(1)), PanelState::Rendered);
        assert_eq!(counters.created.get(), 1);
    }

    #[test]
    fn stale_timeout_does_not_latch_failure() {
        let mut presenter = presenter(FakeBackend::ready_after(1));
        let RenderPlan::AwaitLibrary(stale) = presenter.begin(series(1)) else {
            panic!("expected a wait");
        };
        let RenderPlan::Settled(state) = presenter.begin(series(0)) else {
            panic!("empty series should settle");
        };
        assert_eq!(state, PanelState::Empty);
        presenter.complete(stale, Err(PollTimeout { attempts: 50 }));
        assert_eq!(presenter.state(), PanelState::Empty);
    }

    #[test]
    fn attempts_are_tracked_while_waiting() {
        let mut presenter = presenter(FakeBackend::ready_after(1));
        let RenderPlan::AwaitLibrary(ticket) = presenter.begin(series(1)) else {
            panic!("expected a wait");
        };
        presenter.note_attempt(&ticket, 7);
        assert_eq!(presenter.state(), PanelState::Waiting { attempt: 7 });
    }

    #[test]
    fn construction_errors_fail_without_latching() {
        let mut backend = FakeBackend::ready_after(1);
        backend.fail_create = true;
        let mut presenter = presenter(backend);

        let RenderPlan::AwaitLibrary(ticket) = presenter.begin(series(1)) else {
            panic!("expected a wait");
        };
        assert_eq!(presenter.complete(ticket, Ok(1)), PanelState::Failed);
        assert!(matches!(presenter.begin(series(1)), RenderPlan::AwaitLibrary(_)));
    }

    #[test]
    fn snapshot_requires_a_chart() {
        let presenter = presenter(FakeBackend::ready_after(1));
        assert!(matches!(presenter.png_snapshot(), Err(ExportError::NoChart)));
    }
}
