//! Self-contained SVG line chart. Always ready, so it doubles as the native
//! backend and as the source for PNG snapshots.

use std::fmt::Write;

use crate::analytics::presenter::{ChartBackend, ChartInstance};
use crate::analytics::series::{ChartSeries, SeriesKind};
use crate::core::error::{ChartError, ExportError};
use crate::core::format::format_count;

const WIDTH: f64 = 960.0;
const HEIGHT: f64 = 400.0;
const PAD_LEFT: f64 = 64.0;
const PAD_RIGHT: f64 = 24.0;
const PAD_TOP: f64 = 24.0;
const PAD_BOTTOM: f64 = 72.0;
const GRID_LINES: u64 = 4;
const MAX_X_LABELS: usize = 8;

#[derive(Debug, Clone, Copy, Default)]
pub struct SvgBackend;

#[derive(Debug, Clone)]
pub struct SvgChart {
    markup: String,
}

impl SvgChart {
    pub fn markup(&self) -> &str {
        &self.markup
    }
}

impl ChartBackend for SvgBackend {
    type Chart = SvgChart;

    fn is_ready(&self) -> bool {
        true
    }

    fn create(&self, _target_id: &str, series: &ChartSeries) -> Result<SvgChart, ChartError> {
        Ok(SvgChart {
            markup: render_svg(series),
        })
    }
}

impl ChartInstance for SvgChart {
    fn destroy(&mut self) {
        self.markup.clear();
    }

    fn inline_markup(&self) -> Option<&str> {
        Some(&self.markup)
    }

    fn png_snapshot(&self) -> Result<Vec<u8>, ExportError> {
        rasterize(&self.markup)
    }
}

/// Render all four series as an SVG document.
pub fn render_svg(series: &ChartSeries) -> String {
    let plot_w = WIDTH - PAD_LEFT - PAD_RIGHT;
    let plot_h = HEIGHT - PAD_TOP - PAD_BOTTOM;
    let ceiling = nice_ceiling(series.peak());
    let count = series.len();

    let x_at = |idx: usize| -> f64 {
        if count <= 1 {
            PAD_LEFT + plot_w / 2.0
        } else {
            PAD_LEFT + plot_w * idx as f64 / (count - 1) as f64
        }
    };
    let y_at = |value: u64| -> f64 { PAD_TOP + plot_h - plot_h * value as f64 / ceiling as f64 };

    let mut svg = String::new();
    let _ = write!(
        svg,
        "<svg xmlns='http://www.w3.org/2000/svg' width='{WIDTH}' height='{HEIGHT}' viewBox='0 0 {WIDTH} {HEIGHT}' role='img' aria-label='Daily site activity'>"
    );
    let _ = write!(svg, "<rect width='{WIDTH}' height='{HEIGHT}' fill='#ffffff'/>");

    for step in 0..=GRID_LINES {
        let value = grid_value(ceiling, step);
        let y = y_at(value);
        let _ = write!(
            svg,
            "<line x1='{PAD_LEFT}' y1='{y:.1}' x2='{:.1}' y2='{y:.1}' stroke='#e5e7eb' stroke-width='1'/>",
            WIDTH - PAD_RIGHT
        );
        let _ = write!(
            svg,
            "<text x='{:.1}' y='{:.1}' text-anchor='end' font-family='sans-serif' font-size='12' fill='#6b7280'>{}</text>",
            PAD_LEFT - 8.0,
            y + 4.0,
            format_count(value)
        );
    }

    let stride = count.div_ceil(MAX_X_LABELS).max(1);
    for (idx, label) in series.labels.iter().enumerate() {
        if idx % stride != 0 && idx + 1 != count {
            continue;
        }
        let _ = write!(
            svg,
            "<text x='{:.1}' y='{:.1}' text-anchor='middle' font-family='sans-serif' font-size='12' fill='#6b7280'>{}</text>",
            x_at(idx),
            PAD_TOP + plot_h + 20.0,
            escape_xml(label)
        );
    }

    for kind in SeriesKind::ALL {
        let values = series.values(kind);
        if values.is_empty() {
            continue;
        }
        let points = values
            .iter()
            .enumerate()
            .map(|(idx, value)| format!("{:.1},{:.1}", x_at(idx), y_at(*value)))
            .collect::<Vec<_>>()
            .join(" ");
        let _ = write!(
            svg,
            "<polyline data-series='{}' points='{points}' fill='none' stroke='{}' stroke-width='2' stroke-linejoin='round'/>",
            kind.field(),
            kind.color()
        );
    }

    let legend_y = HEIGHT - 16.0;
    for (slot, kind) in SeriesKind::ALL.into_iter().enumerate() {
        let x = PAD_LEFT + slot as f64 * 180.0;
        let _ = write!(
            svg,
            "<rect x='{x:.1}' y='{:.1}' width='12' height='12' fill='{}'/><text x='{:.1}' y='{legend_y:.1}' font-family='sans-serif' font-size='13' fill='#374151'>{}</text>",
            legend_y - 10.0,
            kind.color(),
            x + 18.0,
            kind.label()
        );
    }

    svg.push_str("</svg>");
    svg
}

/// Round the axis ceiling up to 1, 2 or 5 times a power of ten.
/// Peaks too close to `u64::MAX` for the next step keep the peak itself.
fn nice_ceiling(peak: u64) -> u64 {
    if peak == 0 {
        return 1;
    }
    let mut magnitude = 1u64;
    while let Some(next) = magnitude.checked_mul(10).filter(|next| *next <= peak) {
        magnitude = next;
    }
    [1u64, 2, 5, 10]
        .into_iter()
        .filter_map(|step| step.checked_mul(magnitude))
        .find(|candidate| *candidate >= peak)
        .unwrap_or(peak)
}

/// Value of the `step`-th horizontal grid line.
fn grid_value(ceiling: u64, step: u64) -> u64 {
    let value = u128::from(ceiling) * u128::from(step) / u128::from(GRID_LINES);
    u64::try_from(value).unwrap_or(ceiling)
}

pub(crate) fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(not(target_arch = "wasm32"))]
fn rasterize(markup: &str) -> Result<Vec<u8>, ExportError> {
    use std::sync::Arc;

    let mut fonts = usvg::fontdb::Database::new();
    fonts.load_system_fonts();
    let options = usvg::Options {
        fontdb: Arc::new(fonts),
        ..usvg::Options::default()
    };

    let tree = usvg::Tree::from_str(markup, &options)
        .map_err(|err| ExportError::Snapshot(err.to_string()))?;
    let size = tree.size().to_int_size();
    let mut pixmap = tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| ExportError::Snapshot("invalid canvas size".to_string()))?;
    resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());
    pixmap
        .encode_png()
        .map_err(|err| ExportError::Snapshot(err.to_string()))
}

#[cfg(target_arch = "wasm32")]
fn rasterize(_markup: &str) -> Result<Vec<u8>, ExportError> {
    Err(ExportError::Snapshot(
        "SVG rasterising is only available on desktop".to_string(),
    ))
}
