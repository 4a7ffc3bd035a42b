use std::collections::BTreeSet;

use eframe::egui::Color32;

use crate::data::model::Reading;
use crate::data::series::{self, SERIES};
use crate::theme::Theme;

/// At most this many x-axis labels render per chart; denser datasets label
/// every `label_step`-th reading.
pub const MAX_AXIS_LABELS: usize = 15;

// ---------------------------------------------------------------------------
// SurfaceSet – which series currently have a rendering slot
// ---------------------------------------------------------------------------

/// The set of chart slots present in the UI.  A series whose slot is absent
/// is skipped during chart construction, silently.
#[derive(Debug, Clone)]
pub struct SurfaceSet(BTreeSet<&'static str>);

impl Default for SurfaceSet {
    fn default() -> Self {
        Self::all()
    }
}

impl SurfaceSet {
    /// Every series has a slot.
    pub fn all() -> Self {
        SurfaceSet(SERIES.iter().map(|def| def.label).collect())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.0.contains(label)
    }

    pub fn toggle(&mut self, label: &'static str) {
        if !self.0.remove(label) {
            self.0.insert(label);
        }
    }
}

// ---------------------------------------------------------------------------
// ChartConfig – one declarative chart per series
// ---------------------------------------------------------------------------

/// Fixed visual style parameters, sourced from the active theme.
#[derive(Debug, Clone, Copy)]
pub struct ChartStyle {
    pub color: Color32,
    pub line_width: f32,
    pub point_radius: f32,
}

/// Everything the rendering layer needs to draw one series: ordered labels,
/// values aligned index-for-index with the labels, and styling.  The
/// renderer performs no aggregation or resampling; it draws exactly these
/// sequences.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub series_label: &'static str,
    /// Formatted axis labels, one per reading.
    pub labels: Vec<String>,
    /// Raw timestamps, used as tooltip titles.
    pub timestamps: Vec<String>,
    /// Resolved values; `None` where the reading carries no alias.
    pub values: Vec<Option<f64>>,
    pub style: ChartStyle,
    /// Label every n-th reading so at most [`MAX_AXIS_LABELS`] render.
    pub label_step: usize,
}

/// Tooltip body line: value to two decimals with the measurement unit.
pub fn tooltip_text(label: &str, value: f64) -> String {
    format!("{label}: {value:.2} µg/m³")
}

/// Smallest step that keeps the label count within [`MAX_AXIS_LABELS`].
pub fn label_step(n: usize) -> usize {
    n.div_ceil(MAX_AXIS_LABELS).max(1)
}

/// Build one chart configuration per series whose slot is present.  An empty
/// dataset builds nothing; the caller surfaces a single warning instead.
pub fn build_charts(readings: &[Reading], theme: Theme, surfaces: &SurfaceSet) -> Vec<ChartConfig> {
    if readings.is_empty() {
        return Vec::new();
    }

    let labels = series::timestamp_labels(readings);
    let timestamps: Vec<String> = readings.iter().map(|r| r.timestamp.clone()).collect();
    let colors = theme.series_palette(SERIES.len());
    let step = label_step(readings.len());

    SERIES
        .iter()
        .zip(colors)
        .filter_map(|(def, color)| {
            if !surfaces.contains(def.label) {
                log::debug!("no rendering slot for {}; skipping chart", def.label);
                return None;
            }
            Some(ChartConfig {
                series_label: def.label,
                labels: labels.clone(),
                timestamps: timestamps.clone(),
                values: series::series_values(readings, def),
                style: ChartStyle {
                    color,
                    line_width: 2.0,
                    point_radius: 3.0,
                },
                label_step: step,
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
