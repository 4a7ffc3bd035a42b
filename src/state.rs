use crate::chart::{self, ChartConfig, SurfaceSet};
use crate::data::loader::{LoadOutcome, Origin, Source};
use crate::data::model::Reading;
use crate::theme::Theme;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Where the readings were requested from.
    pub source: Source,

    /// Active visual theme, passed into chart construction.
    pub theme: Theme,

    /// Which series currently have a chart slot.
    pub surfaces: SurfaceSet,

    /// Loaded readings (None until the loader delivers).
    pub dataset: Option<Vec<Reading>>,

    /// Which path actually produced the readings.
    pub origin: Option<Origin>,

    /// One chart configuration per visible series (cached).
    pub charts: Vec<ChartConfig>,

    /// Inline warning shown instead of charts when no data is available.
    pub warning: Option<String>,

    /// Whether the initial load is still in flight.
    pub loading: bool,
}

impl AppState {
    pub fn new(source: Source, theme: Theme) -> Self {
        AppState {
            source,
            theme,
            surfaces: SurfaceSet::all(),
            dataset: None,
            origin: None,
            charts: Vec::new(),
            warning: None,
            loading: false,
        }
    }

    /// Ingest a loader outcome and rebuild the chart configurations.
    pub fn set_outcome(&mut self, outcome: LoadOutcome) {
        log::info!(
            "showing {} readings ({})",
            outcome.readings.len(),
            outcome.origin.describe()
        );
        self.origin = Some(outcome.origin);
        self.dataset = Some(outcome.readings);
        self.loading = false;
        self.rebuild_charts();
    }

    /// Switch theme and restyle the charts.
    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
        self.rebuild_charts();
    }

    /// Add or remove a series' chart slot.
    pub fn toggle_surface(&mut self, label: &'static str) {
        self.surfaces.toggle(label);
        self.rebuild_charts();
    }

    /// Recompute `charts` from the current dataset, theme, and surfaces.
    /// An empty dataset produces no charts and a single inline warning.
    pub fn rebuild_charts(&mut self) {
        let Some(readings) = self.dataset.as_deref() else {
            self.charts.clear();
            return;
        };

        if readings.is_empty() {
            self.charts.clear();
            self.warning = Some("No air-quality data found.".to_string());
            return;
        }

        self.warning = None;
        self.charts = chart::build_charts(readings, self.theme, &self.surfaces);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded_state(readings: Vec<Reading>) -> AppState {
        let mut state = AppState::new(Source::Offline, Theme::Dark);
        state.set_outcome(LoadOutcome {
            readings,
            origin: Origin::Fallback,
        });
        state
    }

    #[test]
    fn empty_dataset_sets_exactly_one_warning_and_no_charts() {
        let state = loaded_state(Vec::new());
        assert!(state.charts.is_empty());
        assert_eq!(state.warning.as_deref(), Some("No air-quality data found."));
    }

    #[test]
    fn warning_survives_theme_and_surface_changes() {
        let mut state = loaded_state(Vec::new());
        state.set_theme(Theme::Light);
        state.toggle_surface("PM1");
        assert!(state.charts.is_empty());
        assert_eq!(state.warning.as_deref(), Some("No air-quality data found."));
    }

    #[test]
    fn readings_clear_the_warning_and_build_charts() {
        let mut state = loaded_state(Vec::new());
        state.set_outcome(LoadOutcome {
            readings: vec![Reading::new("t").with_field("pm2_5", 1.0)],
            origin: Origin::FileLoaded,
        });
        assert!(state.warning.is_none());
        assert_eq!(state.charts.len(), 4);
        assert!(!state.loading);
    }

    #[test]
    fn toggling_a_surface_rebuilds_without_that_chart() {
        let mut state = loaded_state(vec![Reading::new("t").with_field("pm10", 12.0)]);
        state.toggle_surface("PM10");
        assert_eq!(state.charts.len(), 3);
        assert!(state.charts.iter().all(|c| c.series_label != "PM10"));
    }
}
