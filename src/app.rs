use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use eframe::egui;

use crate::data::loader::{self, LoadOutcome, Source};
use crate::state::AppState;
use crate::theme::{Theme, THEME_STORAGE_KEY};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct AirViewApp {
    pub state: AppState,
    /// Delivers the loader-thread outcome; the UI thread only ever polls.
    rx: Receiver<LoadOutcome>,
}

impl AirViewApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        source: Source,
        theme_override: Option<Theme>,
    ) -> Self {
        // Theme preference: CLI override, then stored value, then default.
        let stored = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, THEME_STORAGE_KEY));
        let theme = theme_override.or(stored).unwrap_or_default();
        theme.apply(&cc.egui_ctx);

        // The fetch is the only suspension point in the system.  It runs off
        // the UI thread; a hung fetch just leaves the viewer in its loading
        // state.  No timeout, cancellation, or retry.
        let (tx, rx) = mpsc::channel();
        let loader_source = source.clone();
        std::thread::spawn(move || {
            let _ = tx.send(loader::load_readings(&loader_source));
        });

        let mut state = AppState::new(source, theme);
        state.loading = true;

        AirViewApp { state, rx }
    }
}

impl eframe::App for AirViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.state.loading {
            match self.rx.try_recv() {
                Ok(outcome) => self.state.set_outcome(outcome),
                Err(_) => ctx.request_repaint_after(Duration::from_millis(100)),
            }
        }

        // ---- Top panel: source, surface toggles, theme ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: chart grid ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::chart_grid(ui, &self.state);
        });
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, THEME_STORAGE_KEY, &self.state.theme);
    }
}
