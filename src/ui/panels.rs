use eframe::egui::{self, Align, Layout, Ui};

use crate::data::loader::{self, Source};
use crate::data::series::SERIES;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar – source, chart slots, theme toggle
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if state.loading {
            ui.spinner();
            ui.label("Loading readings…");
        } else if let (Some(ds), Some(origin)) = (&state.dataset, state.origin) {
            ui.label(format!("{} readings · {}", ds.len(), origin.describe()))
                .on_hover_text(state.source.describe());
        }

        ui.separator();

        // Per-series chart slots; a deselected series is simply not built.
        for def in &SERIES {
            let shown = state.surfaces.contains(def.label);
            if ui.selectable_label(shown, def.label).clicked() {
                state.toggle_surface(def.label);
            }
        }

        // Theme toggle sits at the right edge; the button names the theme it
        // switches to.
        ui.with_layout(Layout::right_to_left(Align::Center), |ui: &mut Ui| {
            let next = state.theme.toggled();
            if ui.button(next.label()).clicked() {
                state.set_theme(next);
                state.theme.apply(ui.ctx());
            }
        });
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open readings")
        .add_filter("JSON", &["json"])
        .pick_file();

    if let Some(path) = file {
        // Same degradation contract as startup: a bad file substitutes the
        // fallback readings rather than erroring.
        let outcome = loader::load_readings(&Source::File(path));
        state.set_outcome(outcome);
    }
}
