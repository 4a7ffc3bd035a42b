use eframe::egui::{RichText, ScrollArea, Ui};
use egui_plot::{Line, Plot, PlotPoint, PlotPoints, Points};

use crate::chart::{self, ChartConfig};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Chart grid (central panel)
// ---------------------------------------------------------------------------

/// Render the 2×2 chart grid, or the loading / warning placeholder.
pub fn chart_grid(ui: &mut Ui, state: &AppState) {
    if state.loading {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Loading readings…");
        });
        return;
    }

    if let Some(warning) = &state.warning {
        ui.add_space(10.0);
        ui.label(RichText::new(warning).color(state.theme.warning()));
        return;
    }

    if state.dataset.is_none() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a readings file to view charts  (File → Open…)");
        });
        return;
    }

    let spacing = ui.spacing().item_spacing.x;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for row in state.charts.chunks(2) {
                let width = (ui.available_width() - spacing) / 2.0;
                ui.horizontal(|ui: &mut Ui| {
                    for cfg in row {
                        draw_chart(ui, cfg, width);
                    }
                });
            }
        });
}

fn draw_chart(ui: &mut Ui, cfg: &ChartConfig, width: f32) {
    ui.vertical(|ui: &mut Ui| {
        ui.set_width(width);
        ui.strong(cfg.series_label);

        // The formatters are 'static closures, so they own their slices.
        let labels = cfg.labels.clone();
        let step = cfg.label_step;
        let timestamps = cfg.timestamps.clone();
        let series_label = cfg.series_label;

        Plot::new(cfg.series_label)
            .height(260.0)
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_zoom(true)
            .allow_scroll(false)
            .x_axis_formatter(move |mark, _range| axis_label(&labels, step, mark.value))
            .label_formatter(move |_name, point| hover_text(series_label, &timestamps, point))
            .show(ui, |plot_ui| {
                // Absent values break the line into segments; nothing is
                // interpolated across the gap.
                for segment in present_runs(&cfg.values) {
                    let line = Line::new(PlotPoints::from(segment))
                        .name(cfg.series_label)
                        .color(cfg.style.color)
                        .width(cfg.style.line_width)
                        .fill(0.0);
                    plot_ui.line(line);
                }

                let markers: Vec<[f64; 2]> = cfg
                    .values
                    .iter()
                    .enumerate()
                    .filter_map(|(i, v)| v.map(|y| [i as f64, y]))
                    .collect();
                plot_ui.points(
                    Points::new(PlotPoints::from(markers))
                        .color(cfg.style.color)
                        .radius(cfg.style.point_radius),
                );
            });
    });
}

/// Label integer reading indices, every `step`-th one; everything else gets
/// an empty string.
fn axis_label(labels: &[String], step: usize, value: f64) -> String {
    let nearest = value.round();
    if (value - nearest).abs() > 1e-6 || nearest < 0.0 {
        return String::new();
    }
    let idx = nearest as usize;
    if idx >= labels.len() || idx % step != 0 {
        return String::new();
    }
    labels[idx].clone()
}

/// Hover text: raw timestamp as the title, then the formatted value line.
fn hover_text(series_label: &str, timestamps: &[String], point: &PlotPoint) -> String {
    let body = chart::tooltip_text(series_label, point.y);
    let idx = point.x.round();
    if idx >= 0.0 && (idx as usize) < timestamps.len() {
        format!("{}\n{body}", timestamps[idx as usize])
    } else {
        body
    }
}

/// Split the values sequence into contiguous runs of present points.
fn present_runs(values: &[Option<f64>]) -> Vec<Vec<[f64; 2]>> {
    let mut runs = Vec::new();
    let mut current: Vec<[f64; 2]> = Vec::new();
    for (i, v) in values.iter().enumerate() {
        match v {
            Some(y) => current.push([i as f64, *y]),
            None => {
                if !current.is_empty() {
                    runs.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_split_on_absent_values() {
        let values = vec![Some(1.0), Some(2.0), None, Some(4.0), None];
        let runs = present_runs(&values);
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0], vec![[0.0, 1.0], [1.0, 2.0]]);
        assert_eq!(runs[1], vec![[3.0, 4.0]]);

        assert!(present_runs(&[None, None]).is_empty());
    }

    #[test]
    fn axis_labels_only_on_step_indices() {
        let labels: Vec<String> = (0..4).map(|i| format!("L{i}")).collect();
        assert_eq!(axis_label(&labels, 2, 0.0), "L0");
        assert_eq!(axis_label(&labels, 2, 1.0), "");
        assert_eq!(axis_label(&labels, 2, 2.0), "L2");
        assert_eq!(axis_label(&labels, 1, 2.5), "");
        assert_eq!(axis_label(&labels, 1, -1.0), "");
        assert_eq!(axis_label(&labels, 1, 9.0), "");
    }

    #[test]
    fn hover_text_includes_raw_timestamp_title() {
        let timestamps = vec!["2025-12-10T13:36:46.896467+04:00".to_string()];
        let point = PlotPoint::new(0.0, 23.42);
        assert_eq!(
            hover_text("PM2.5", &timestamps, &point),
            "2025-12-10T13:36:46.896467+04:00\nPM2.5: 23.42 µg/m³"
        );

        let outside = PlotPoint::new(5.0, 1.0);
        assert_eq!(hover_text("PM1", &timestamps, &outside), "PM1: 1.00 µg/m³");
    }
}
