use clap::ValueEnum;
use eframe::egui::{Color32, Context, Visuals};
use palette::{Hsl, IntoColor, Srgb};
use serde::{Deserialize, Serialize};

/// Storage key for the persisted theme preference.  Read once at startup,
/// written on each toggle (via `App::save`).
pub const THEME_STORAGE_KEY: &str = "airview.theme";

// ---------------------------------------------------------------------------
// Theme – two-state visual preference
// ---------------------------------------------------------------------------

/// The viewer's visual theme.  Owned by the application state and passed
/// explicitly into chart construction; nothing reads it ambiently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn label(&self) -> &'static str {
        match self {
            Theme::Dark => "Dark",
            Theme::Light => "Light",
        }
    }

    /// The other theme (what a toggle switches to).
    pub fn toggled(&self) -> Theme {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Accent color used for chart lines and points.
    pub fn accent(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(56, 189, 248),
            Theme::Light => Color32::from_rgb(2, 132, 199),
        }
    }

    /// Muted foreground, used for secondary text.
    pub fn muted(&self) -> Color32 {
        match self {
            Theme::Dark => Color32::from_rgb(159, 186, 215),
            Theme::Light => Color32::from_rgb(100, 116, 139),
        }
    }

    /// Color of the inline "no data" warning.
    pub fn warning(&self) -> Color32 {
        Color32::from_rgb(248, 113, 113)
    }

    /// Apply this theme's visuals to the egui context.
    pub fn apply(&self, ctx: &Context) {
        match self {
            Theme::Dark => {
                let mut v = Visuals::dark();
                v.panel_fill = Color32::from_rgb(15, 23, 42);
                v.window_fill = Color32::from_rgb(22, 35, 62);
                v.extreme_bg_color = Color32::from_rgb(11, 17, 32);
                v.faint_bg_color = Color32::from_rgb(22, 35, 62);
                v.override_text_color = Some(Color32::from_rgb(230, 241, 255));
                ctx.set_visuals(v);
            }
            Theme::Light => {
                let mut v = Visuals::light();
                v.panel_fill = Color32::from_rgb(248, 250, 252);
                v.window_fill = Color32::WHITE;
                v.override_text_color = Some(Color32::from_rgb(15, 23, 42));
                ctx.set_visuals(v);
            }
        }
    }

    /// One accent-derived color per series, spread by evenly stepped hues so
    /// the four charts stay distinguishable in both themes.
    pub fn series_palette(&self, n: usize) -> Vec<Color32> {
        let accent = self.accent();
        let base: Hsl = Srgb::new(
            accent.r() as f32 / 255.0,
            accent.g() as f32 / 255.0,
            accent.b() as f32 / 255.0,
        )
        .into_color();

        (0..n)
            .map(|i| {
                let hue = base.hue.into_positive_degrees() + i as f32 * 16.0;
                let hsl = Hsl::new(hue, base.saturation, base.lightness);
                let rgb: Srgb = hsl.into_color();
                Color32::from_rgb(
                    (rgb.red * 255.0) as u8,
                    (rgb.green * 255.0) as u8,
                    (rgb.blue * 255.0) as u8,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Light.toggled().toggled(), Theme::Light);
    }

    #[test]
    fn palette_has_one_color_per_series() {
        assert_eq!(Theme::Dark.series_palette(4).len(), 4);
        assert!(Theme::Light.series_palette(0).is_empty());
    }

    #[test]
    fn first_palette_entry_is_the_accent_hue() {
        // Hue 0 offset: the first series keeps the theme accent (modulo
        // rounding through HSL and back).
        let accent = Theme::Dark.accent();
        let first = Theme::Dark.series_palette(4)[0];
        assert!((accent.r() as i32 - first.r() as i32).abs() <= 2);
        assert!((accent.g() as i32 - first.g() as i32).abs() <= 2);
        assert!((accent.b() as i32 - first.b() as i32).abs() <= 2);
    }
}
