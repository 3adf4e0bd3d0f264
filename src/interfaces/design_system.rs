use eframe::egui;

/// Colors for one theme variant
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub bg_window: egui::Color32,
    pub bg_card: egui::Color32,
    pub bg_result: egui::Color32,
    pub bg_input: egui::Color32,
    pub bg_header: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_secondary: egui::Color32,
    pub text_result: egui::Color32,
    pub border: egui::Color32,
}

/// Dark (default) and light dashboard styles
pub struct DesignSystem;

impl DesignSystem {
    // Accents
    pub const ACCENT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(58, 123, 213); // #3A7BD5
    pub const ACCENT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(0, 210, 255); // #00D2FF

    // Status
    pub const DANGER: egui::Color32 = egui::Color32::from_rgb(255, 23, 68);
    pub const WARNING: egui::Color32 = egui::Color32::from_rgb(255, 145, 0);

    pub const ROUNDING_MEDIUM: f32 = 8.0;
    pub const ROUNDING_LARGE: f32 = 16.0;

    pub const SPACING_SMALL: f32 = 8.0;
    pub const SPACING_MEDIUM: f32 = 16.0;
    pub const SPACING_LARGE: f32 = 24.0;

    pub const DARK: Palette = Palette {
        bg_window: egui::Color32::from_rgb(17, 29, 43),
        bg_card: egui::Color32::from_rgb(26, 34, 56), // #1A2238
        bg_result: egui::Color32::from_rgb(58, 123, 213),
        bg_input: egui::Color32::from_rgb(31, 41, 55),
        bg_header: egui::Color32::from_rgb(24, 40, 72), // #182848
        text_primary: egui::Color32::from_rgb(240, 246, 252),
        text_secondary: egui::Color32::from_gray(160),
        text_result: egui::Color32::WHITE,
        border: egui::Color32::from_rgb(48, 54, 61),
    };

    pub const LIGHT: Palette = Palette {
        bg_window: egui::Color32::from_rgb(233, 236, 239),
        bg_card: egui::Color32::WHITE,
        bg_result: egui::Color32::WHITE,
        bg_input: egui::Color32::from_rgb(229, 231, 235),
        bg_header: egui::Color32::from_rgb(58, 123, 213),
        text_primary: egui::Color32::from_rgb(51, 51, 51),
        text_secondary: egui::Color32::from_gray(110),
        text_result: egui::Color32::from_rgb(58, 123, 213),
        border: egui::Color32::from_rgb(208, 215, 222),
    };

    /// Line and marker colours of the prediction history series.
    pub fn history_series() -> (egui::Color32, egui::Color32) {
        (Self::ACCENT_PRIMARY, Self::ACCENT_SECONDARY)
    }

    /// Outline of the primary action, the far end of the accent gradient.
    pub fn primary_button_stroke() -> egui::Stroke {
        egui::Stroke::new(1.0, Self::ACCENT_SECONDARY)
    }

    pub fn palette(dark_mode: bool) -> Palette {
        if dark_mode { Self::DARK } else { Self::LIGHT }
    }

    /// Visual style for the whole window
    pub fn theme(dark_mode: bool) -> egui::Visuals {
        let palette = Self::palette(dark_mode);
        let mut visuals = if dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };

        visuals.window_fill = palette.bg_window;
        visuals.panel_fill = palette.bg_window;
        visuals.extreme_bg_color = palette.bg_input;

        visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, palette.border);
        visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, palette.text_primary);

        visuals.selection.bg_fill = Self::ACCENT_PRIMARY.linear_multiply(0.3);
        visuals.selection.stroke = egui::Stroke::new(1.0, Self::ACCENT_PRIMARY);

        visuals
    }

    /// Standard Card Styling
    pub fn card_frame(palette: &Palette) -> egui::Frame {
        egui::Frame::NONE
            .fill(palette.bg_card)
            .corner_radius(Self::ROUNDING_LARGE)
            .stroke(egui::Stroke::new(1.0, palette.border))
            .inner_margin(Self::SPACING_MEDIUM as i8)
    }
}
