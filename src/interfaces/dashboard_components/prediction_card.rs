use crate::application::session::{Session, format_prediction};
use crate::domain::errors::SubmitError;
use crate::interfaces::design_system::{DesignSystem, Palette};
use eframe::egui;

/// Current prediction, if any, and the notice for the last failed submit
pub fn render_prediction_card(session: &Session, ui: &mut egui::Ui, palette: &Palette) {
    if let Some(error) = session.last_error() {
        render_error_notice(ui, error);
        ui.add_space(DesignSystem::SPACING_SMALL);
    }

    let Some(prediction) = session.current_prediction() else {
        return;
    };

    egui::Frame::NONE
        .fill(palette.bg_result)
        .corner_radius(DesignSystem::ROUNDING_LARGE)
        .inner_margin(DesignSystem::SPACING_MEDIUM as i8)
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new("Predicted Close Price")
                    .size(18.0)
                    .color(palette.text_result),
            );
            ui.label(
                egui::RichText::new(format_prediction(prediction))
                    .size(44.0)
                    .strong()
                    .color(palette.text_result),
            );
        });
}

fn render_error_notice(ui: &mut egui::Ui, error: &SubmitError) {
    // Only validation and network failures are ever stored as `last_error`.
    let color = if matches!(error, SubmitError::Validation(_)) {
        DesignSystem::WARNING
    } else {
        DesignSystem::DANGER
    };

    egui::Frame::NONE
        .fill(color.linear_multiply(0.15))
        .corner_radius(DesignSystem::ROUNDING_MEDIUM)
        .stroke(egui::Stroke::new(1.0, color))
        .inner_margin(egui::Margin::symmetric(10, 8))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(egui::RichText::new(error.to_string()).color(color));
        });
}
