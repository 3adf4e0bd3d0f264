use crate::application::session::Session;
use crate::interfaces::design_system::{DesignSystem, Palette};
use eframe::egui;
use egui_plot::{Legend, Line, Plot, Points};

/// Prediction history chart: predicted close against the Close input,
/// one point per record in submission order.
pub fn render_chart_panel(session: &Session, ui: &mut egui::Ui, palette: &Palette) {
    if session.history().is_empty() {
        return;
    }

    DesignSystem::card_frame(palette).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("Prediction History")
                    .size(18.0)
                    .strong()
                    .color(palette.text_primary),
            );
            ui.label(
                egui::RichText::new(format!("({} predictions)", session.history().len()))
                    .size(11.0)
                    .color(palette.text_secondary),
            );
        });
        ui.add_space(DesignSystem::SPACING_SMALL);

        let points = session.ledger().chart_points();
        let (line_color, marker_color) = DesignSystem::history_series();
        Plot::new("prediction_history")
            .height(300.0)
            .show_grid([true, true])
            .legend(Legend::default())
            .x_axis_label("Close")
            .y_axis_label("Predicted close")
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new("predicted_close", points.clone())
                        .color(line_color)
                        .width(3.0),
                );
                plot_ui.points(
                    Points::new("predictions", points)
                        .color(marker_color)
                        .radius(5.0),
                );
            });
    });
}
