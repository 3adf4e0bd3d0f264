use crate::application::agents::dashboard_agent::DashboardAgent;
use crate::domain::features::FeatureName;
use crate::interfaces::design_system::{DesignSystem, Palette};
use eframe::egui;
use tracing::debug;

/// Renders the ten feature inputs plus the Predict / Clear actions
pub fn render_feature_form(agent: &mut DashboardAgent, ui: &mut egui::Ui, palette: &Palette) {
    DesignSystem::card_frame(palette).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.label(
            egui::RichText::new("📈 Enter Feature Values")
                .size(18.0)
                .strong()
                .color(palette.text_primary),
        );
        ui.add_space(DesignSystem::SPACING_SMALL);

        egui::Grid::new("feature_grid")
            .num_columns(2)
            .spacing([DesignSystem::SPACING_MEDIUM, DesignSystem::SPACING_SMALL])
            .show(ui, |ui| {
                for (i, feature) in FeatureName::ALL.into_iter().enumerate() {
                    render_feature_input(agent, ui, palette, feature);
                    if i % 2 == 1 {
                        ui.end_row();
                    }
                }
            });

        ui.add_space(DesignSystem::SPACING_MEDIUM);

        let busy = agent.session.is_submitting();
        ui.horizontal(|ui| {
            let predict_btn = egui::Button::new(
                egui::RichText::new("Predict Close Price")
                    .size(15.0)
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(DesignSystem::ACCENT_PRIMARY)
            .stroke(DesignSystem::primary_button_stroke())
            .min_size(egui::vec2(220.0, 36.0));

            if ui.add_enabled(!busy, predict_btn).clicked() {
                // Failures are kept on the session and shown by the result card.
                if let Err(e) = agent.request_prediction() {
                    debug!("Submit not started: {}", e);
                }
            }

            if busy {
                ui.spinner();
                ui.label(egui::RichText::new("Waiting for the prediction service...").color(palette.text_secondary));
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.add_enabled(!busy, egui::Button::new("Clear")).clicked() {
                    agent.session.clear_inputs();
                }
            });
        });
    });
}

fn render_feature_input(
    agent: &mut DashboardAgent,
    ui: &mut egui::Ui,
    palette: &Palette,
    feature: FeatureName,
) {
    let invalid = agent.session.is_field_invalid(feature);

    ui.vertical(|ui| {
        let mut text = agent.session.field(feature).to_string();
        let mut edit = egui::TextEdit::singleline(&mut text)
            .hint_text(feature.label())
            .desired_width(260.0);
        if invalid {
            edit = edit.text_color(DesignSystem::DANGER);
        }

        let response = ui.add(edit).on_hover_text(feature.description());
        if response.changed() {
            agent.session.update_field(feature, text);
        }

        ui.label(
            egui::RichText::new(feature.description())
                .size(10.0)
                .color(if invalid {
                    DesignSystem::DANGER
                } else {
                    palette.text_secondary
                }),
        );
    });
}
