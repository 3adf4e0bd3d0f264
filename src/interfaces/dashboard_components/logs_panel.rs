use crate::application::agents::dashboard_agent::DashboardAgent;
use crate::interfaces::design_system::{DesignSystem, Palette};
use eframe::egui;

/// Collapsible bottom panel with recent log lines
pub fn render_logs_panel(agent: &mut DashboardAgent, ctx: &egui::Context, palette: &Palette) {
    egui::TopBottomPanel::bottom("logs_panel")
        .resizable(true)
        .default_height(180.0)
        .min_height(30.0)
        .show_animated(ctx, !agent.logs_collapsed, |ui| {
            ui.label(
                egui::RichText::new("Activity Log")
                    .size(14.0)
                    .color(palette.text_primary),
            );
            ui.separator();

            egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &agent.log_lines {
                        let color = if line.contains("ERROR") {
                            DesignSystem::DANGER
                        } else if line.contains("WARN") {
                            DesignSystem::WARNING
                        } else {
                            palette.text_secondary
                        };
                        ui.label(egui::RichText::new(line).monospace().size(11.0).color(color));
                    }
                });
        });

    egui::TopBottomPanel::bottom("logs_toggle")
        .exact_height(28.0)
        .show(ctx, |ui| {
            ui.horizontal_centered(|ui| {
                let label = if agent.logs_collapsed {
                    "▲ Show activity log"
                } else {
                    "▼ Hide activity log"
                };
                if ui.small_button(label).clicked() {
                    agent.logs_collapsed = !agent.logs_collapsed;
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(format!("© {} | Stock Price Prediction Dashboard", chrono::Utc::now().format("%Y")))
                            .size(11.0)
                            .color(DesignSystem::ACCENT_PRIMARY),
                    );
                });
            });
        });
}
