use crate::application::agents::dashboard_agent::DashboardAgent;
use crate::interfaces::dashboard_components::chart_panel::render_chart_panel;
use crate::interfaces::dashboard_components::feature_form::render_feature_form;
use crate::interfaces::dashboard_components::logs_panel::render_logs_panel;
use crate::interfaces::dashboard_components::prediction_card::render_prediction_card;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

impl eframe::App for DashboardAgent {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dark_mode = self.session.is_dark_mode();
        let palette = DesignSystem::palette(dark_mode);
        ctx.set_visuals(DesignSystem::theme(dark_mode));

        // --- 1. Process Events (Logs & Prediction Results) ---
        self.update();

        // --- 2. Header ---
        egui::TopBottomPanel::top("top_panel")
            .frame(
                egui::Frame::NONE
                    .fill(palette.bg_header)
                    .inner_margin(egui::Margin::symmetric(16, 10)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading(
                        egui::RichText::new("Stock Price Prediction Dashboard")
                            .strong()
                            .color(egui::Color32::WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let icon = if dark_mode { "☀" } else { "🌙" };
                        if ui
                            .button(egui::RichText::new(icon).size(18.0))
                            .on_hover_text("Toggle theme")
                            .clicked()
                        {
                            self.session.toggle_theme();
                        }
                    });
                });
            });

        // --- 3. Footer: Logs ---
        render_logs_panel(self, ctx, &palette);

        // --- 4. Central Panel: Form, Result, History ---
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(DesignSystem::SPACING_MEDIUM);
                render_feature_form(self, ui, &palette);
                ui.add_space(DesignSystem::SPACING_LARGE);
                render_prediction_card(&self.session, ui, &palette);
                ui.add_space(DesignSystem::SPACING_LARGE);
                render_chart_panel(&self.session, ui, &palette);
            });
        });

        // Poll fast while a request is outstanding, slowly for new log lines otherwise
        let repaint_ms = if self.has_pending_request() { 50 } else { 500 };
        ctx.request_repaint_after(std::time::Duration::from_millis(repaint_ms));
    }
}

/// Heading size shared by every panel.
pub fn configure_fonts(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();
    style.text_styles.insert(
        egui::TextStyle::Heading,
        egui::FontId::new(22.0, egui::FontFamily::Proportional),
    );
    ctx.set_style(style);
}
