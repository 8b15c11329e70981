use chrono::Local;
use egui::{Color32, RichText};

use super::SchedulerApp;

impl SchedulerApp {
    pub(super) fn render_status_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let status = self.context.status_text();
                let dot_color = if status.starts_with("connecting") {
                    Color32::from_rgb(245, 158, 11)
                } else {
                    Color32::from_rgb(22, 163, 74)
                };
                ui.label(RichText::new("●").color(dot_color));
                ui.label(status);
                ui.separator();
                ui.label(format!("{} block(s)", self.context.store().len()));

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(Local::now().format("%H:%M:%S").to_string()).monospace(),
                    );
                    ui.separator();
                    ui.label(self.context.day().label());
                });
            });
        });
    }
}
