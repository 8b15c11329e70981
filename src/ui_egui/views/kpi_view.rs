//! Occupancy KPI board for the selected day.

use egui::{RichText, Ui};

use crate::config::AppConfig;
use crate::models::day::Day;
use crate::models::grid::TimeGrid;
use crate::services::schedule::kpi::ScheduleKpis;
use crate::services::schedule::store::BlockStore;

fn kpi_box(ui: &mut Ui, label: &str, value: String, hint: String) {
    ui.group(|ui| {
        ui.set_min_width(140.0);
        ui.label(RichText::new(label.to_uppercase()).weak().size(10.0));
        ui.label(RichText::new(value).heading());
        ui.label(RichText::new(hint).weak().size(10.0));
    });
}

pub fn render_kpi_view(
    ui: &mut Ui,
    store: &BlockStore,
    grid: &TimeGrid,
    config: &AppConfig,
    day: Day,
) {
    let kpis = ScheduleKpis::compute(store, grid, config.room_count());

    ui.horizontal_wrapped(|ui| {
        kpi_box(
            ui,
            "Occupancy",
            format!("{:.0}%", kpis.occupancy() * 100.0),
            format!("{} / {} slots", kpis.used_slots, kpis.total_slots),
        );
        kpi_box(
            ui,
            "Scheduled hours",
            format!("{:.1}", kpis.scheduled_hours()),
            format!("({} min per slot)", grid.step_min()),
        );
        kpi_box(
            ui,
            "Blocks",
            kpis.block_count.to_string(),
            format!("On {}", day),
        );
        kpi_box(
            ui,
            "Instructors",
            kpis.instructor_count.to_string(),
            "Found in the data".to_string(),
        );
    });

    ui.add_space(10.0);
    ui.group(|ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.label(RichText::new("Per-room detail").heading());
            if let Some(busiest) = kpis.busiest_room() {
                ui.label(
                    RichText::new(format!("Busiest: {}", config.room_label(busiest))).weak(),
                );
            }
        });
        ui.separator();
        for room_index in 0..config.room_count() {
            let usage = kpis.per_room[room_index];
            ui.horizontal(|ui| {
                ui.label(config.room_label(room_index));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(format!("{:.0}%", kpis.room_occupancy(room_index) * 100.0))
                            .monospace(),
                    );
                    ui.label(
                        RichText::new(format!(
                            "{} block(s) · {} slot(s)",
                            usage.block_count, usage.used_slots
                        ))
                        .weak(),
                    );
                });
            });
        }
    });
}
