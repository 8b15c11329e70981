// View module exports

pub mod grid_view;
pub mod instructors_view;
pub mod kpi_view;
pub mod live_view;
pub mod palette;
pub mod rooms_view;
pub mod search_view;

use egui::{RichText, Ui};

use crate::models::block::Block;
use crate::utils::time::format_range;

/// A list row shared by the rooms/instructors/search views: label and meta on
/// the left, a time pill and optional Edit button on the right. Returns true
/// when Edit was clicked.
pub(crate) fn block_list_item(
    ui: &mut Ui,
    block: &Block,
    trailing: &str,
    show_edit: bool,
) -> bool {
    let mut edit_clicked = false;
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.label(RichText::new(block.display_text()).strong());
            let meta = block.meta_line();
            if !meta.is_empty() {
                ui.label(RichText::new(meta).weak().size(11.0));
            }
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if show_edit && ui.small_button("Edit").clicked() {
                edit_clicked = true;
            }
            if !trailing.is_empty() {
                ui.label(RichText::new(trailing).weak());
            }
            ui.label(RichText::new(format_range(block.start_min, block.end_min)).monospace());
        });
    });
    ui.separator();
    edit_clicked
}
