//! Blocks grouped by instructor, with a name filter.
//!
//! The instructor comes from the structured field when present, otherwise it
//! is inferred from the display text the same way cell coloring does.

use std::collections::BTreeMap;

use egui::{RichText, Ui};

use crate::config::AppConfig;
use crate::models::block::Block;
use crate::services::schedule::store::BlockStore;

use super::block_list_item;
use super::palette::{infer_instructor, InstructorPalette};

fn instructor_of(block: &Block, palette: &InstructorPalette) -> Option<String> {
    let explicit = block.instructor.trim();
    if !explicit.is_empty() {
        return Some(explicit.to_string());
    }
    infer_instructor(&block.display_text(), palette)
}

pub fn render_instructors_view(
    ui: &mut Ui,
    store: &BlockStore,
    config: &AppConfig,
    palette: &InstructorPalette,
    filter: &mut String,
    allow_edit: bool,
) -> Option<Block> {
    let mut edit = None;

    ui.horizontal(|ui| {
        ui.label("Instructor:");
        ui.text_edit_singleline(filter);
        if ui.button("Clear").clicked() {
            filter.clear();
        }
    });
    ui.separator();

    let needle = filter.trim().to_lowercase();
    let mut grouped: BTreeMap<String, Vec<&Block>> = BTreeMap::new();
    for block in store.all() {
        if let Some(name) = instructor_of(block, palette) {
            if needle.is_empty() || name.to_lowercase().contains(&needle) {
                grouped.entry(name).or_default().push(block);
            }
        }
    }
    for list in grouped.values_mut() {
        list.sort_by_key(|b| b.start_min);
    }

    if grouped.is_empty() {
        ui.label(RichText::new("No matching instructors.").weak());
        return None;
    }

    for (name, list) in &grouped {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(name).heading());
                ui.label(
                    RichText::new(format!(
                        "{} block{}",
                        list.len(),
                        if list.len() == 1 { "" } else { "s" }
                    ))
                    .weak(),
                );
                if palette.color_for_name(name).is_some() {
                    ui.label("🎨");
                }
            });
            ui.separator();
            for block in list {
                let room = config.room_label(block.room_index);
                if block_list_item(ui, block, &room, allow_edit) {
                    edit = Some((*block).clone());
                }
            }
        });
        ui.add_space(8.0);
    }

    edit
}
