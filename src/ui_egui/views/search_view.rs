//! Free-text search over the day's blocks.

use egui::{RichText, Ui};

use crate::config::AppConfig;
use crate::models::block::Block;
use crate::services::schedule::store::BlockStore;

use super::block_list_item;

fn matches(block: &Block, room_label: &str, needle: &str) -> bool {
    [
        block.text.as_str(),
        block.group.as_str(),
        block.instructor.as_str(),
        block.modality.as_str(),
        block.note.as_str(),
        room_label,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(needle))
}

pub fn render_search_view(
    ui: &mut Ui,
    store: &BlockStore,
    config: &AppConfig,
    query: &mut String,
    allow_edit: bool,
) -> Option<Block> {
    let mut edit = None;

    ui.horizontal(|ui| {
        ui.label("Search:");
        ui.text_edit_singleline(query);
        if ui.button("Clear").clicked() {
            query.clear();
        }
    });
    ui.separator();

    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        ui.label(
            RichText::new("Type to search group, instructor, modality, or notes.").weak(),
        );
        return None;
    }

    let mut hits: Vec<&Block> = store
        .all()
        .filter(|b| matches(b, &config.room_label(b.room_index), &needle))
        .collect();
    hits.sort_by_key(|b| (b.room_index, b.start_min));

    if hits.is_empty() {
        ui.label(RichText::new("No results.").weak());
        return None;
    }

    ui.label(RichText::new(format!("{} result(s)", hits.len())).strong());
    ui.add_space(4.0);
    for block in hits {
        let room = config.room_label(block.room_index);
        if block_list_item(ui, block, &room, allow_edit) {
            edit = Some(block.clone());
        }
    }

    edit
}
