//! Per-room block lists for the selected day.

use egui::{RichText, Ui};

use crate::config::AppConfig;
use crate::models::block::Block;
use crate::services::schedule::store::BlockStore;

use super::block_list_item;

pub fn render_rooms_view(
    ui: &mut Ui,
    store: &BlockStore,
    config: &AppConfig,
    allow_edit: bool,
) -> Option<Block> {
    let mut edit = None;

    let mut by_room: Vec<Vec<&Block>> = vec![Vec::new(); config.room_count()];
    for block in store.all() {
        if let Some(list) = by_room.get_mut(block.room_index) {
            list.push(block);
        }
    }
    for list in &mut by_room {
        list.sort_by_key(|b| b.start_min);
    }

    for (room_index, list) in by_room.iter().enumerate() {
        ui.group(|ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(RichText::new(config.room_label(room_index)).heading());
                ui.label(
                    RichText::new(match list.len() {
                        0 => "no blocks".to_string(),
                        1 => "1 block".to_string(),
                        n => format!("{} blocks", n),
                    })
                    .weak(),
                );
            });
            ui.separator();
            if list.is_empty() {
                ui.label(RichText::new("—").weak());
            }
            for block in list {
                if block_list_item(ui, block, "", allow_edit) {
                    edit = Some((*block).clone());
                }
            }
        });
        ui.add_space(8.0);
    }

    edit
}
