//! The live board: what is happening in every room right now, flanked by the
//! previous and next slots. "Now" is the wall clock snapped to the lattice;
//! the operator can page the whole triplet by slot offsets.

use egui::{RichText, Ui};

use crate::config::AppConfig;
use crate::models::block::Block;
use crate::models::day::Day;
use crate::models::grid::TimeGrid;
use crate::services::schedule::store::BlockStore;
use crate::utils::time::{format_range, now_minutes};

/// Blocks intersecting one slot, the way the grid's overlap test sees it.
fn block_at<'a>(
    store: &'a BlockStore,
    day: Day,
    room_index: usize,
    slot_start: i32,
    step_min: i32,
) -> Option<&'a Block> {
    let slot_end = slot_start + step_min;
    store.all().find(|b| {
        b.day == day
            && b.room_index == room_index
            && b.start_min.max(slot_start) < b.end_min.min(slot_end)
    })
}

#[allow(clippy::too_many_arguments)]
fn render_slot_column(
    ui: &mut Ui,
    store: &BlockStore,
    config: &AppConfig,
    day: Day,
    slot_start: i32,
    step_min: i32,
    title: &str,
    allow_edit: bool,
) -> Option<Block> {
    let mut edit = None;
    ui.vertical(|ui| {
        ui.label(RichText::new(title).strong());
        ui.label(
            RichText::new(format_range(slot_start, slot_start + step_min))
                .weak()
                .size(11.0),
        );
        ui.add_space(4.0);

        for room_index in 0..config.room_count() {
            let occupant = block_at(store, day, room_index, slot_start, step_min);
            ui.group(|ui| {
                ui.set_width(ui.available_width());
                ui.label(
                    RichText::new(config.room_label(room_index).to_uppercase())
                        .weak()
                        .size(10.0),
                );
                match occupant {
                    Some(block) => {
                        let label = ui.selectable_label(false, block.display_text());
                        if allow_edit && label.clicked() {
                            edit = Some(block.clone());
                        }
                        let meta = block.meta_line();
                        if !meta.is_empty() {
                            ui.label(RichText::new(meta).weak().size(10.0));
                        }
                    }
                    None => {
                        ui.label(RichText::new("—").weak());
                    }
                }
            });
        }
    });
    edit
}

/// Render the live board. `slot_offset` pages the triplet; the return value
/// is a block the operator asked to edit.
pub fn render_live_view(
    ui: &mut Ui,
    store: &BlockStore,
    grid: &TimeGrid,
    config: &AppConfig,
    day: Day,
    slot_offset: &mut i32,
    allow_edit: bool,
) -> Option<Block> {
    let step = grid.step_min();
    let base = grid.clamp_to_slot(now_minutes() + *slot_offset * step);
    let prev = grid.clamp_to_slot(base - step);
    let next = grid.clamp_to_slot(base + step);

    ui.horizontal(|ui| {
        if ui.button("◀ Earlier").clicked() {
            *slot_offset -= 1;
        }
        if ui.button("Now").clicked() {
            *slot_offset = 0;
        }
        if ui.button("Later ▶").clicked() {
            *slot_offset += 1;
        }
        ui.label(RichText::new(format_range(base, base + step)).strong());
    });
    ui.separator();

    let mut edit = None;
    ui.columns(3, |columns| {
        if let Some(block) = render_slot_column(
            &mut columns[0],
            store,
            config,
            day,
            prev,
            step,
            "Previous",
            allow_edit,
        ) {
            edit = Some(block);
        }
        if let Some(block) = render_slot_column(
            &mut columns[1],
            store,
            config,
            day,
            base,
            step,
            "Now",
            allow_edit,
        ) {
            edit = Some(block);
        }
        if let Some(block) = render_slot_column(
            &mut columns[2],
            store,
            config,
            day,
            next,
            step,
            "Next",
            allow_edit,
        ) {
            edit = Some(block);
        }
    });
    edit
}
