// Test fixtures - reusable schedule data and drag helpers

use egui::Pos2;

use studio_scheduler::models::block::{Block, BlockId};
use studio_scheduler::models::day::Day;
use studio_scheduler::models::grid::{GridCell, TimeGrid};
use studio_scheduler::services::schedule::store::BlockStore;
use studio_scheduler::ui_egui::drag::{
    DragEngine, DragGates, DragModifiers, MoveOutcome, PointerId, PressOutcome,
};

/// The deployment-default lattice: 09:30 to 20:00 in 30-minute slots.
pub fn default_grid() -> TimeGrid {
    TimeGrid::new(570, 1200, 30).unwrap()
}

pub fn cell(slot_start: i32, room_index: usize) -> GridCell {
    GridCell {
        slot_start,
        room_index,
    }
}

/// A persisted block on Monday with a label.
pub fn block(id: &str, room: usize, start: i32, end: i32) -> Block {
    let mut b = Block::new(Day::Monday, room, start, end).unwrap();
    b.id = Some(BlockId::from(id));
    b.text = format!("Class {}", id);
    b
}

/// A not-yet-persisted block for adapter seeding.
pub fn draft(day: Day, room: usize, start: i32, end: i32, text: &str) -> Block {
    let mut b = Block::new(day, room, start, end).unwrap();
    b.text = text.to_string();
    b
}

pub fn store_with(blocks: Vec<Block>) -> BlockStore {
    let mut store = BlockStore::new();
    store.replace_all(blocks);
    store
}

pub fn open_gates() -> DragGates {
    DragGates {
        edit_mode: true,
        read_only: false,
        dialog_open: false,
    }
}

pub fn no_mods() -> DragModifiers {
    DragModifiers::default()
}

pub fn alt_held() -> DragModifiers {
    DragModifiers {
        alt: true,
        ..Default::default()
    }
}

/// Arm on the source block and travel past the drag threshold.
pub fn start_drag(engine: &mut DragEngine, source: &Block, mods: DragModifiers) {
    assert_eq!(
        engine.pointer_down(
            PointerId::PRIMARY,
            Pos2::new(100.0, 100.0),
            mods,
            source,
            open_gates(),
        ),
        PressOutcome::Armed
    );
    assert_eq!(
        engine.pointer_move(PointerId::PRIMARY, Pos2::new(130.0, 130.0), mods, None),
        MoveOutcome::DragStarted
    );
}
