use std::collections::HashMap;

use crate::models::block::BlockId;
use crate::models::day::Day;
use crate::models::grid::{GridCell, TimeGrid};
use crate::services::schedule::store::BlockStore;

/// Projection of the block store into a slot × room lookup.
///
/// Each block anchors at its starting cell with a slot span; the follow-on
/// cells it covers are suppressed from independent rendering and resolve back
/// to the anchor during hit-testing. Rebuilt whenever the store changes;
/// read-only afterwards.
#[derive(Debug, Default)]
pub struct GridIndex {
    anchors: HashMap<GridCell, BlockId>,
    covered: HashMap<GridCell, BlockId>,
    spans: HashMap<BlockId, usize>,
}

impl GridIndex {
    /// Project the store's blocks for `day` onto the lattice.
    pub fn build(store: &BlockStore, grid: &TimeGrid, day: Day) -> Self {
        let mut index = GridIndex::default();

        for block in store.all() {
            if block.day != day {
                continue;
            }
            let Some(id) = block.id.clone() else {
                continue;
            };

            let anchor = GridCell {
                slot_start: block.start_min,
                room_index: block.room_index,
            };
            let span = grid.span_of(block.start_min, block.end_min);

            index.anchors.insert(anchor, id.clone());
            index.spans.insert(id.clone(), span);
            for k in 1..span {
                let covered_cell = GridCell {
                    slot_start: block.start_min + (k as i32) * grid.step_min(),
                    room_index: block.room_index,
                };
                index.covered.insert(covered_cell, id.clone());
            }
        }

        index
    }

    /// The block anchored at this cell, if any.
    pub fn anchor_at(&self, cell: GridCell) -> Option<&BlockId> {
        self.anchors.get(&cell)
    }

    /// Whether this cell is a follow-on slot of a multi-slot block.
    pub fn is_covered(&self, cell: GridCell) -> bool {
        self.covered.contains_key(&cell)
    }

    /// The block occupying this cell, anchored or covering.
    pub fn occupant_at(&self, cell: GridCell) -> Option<&BlockId> {
        self.anchors.get(&cell).or_else(|| self.covered.get(&cell))
    }

    /// Slot span of an indexed block (`round(duration / step)`, minimum 1).
    pub fn span_of(&self, id: &BlockId) -> usize {
        self.spans.get(id).copied().unwrap_or(1)
    }

    /// Cells that should not render independently.
    pub fn covered_cells(&self) -> impl Iterator<Item = &GridCell> + '_ {
        self.covered.keys()
    }

    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }
}
