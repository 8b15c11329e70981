use std::collections::HashSet;

use crate::models::grid::TimeGrid;
use crate::services::schedule::store::BlockStore;

/// Usage aggregates for one room.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomUsage {
    pub used_slots: usize,
    pub block_count: usize,
}

/// Day-level occupancy aggregates for the KPI board.
#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleKpis {
    pub total_slots: usize,
    pub used_slots: usize,
    pub block_count: usize,
    pub instructor_count: usize,
    pub per_room: Vec<RoomUsage>,
    step_min: i32,
    slots_per_room: usize,
}

impl ScheduleKpis {
    /// Aggregate the store's current set against the lattice. Blocks with a
    /// room index beyond `room_count` are counted nowhere.
    pub fn compute(store: &BlockStore, grid: &TimeGrid, room_count: usize) -> Self {
        let slots_per_room = grid.slot_count();
        let mut per_room = vec![RoomUsage::default(); room_count];
        let mut used_slots = 0;
        let mut instructors: HashSet<String> = HashSet::new();

        for block in store.all() {
            let instructor = block.instructor.trim();
            if !instructor.is_empty() {
                instructors.insert(instructor.to_string());
            }

            if block.room_index >= room_count {
                continue;
            }
            let span = grid.span_of(block.start_min, block.end_min);
            per_room[block.room_index].used_slots += span;
            per_room[block.room_index].block_count += 1;
            used_slots += span;
        }

        Self {
            total_slots: slots_per_room * room_count,
            used_slots,
            block_count: store.len(),
            instructor_count: instructors.len(),
            per_room,
            step_min: grid.step_min(),
            slots_per_room,
        }
    }

    /// Overall occupancy fraction in `[0, 1]`.
    pub fn occupancy(&self) -> f64 {
        if self.total_slots == 0 {
            return 0.0;
        }
        self.used_slots as f64 / self.total_slots as f64
    }

    /// Occupancy fraction for one room.
    pub fn room_occupancy(&self, room_index: usize) -> f64 {
        if self.slots_per_room == 0 {
            return 0.0;
        }
        self.per_room
            .get(room_index)
            .map(|r| r.used_slots as f64 / self.slots_per_room as f64)
            .unwrap_or(0.0)
    }

    /// Total scheduled hours across all rooms.
    pub fn scheduled_hours(&self) -> f64 {
        (self.used_slots as i32 * self.step_min) as f64 / 60.0
    }

    /// Index of the most occupied room, if any rooms exist.
    pub fn busiest_room(&self) -> Option<usize> {
        self.per_room
            .iter()
            .enumerate()
            .max_by_key(|(_, usage)| usage.used_slots)
            .map(|(idx, _)| idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::block::{Block, BlockId};
    use crate::models::day::Day;

    fn grid() -> TimeGrid {
        TimeGrid::new(570, 1200, 30).unwrap()
    }

    fn block(id: &str, room: usize, start: i32, end: i32, instructor: &str) -> Block {
        let mut b = Block::new(Day::Monday, room, start, end).unwrap();
        b.id = Some(BlockId::from(id));
        b.text = "class".to_string();
        b.instructor = instructor.to_string();
        b
    }

    #[test]
    fn test_empty_store() {
        let store = BlockStore::new();
        let kpis = ScheduleKpis::compute(&store, &grid(), 10);

        assert_eq!(kpis.total_slots, 21 * 10);
        assert_eq!(kpis.used_slots, 0);
        assert_eq!(kpis.occupancy(), 0.0);
        assert_eq!(kpis.scheduled_hours(), 0.0);
        assert_eq!(kpis.instructor_count, 0);
    }

    #[test]
    fn test_usage_and_hours() {
        let mut store = BlockStore::new();
        store.replace_all(vec![
            block("a", 0, 570, 660, "Riley"),  // 3 slots
            block("b", 0, 660, 690, "Riley"),  // 1 slot
            block("c", 4, 600, 720, "Jordan"), // 4 slots
        ]);
        let kpis = ScheduleKpis::compute(&store, &grid(), 10);

        assert_eq!(kpis.used_slots, 8);
        assert_eq!(kpis.block_count, 3);
        assert_eq!(kpis.scheduled_hours(), 4.0);
        assert_eq!(kpis.instructor_count, 2);
        assert_eq!(kpis.per_room[0], RoomUsage { used_slots: 4, block_count: 2 });
        assert_eq!(kpis.per_room[4], RoomUsage { used_slots: 4, block_count: 1 });
        assert_eq!(kpis.busiest_room(), Some(0));
    }

    #[test]
    fn test_out_of_range_room_is_not_counted() {
        let mut store = BlockStore::new();
        store.replace_all(vec![block("a", 99, 600, 660, "")]);
        let kpis = ScheduleKpis::compute(&store, &grid(), 10);

        assert_eq!(kpis.used_slots, 0);
        assert_eq!(kpis.block_count, 1);
    }

    #[test]
    fn test_room_occupancy_fraction() {
        let mut store = BlockStore::new();
        store.replace_all(vec![block("a", 2, 570, 1200, "")]);
        let kpis = ScheduleKpis::compute(&store, &grid(), 10);

        assert!((kpis.room_occupancy(2) - 1.0).abs() < f64::EPSILON);
        assert_eq!(kpis.room_occupancy(3), 0.0);
    }
}
