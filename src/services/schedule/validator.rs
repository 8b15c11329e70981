use thiserror::Error;

use crate::models::block::{Block, BlockId};
use crate::models::day::Day;
use crate::models::grid::TimeGrid;
use crate::services::schedule::store::BlockStore;

/// Why a candidate placement was refused.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlacementError {
    /// The interval is off-lattice or outside the grid window.
    #[error("placement {start_min}..{end_min} is outside the {step_min}-minute grid {grid_start}..{grid_end}")]
    OutOfBounds {
        start_min: i32,
        end_min: i32,
        grid_start: i32,
        grid_end: i32,
        step_min: i32,
    },
    /// The interval intersects another block in the same room.
    #[error("placement collides with an existing block in the same room")]
    Overlap { conflicting: Block },
}

/// The single gate for every mutation. Dialog saves, drag-moves, and
/// drag-copies all pass through [`validate_placement`] before a write intent
/// is emitted; no write bypasses it.
pub struct ConflictValidator<'a> {
    store: &'a BlockStore,
    grid: &'a TimeGrid,
}

impl<'a> ConflictValidator<'a> {
    pub fn new(store: &'a BlockStore, grid: &'a TimeGrid) -> Self {
        Self { store, grid }
    }

    /// Check a candidate `(day, room, interval)` placement.
    ///
    /// `ignore` excludes one identity from the overlap scan, so a block being
    /// moved does not conflict with its own prior placement. Copies pass
    /// `None`: a copy is never excused from colliding with its source.
    ///
    /// Overlap is the strict half-open intersection test; a block ending
    /// exactly when another starts is legal.
    pub fn validate_placement(
        &self,
        day: Day,
        room_index: usize,
        start_min: i32,
        end_min: i32,
        ignore: Option<&BlockId>,
    ) -> Result<(), PlacementError> {
        if !self.grid.is_within_bounds(start_min, end_min) {
            return Err(PlacementError::OutOfBounds {
                start_min,
                end_min,
                grid_start: self.grid.start_min(),
                grid_end: self.grid.end_min(),
                step_min: self.grid.step_min(),
            });
        }

        let conflict = self.store.all().find(|b| {
            if b.day != day || b.room_index != room_index {
                return false;
            }
            if let (Some(ignored), Some(id)) = (ignore, b.id.as_ref()) {
                if ignored == id {
                    return false;
                }
            }
            start_min.max(b.start_min) < end_min.min(b.end_min)
        });

        match conflict {
            Some(existing) => Err(PlacementError::Overlap {
                conflicting: existing.clone(),
            }),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn grid() -> TimeGrid {
        TimeGrid::new(570, 1200, 30).unwrap()
    }

    fn block(id: &str, room: usize, start: i32, end: i32) -> Block {
        let mut b = Block::new(Day::Monday, room, start, end).unwrap();
        b.id = Some(BlockId::from(id));
        b.text = "occupied".to_string();
        b
    }

    fn store_with(blocks: Vec<Block>) -> BlockStore {
        let mut store = BlockStore::new();
        store.replace_all(blocks);
        store
    }

    #[test]
    fn test_free_cell_is_ok() {
        let store = store_with(vec![block("a", 2, 600, 660)]);
        let grid = grid();
        let validator = ConflictValidator::new(&store, &grid);

        assert!(validator
            .validate_placement(Day::Monday, 5, 660, 690, None)
            .is_ok());
    }

    #[test_case(600, 660 ; "identical interval")]
    #[test_case(630, 660 ; "nested interval")]
    #[test_case(570, 630 ; "overlapping the start")]
    #[test_case(630, 720 ; "overlapping the end")]
    fn test_overlap_detected(start: i32, end: i32) {
        let store = store_with(vec![block("a", 3, 600, 660)]);
        let grid = grid();
        let validator = ConflictValidator::new(&store, &grid);

        // Off-lattice candidates fail bounds first; only test aligned ones
        let result = validator.validate_placement(Day::Monday, 3, start, end, None);
        match result {
            Err(PlacementError::Overlap { conflicting }) => {
                assert_eq!(conflicting.id, Some(BlockId::from("a")));
            }
            Err(PlacementError::OutOfBounds { .. }) => {
                panic!("expected an aligned candidate; got OutOfBounds")
            }
            Ok(()) => panic!("expected Overlap for {}..{}", start, end),
        }
    }

    #[test]
    fn test_adjacency_is_legal() {
        let store = store_with(vec![block("a", 3, 600, 660)]);
        let grid = grid();
        let validator = ConflictValidator::new(&store, &grid);

        // Ending exactly at the neighbor's start, and starting at its end
        assert!(validator
            .validate_placement(Day::Monday, 3, 570, 600, None)
            .is_ok());
        assert!(validator
            .validate_placement(Day::Monday, 3, 660, 720, None)
            .is_ok());
    }

    #[test]
    fn test_other_room_and_other_day_do_not_conflict() {
        let store = store_with(vec![block("a", 3, 600, 660)]);
        let grid = grid();
        let validator = ConflictValidator::new(&store, &grid);

        assert!(validator
            .validate_placement(Day::Monday, 4, 600, 660, None)
            .is_ok());
        assert!(validator
            .validate_placement(Day::Tuesday, 3, 600, 660, None)
            .is_ok());
    }

    #[test]
    fn test_ignore_id_excuses_own_prior_placement() {
        let store = store_with(vec![block("a", 3, 600, 660)]);
        let grid = grid();
        let validator = ConflictValidator::new(&store, &grid);
        let own = BlockId::from("a");

        // A move within its own interval is fine when ignoring itself...
        assert!(validator
            .validate_placement(Day::Monday, 3, 630, 690, Some(&own))
            .is_ok());
        // ...but a copy (no ignore) collides with the source.
        assert!(matches!(
            validator.validate_placement(Day::Monday, 3, 630, 690, None),
            Err(PlacementError::Overlap { .. })
        ));
    }

    #[test_case(585, 615 ; "off lattice start")]
    #[test_case(570, 585 ; "off lattice end")]
    #[test_case(540, 600 ; "before grid start")]
    #[test_case(1170, 1230 ; "past grid end")]
    #[test_case(630, 630 ; "empty interval")]
    #[test_case(660, 630 ; "inverted interval")]
    fn test_out_of_bounds(start: i32, end: i32) {
        let store = store_with(vec![]);
        let grid = grid();
        let validator = ConflictValidator::new(&store, &grid);

        assert!(matches!(
            validator.validate_placement(Day::Monday, 0, start, end, None),
            Err(PlacementError::OutOfBounds { .. })
        ));
    }
}
