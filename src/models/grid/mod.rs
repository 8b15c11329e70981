// Time grid module
// The fixed slot lattice every placement is measured against

use serde::{Deserialize, Serialize};

/// The day's slot lattice: start/end bounds and the fixed slot step, all in
/// minutes from midnight. Immutable for the process lifetime; built from
/// configuration at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeGrid {
    start_min: i32,
    end_min: i32,
    step_min: i32,
}

/// One lattice coordinate: a slot start paired with a room column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridCell {
    pub slot_start: i32,
    pub room_index: usize,
}

impl TimeGrid {
    /// Create a grid, validating that the window is non-empty and divides
    /// evenly into steps.
    pub fn new(start_min: i32, end_min: i32, step_min: i32) -> Result<Self, String> {
        if step_min <= 0 {
            return Err("Slot step must be positive".to_string());
        }
        if end_min <= start_min {
            return Err("Grid end must be after grid start".to_string());
        }
        if (end_min - start_min) % step_min != 0 {
            return Err(format!(
                "Grid window {}..{} is not a whole number of {}-minute slots",
                start_min, end_min, step_min
            ));
        }
        Ok(Self {
            start_min,
            end_min,
            step_min,
        })
    }

    pub fn start_min(&self) -> i32 {
        self.start_min
    }

    pub fn end_min(&self) -> i32 {
        self.end_min
    }

    pub fn step_min(&self) -> i32 {
        self.step_min
    }

    /// Ordered slot-start offsets, `start_min..end_min` step `step_min`.
    /// The iterator is cheap and restartable; callers re-iterate freely.
    pub fn slots(&self) -> impl Iterator<Item = i32> + '_ {
        (self.start_min..self.end_min).step_by(self.step_min as usize)
    }

    pub fn slot_count(&self) -> usize {
        ((self.end_min - self.start_min) / self.step_min) as usize
    }

    /// Whether a minute offset sits on the lattice relative to grid start.
    pub fn is_aligned(&self, minutes: i32) -> bool {
        (minutes - self.start_min).rem_euclid(self.step_min) == 0
    }

    /// Bounds-legality for a candidate interval: inside the window, properly
    /// ordered, and both endpoints aligned to the slot step.
    pub fn is_within_bounds(&self, start_min: i32, end_min: i32) -> bool {
        start_min >= self.start_min
            && end_min <= self.end_min
            && end_min > start_min
            && self.is_aligned(start_min)
            && self.is_aligned(end_min)
    }

    /// Snap an arbitrary minute value down to the nearest slot start, clamped
    /// to `[start_min, end_min - step_min]`. Interprets "now" as a slot.
    pub fn clamp_to_slot(&self, minutes: i32) -> i32 {
        let clamped = minutes.clamp(self.start_min, self.end_min - self.step_min);
        let offset = clamped - self.start_min;
        self.start_min + (offset / self.step_min) * self.step_min
    }

    /// Number of slots an interval spans, minimum 1.
    pub fn span_of(&self, start_min: i32, end_min: i32) -> usize {
        let slots =
            ((end_min - start_min) as f64 / self.step_min as f64).round() as i64;
        slots.max(1) as usize
    }
}
