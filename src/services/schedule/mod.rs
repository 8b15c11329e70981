//! Scheduling core: the day's block set, the placement gate, and the
//! slot × room projection the grid and drag hit-testing read.

pub mod indexer;
pub mod kpi;
pub mod store;
pub mod validator;

pub use indexer::GridIndex;
pub use kpi::ScheduleKpis;
pub use store::BlockStore;
pub use validator::{ConflictValidator, PlacementError};
