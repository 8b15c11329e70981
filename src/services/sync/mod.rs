//! Remote-store boundary.
//!
//! The scheduler never mutates its own block set: every edit is sent to a
//! [`SyncAdapter`] as a write, and the grid only changes when the adapter
//! delivers the next full-replacement [`Snapshot`]. That round trip is the
//! consistency model; there is no optimistic local apply and no delta merge.

mod local;

pub use local::LocalSyncAdapter;

use std::sync::mpsc::Receiver;

use thiserror::Error;

use crate::models::block::{Block, BlockId};
use crate::models::day::Day;

/// A full, point-in-time replacement delivery of one day's block set.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub blocks: Vec<Block>,
    /// True when served from a local cache rather than a confirmed server
    /// round trip; surfaced in the status bar.
    pub from_cache: bool,
}

/// A validated mutation, ready for the adapter. Emitted by the drag engine
/// and the block dialog; every variant has already passed the conflict
/// validator.
#[derive(Debug, Clone, PartialEq)]
pub enum WriteIntent {
    /// New identity; `block.id` must be `None`.
    Create(Block),
    /// Same identity, replacement fields.
    Update(BlockId, Block),
    Delete(BlockId),
}

/// Why the remote store refused a write.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyncError {
    #[error("permission denied by the remote store")]
    PermissionDenied,
    #[error("remote store unavailable: {0}")]
    Unavailable(String),
}

/// The remote store seam.
///
/// `subscribe` switches the subscription to `day` and returns the channel
/// snapshots for that day arrive on; each delivery replaces the previous set
/// wholesale. Writes are accept/reject decisions; an accepted write is
/// reflected in a later snapshot, never applied locally by the caller.
pub trait SyncAdapter {
    fn subscribe(&mut self, day: Day) -> Receiver<Snapshot>;

    fn create(&mut self, block: &Block) -> Result<BlockId, SyncError>;

    fn update(&mut self, id: &BlockId, block: &Block) -> Result<(), SyncError>;

    fn delete(&mut self, id: &BlockId) -> Result<(), SyncError>;

    /// Dispatch a validated intent to the matching write method.
    fn apply(&mut self, intent: WriteIntent) -> Result<(), SyncError> {
        match intent {
            WriteIntent::Create(block) => self.create(&block).map(|_| ()),
            WriteIntent::Update(id, block) => self.update(&id, &block),
            WriteIntent::Delete(id) => self.delete(&id),
        }
    }
}
