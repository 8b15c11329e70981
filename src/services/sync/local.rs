use std::collections::HashMap;
use std::sync::mpsc::{channel, Receiver, Sender};

use crate::models::block::{Block, BlockId};
use crate::models::day::Day;

use super::{Snapshot, SyncAdapter, SyncError};

/// In-memory stand-in for the shared remote store.
///
/// Accepted writes mutate an internal table and are echoed back as a fresh
/// snapshot on the subscription channel, so callers observe the same
/// write-then-snapshot round trip a real remote gives them. Nothing is
/// applied on the caller's side.
pub struct LocalSyncAdapter {
    table: HashMap<BlockId, Block>,
    next_id: u64,
    subscription: Option<(Day, Sender<Snapshot>)>,
    read_only: bool,
}

impl LocalSyncAdapter {
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
            next_id: 1,
            subscription: None,
            read_only: false,
        }
    }

    /// Pre-populate the table, assigning identities. Useful for demos and
    /// tests that need an existing schedule.
    pub fn seed(&mut self, blocks: Vec<Block>) {
        for mut block in blocks {
            let id = self.mint_id();
            block.id = Some(id.clone());
            self.table.insert(id, block);
        }
        self.publish();
    }

    /// Make every write fail with `PermissionDenied`, mimicking a store
    /// whose rules reject the session.
    pub fn deny_writes(&mut self, deny: bool) {
        self.read_only = deny;
    }

    fn mint_id(&mut self) -> BlockId {
        let id = BlockId(format!("blk-{:06}", self.next_id));
        self.next_id += 1;
        id
    }

    fn check_writable(&self) -> Result<(), SyncError> {
        if self.read_only {
            Err(SyncError::PermissionDenied)
        } else {
            Ok(())
        }
    }

    fn snapshot_for(&self, day: Day) -> Snapshot {
        let mut blocks: Vec<Block> = self
            .table
            .values()
            .filter(|b| b.day == day)
            .cloned()
            .collect();
        blocks.sort_by(|a, b| {
            (a.room_index, a.start_min).cmp(&(b.room_index, b.start_min))
        });
        Snapshot {
            blocks,
            from_cache: false,
        }
    }

    /// Push the subscribed day's current set. A dropped receiver just ends
    /// the subscription.
    fn publish(&mut self) {
        let Some((day, tx)) = self.subscription.as_ref() else {
            return;
        };
        let snapshot = self.snapshot_for(*day);
        let delivered = tx.send(snapshot).is_ok();
        if !delivered {
            self.subscription = None;
        }
    }
}

impl Default for LocalSyncAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyncAdapter for LocalSyncAdapter {
    fn subscribe(&mut self, day: Day) -> Receiver<Snapshot> {
        let (tx, rx) = channel();
        self.subscription = Some((day, tx));
        self.publish();
        rx
    }

    fn create(&mut self, block: &Block) -> Result<BlockId, SyncError> {
        self.check_writable()?;
        let id = self.mint_id();
        let mut stored = block.clone();
        stored.id = Some(id.clone());
        self.table.insert(id.clone(), stored);
        log::info!("Created block {}", id);
        self.publish();
        Ok(id)
    }

    fn update(&mut self, id: &BlockId, block: &Block) -> Result<(), SyncError> {
        self.check_writable()?;
        if !self.table.contains_key(id) {
            return Err(SyncError::Unavailable(format!("no block with id {}", id)));
        }
        let mut stored = block.clone();
        stored.id = Some(id.clone());
        self.table.insert(id.clone(), stored);
        log::info!("Updated block {}", id);
        self.publish();
        Ok(())
    }

    fn delete(&mut self, id: &BlockId) -> Result<(), SyncError> {
        self.check_writable()?;
        if self.table.remove(id).is_none() {
            return Err(SyncError::Unavailable(format!("no block with id {}", id)));
        }
        log::info!("Deleted block {}", id);
        self.publish();
        Ok(())
    }
}
