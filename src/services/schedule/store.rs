use std::collections::HashMap;

use crate::models::block::{Block, BlockId};

/// The authoritative in-memory block set for the currently selected day.
///
/// The whole collection is replaced atomically on every inbound snapshot;
/// nothing here merges or patches. The single writer is the snapshot handler;
/// everything else reads.
#[derive(Debug, Default)]
pub struct BlockStore {
    blocks: Vec<Block>,
    by_id: HashMap<BlockId, usize>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap in the full set and rebuild the identity index. Stale entries
    /// from a previous day selection are discarded wholesale.
    pub fn replace_all(&mut self, blocks: Vec<Block>) {
        let mut by_id = HashMap::with_capacity(blocks.len());
        for (idx, block) in blocks.iter().enumerate() {
            if let Some(id) = &block.id {
                by_id.insert(id.clone(), idx);
            } else {
                log::warn!(
                    "Snapshot delivered a block without an id (room {}, {}..{}); dropping from index",
                    block.room_index,
                    block.start_min,
                    block.end_min
                );
            }
        }
        self.blocks = blocks;
        self.by_id = by_id;
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.by_id.get(id).map(|&idx| &self.blocks[idx])
    }

    /// Lazy, restartable iteration over the current set. Reflects the latest
    /// `replace_all`; re-iterable any number of times.
    pub fn all(&self) -> impl Iterator<Item = &Block> + '_ {
        self.blocks.iter()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }
}
