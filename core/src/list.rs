use crate::block::{Block, BlockId};
use crate::patch::BlockPatch;

/// Ordered canvas contents. Order is render order and export order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BlockList {
    blocks: Vec<Block>,
}

impl BlockList {
    pub fn new() -> Self {
        Self { blocks: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn as_slice(&self) -> &[Block] {
        &self.blocks
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Block> {
        self.blocks.iter()
    }

    pub fn get(&self, id: &BlockId) -> Option<&Block> {
        self.blocks.iter().find(|block| &block.id == id)
    }

    pub fn position(&self, id: &BlockId) -> Option<usize> {
        self.blocks.iter().position(|block| &block.id == id)
    }

    pub fn contains(&self, id: &BlockId) -> bool {
        self.position(id).is_some()
    }

    pub fn push(&mut self, block: Block) {
        self.blocks.push(block);
    }

    /// Inserts before `index`, clamped to `[0, len]`. Returns the final index.
    pub fn insert(&mut self, index: usize, block: Block) -> usize {
        let index = index.min(self.blocks.len());
        self.blocks.insert(index, block);
        index
    }

    pub fn remove(&mut self, id: &BlockId) -> Option<Block> {
        let index = self.position(id)?;
        Some(self.blocks.remove(index))
    }

    /// Moves the block at `from` so that it ends up at index `to` of the
    /// resulting list. Out-of-range `to` lands at the end. Returns `false`
    /// when nothing changed.
    pub fn move_block(&mut self, from: usize, to: usize) -> bool {
        let len = self.blocks.len();
        if from >= len {
            return false;
        }
        let to = to.min(len - 1);
        if from == to {
            return false;
        }
        let block = self.blocks.remove(from);
        self.blocks.insert(to, block);
        true
    }

    pub fn update(&mut self, id: &BlockId, patch: &BlockPatch) -> bool {
        self.blocks
            .iter_mut()
            .find(|block| &block.id == id)
            .map(|block| patch.apply(&mut block.content))
            .unwrap_or(false)
    }
}

impl<'a> IntoIterator for &'a BlockList {
    type Item = &'a Block;
    type IntoIter = std::slice::Iter<'a, Block>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.iter()
    }
}
