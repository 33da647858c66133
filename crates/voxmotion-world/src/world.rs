//! Chunked world with spatial indexing.

use std::sync::Arc;

use hashbrown::HashMap;
use parking_lot::RwLock;
use voxmotion_core::coords::{BlockPos, ChunkPos};
use voxmotion_core::{Block, BlockState};

use crate::chunk::Chunk;
use crate::BlockAccess;

/// All loaded chunks indexed by position.
///
/// Provides thread-safe access to chunks via `RwLock`, so a loader can publish
/// chunks between simulation ticks while readers keep a shared reference.
pub struct ChunkedWorld {
    /// All loaded chunks indexed by position.
    chunks: RwLock<HashMap<ChunkPos, Chunk>>,
    /// State used to fill freshly created chunks.
    air: Arc<BlockState>,
}

impl ChunkedWorld {
    /// Create an empty world. `air` fills chunks created by [`Self::set_block`].
    #[must_use]
    pub fn new(air: BlockState) -> Self {
        Self {
            chunks: RwLock::new(HashMap::new()),
            air: Arc::new(air),
        }
    }

    /// The shared air state.
    #[must_use]
    pub fn air(&self) -> &Arc<BlockState> {
        &self.air
    }

    /// Check if a chunk exists at the given position.
    #[must_use]
    pub fn contains(&self, pos: ChunkPos) -> bool {
        self.chunks.read().contains_key(&pos)
    }

    /// Check if the chunk holding a block position is loaded.
    #[must_use]
    pub fn is_loaded(&self, pos: BlockPos) -> bool {
        self.contains(pos.chunk_pos())
    }

    /// Get the number of loaded chunks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chunks.read().len()
    }

    /// Check if no chunks are loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chunks.read().is_empty()
    }

    /// Insert or replace a chunk at its position.
    pub fn insert(&self, chunk: Chunk) {
        let mut chunks = self.chunks.write();
        chunks.insert(chunk.pos, chunk);
    }

    /// Remove a chunk at the given position.
    pub fn remove(&self, pos: ChunkPos) -> Option<Chunk> {
        let mut chunks = self.chunks.write();
        chunks.remove(&pos)
    }

    /// Load an all-air chunk unless one is already present.
    pub fn load_empty(&self, pos: ChunkPos) {
        let mut chunks = self.chunks.write();
        chunks
            .entry(pos)
            .or_insert_with(|| Chunk::filled(pos, Arc::clone(&self.air)));
    }

    /// Load all-air chunks covering the inclusive block range.
    pub fn load_empty_region(&self, min: BlockPos, max: BlockPos) {
        let (lo, hi) = (min.chunk_pos(), max.chunk_pos());
        for cy in lo.y..=hi.y {
            for cz in lo.z..=hi.z {
                for cx in lo.x..=hi.x {
                    self.load_empty(ChunkPos::new(cx, cy, cz));
                }
            }
        }
    }

    /// Get all loaded chunk positions.
    #[must_use]
    pub fn positions(&self) -> Vec<ChunkPos> {
        self.chunks.read().keys().copied().collect()
    }

    /// Set a block, creating an air chunk around it when needed.
    pub fn set_block(&self, pos: BlockPos, state: Arc<BlockState>) {
        let (chunk_pos, local) = pos.split();
        let mut chunks = self.chunks.write();
        chunks
            .entry(chunk_pos)
            .or_insert_with(|| Chunk::filled(chunk_pos, Arc::clone(&self.air)))
            .set(local, state);
    }

    /// Fill an inclusive box of block positions with one state.
    pub fn fill(&self, min: BlockPos, max: BlockPos, state: &Arc<BlockState>) {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    self.set_block(BlockPos::new(x, y, z), Arc::clone(state));
                }
            }
        }
    }

    /// Execute a function with read access to a chunk.
    ///
    /// Returns `None` if the chunk doesn't exist.
    pub fn with_chunk<F, R>(&self, pos: ChunkPos, f: F) -> Option<R>
    where
        F: FnOnce(&Chunk) -> R,
    {
        let chunks = self.chunks.read();
        chunks.get(&pos).map(f)
    }
}

impl BlockAccess for ChunkedWorld {
    fn block_at(&self, pos: BlockPos) -> Option<Block> {
        let (chunk_pos, local) = pos.split();
        self.with_chunk(chunk_pos, |chunk| {
            Block::new(pos, Arc::clone(chunk.get(local)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxmotion_core::BlockTypeId;

    fn world() -> ChunkedWorld {
        ChunkedWorld::new(BlockState::empty(BlockTypeId::AIR))
    }

    #[test]
    fn insert_and_remove() {
        let world = world();
        let pos = ChunkPos::new(1, 2, 3);
        world.load_empty(pos);

        assert!(world.contains(pos));
        assert_eq!(world.len(), 1);

        assert!(world.remove(pos).is_some());
        assert!(!world.contains(pos));
        assert!(world.is_empty());
    }

    #[test]
    fn unloaded_chunks_are_absent() {
        let world = world();
        assert!(world.block_at(BlockPos::new(0, 64, 0)).is_none());

        world.load_empty(BlockPos::new(0, 64, 0).chunk_pos());
        let block = world.block_at(BlockPos::new(0, 64, 0)).unwrap();
        assert_eq!(block.type_id(), BlockTypeId::AIR);
        assert!(!world.is_loaded(BlockPos::new(16, 64, 0)));
    }

    #[test]
    fn set_block_creates_chunk() {
        let world = world();
        let stone = Arc::new(BlockState::full_cube(BlockTypeId(1)));
        world.set_block(BlockPos::new(-3, 10, 40), stone);

        let block = world.block_at(BlockPos::new(-3, 10, 40)).unwrap();
        assert_eq!(block.type_id(), BlockTypeId(1));
        assert_eq!(block.position, BlockPos::new(-3, 10, 40));
        assert_eq!(world.positions(), vec![ChunkPos::new(-1, 0, 2)]);
    }

    #[test]
    fn fill_spans_chunk_borders() {
        let world = world();
        let stone = Arc::new(BlockState::full_cube(BlockTypeId(1)));
        world.fill(BlockPos::new(14, 0, 0), BlockPos::new(17, 0, 0), &stone);

        assert_eq!(world.len(), 2);
        for x in 14..=17 {
            assert_eq!(
                world.block_at(BlockPos::new(x, 0, 0)).unwrap().type_id(),
                BlockTypeId(1)
            );
        }
    }

    #[test]
    fn load_empty_region_covers_range() {
        let world = world();
        world.load_empty_region(BlockPos::new(-1, 0, -1), BlockPos::new(16, 15, 0));
        assert_eq!(world.len(), 4);
    }
}
