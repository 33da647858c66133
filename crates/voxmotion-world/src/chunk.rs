//! Chunk data structure for voxel world storage.

use std::sync::Arc;

use voxmotion_core::constants::CHUNK_SIZE_CUBED;
use voxmotion_core::coords::{ChunkPos, LocalPos};
use voxmotion_core::BlockState;

/// A single chunk of voxel data (16x16x16 voxels).
///
/// Voxels store an index into a per-chunk palette of shared block states.
pub struct Chunk {
    /// Position in chunk coordinates.
    pub pos: ChunkPos,
    /// Distinct block states used by this chunk.
    palette: Vec<Arc<BlockState>>,
    /// Palette index per voxel, see [`LocalPos::to_index`].
    voxels: Box<[u16]>,
}

impl Chunk {
    /// Create a chunk filled with a single state.
    #[must_use]
    pub fn filled(pos: ChunkPos, state: Arc<BlockState>) -> Self {
        Self {
            pos,
            palette: vec![state],
            voxels: vec![0; CHUNK_SIZE_CUBED].into_boxed_slice(),
        }
    }

    /// Block state at a local position.
    #[must_use]
    pub fn get(&self, local: LocalPos) -> &Arc<BlockState> {
        &self.palette[usize::from(self.voxels[local.to_index()])]
    }

    /// Replace the block state at a local position.
    pub fn set(&mut self, local: LocalPos, state: Arc<BlockState>) {
        let index = self.palette_index(state);
        self.voxels[local.to_index()] = index;
    }

    /// Number of distinct states referenced by the palette.
    #[must_use]
    pub fn palette_len(&self) -> usize {
        self.palette.len()
    }

    /// Check if every voxel uses the given state.
    #[must_use]
    pub fn is_uniform(&self, state: &BlockState) -> bool {
        self.voxels
            .iter()
            .all(|&i| *self.palette[usize::from(i)] == *state)
    }

    fn palette_index(&mut self, state: Arc<BlockState>) -> u16 {
        if let Some(i) = self
            .palette
            .iter()
            .position(|p| Arc::ptr_eq(p, &state) || **p == *state)
        {
            #[allow(clippy::cast_possible_truncation)]
            return i as u16;
        }
        self.palette.push(state);
        #[allow(clippy::cast_possible_truncation)]
        let index = (self.palette.len() - 1) as u16;
        index
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxmotion_core::BlockTypeId;

    fn air() -> Arc<BlockState> {
        Arc::new(BlockState::empty(BlockTypeId::AIR))
    }

    #[test]
    fn new_chunk_is_uniform() {
        let chunk = Chunk::filled(ChunkPos::new(0, 0, 0), air());
        assert!(chunk.is_uniform(&BlockState::empty(BlockTypeId::AIR)));
        assert_eq!(chunk.palette_len(), 1);
    }

    #[test]
    fn set_and_get() {
        let mut chunk = Chunk::filled(ChunkPos::new(0, 0, 0), air());
        let stone = Arc::new(BlockState::full_cube(BlockTypeId(1)));
        let local = LocalPos::new(3, 4, 5);

        chunk.set(local, Arc::clone(&stone));

        assert_eq!(chunk.get(local).type_id, BlockTypeId(1));
        assert_eq!(chunk.get(LocalPos::new(0, 0, 0)).type_id, BlockTypeId::AIR);
        assert!(!chunk.is_uniform(&BlockState::empty(BlockTypeId::AIR)));
    }

    #[test]
    fn equal_states_share_a_palette_entry() {
        let mut chunk = Chunk::filled(ChunkPos::new(0, 0, 0), air());
        chunk.set(LocalPos::new(0, 0, 0), Arc::new(BlockState::full_cube(BlockTypeId(1))));
        chunk.set(LocalPos::new(1, 0, 0), Arc::new(BlockState::full_cube(BlockTypeId(1))));
        assert_eq!(chunk.palette_len(), 2);
    }
}
