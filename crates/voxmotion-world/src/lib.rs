//! Chunked voxel storage and world access for the voxmotion simulation.
//!
//! The physics engine only ever sees the [`BlockAccess`] trait. Lookups must
//! be synchronous and cheap: a single tick can touch dozens of voxels, several
//! times over when a step-up evaluates two candidate sweeps.

pub mod chunk;
pub mod generation;
pub mod world;

pub use chunk::Chunk;
pub use generation::{TerrainConfig, TerrainGenerator, TerrainPalette};
pub use world::ChunkedWorld;

use voxmotion_core::{Block, BlockPos};

/// Synchronous voxel lookup.
///
/// Returns `None` when the chunk holding `pos` is not available. Air is a
/// present block without collision shapes.
pub trait BlockAccess {
    /// Block at an integer voxel position.
    fn block_at(&self, pos: BlockPos) -> Option<Block>;
}

impl<T: BlockAccess + ?Sized> BlockAccess for &T {
    fn block_at(&self, pos: BlockPos) -> Option<Block> {
        (**self).block_at(pos)
    }
}
