//! Small hand-built worlds.

use std::sync::Arc;

use voxmotion_core::{BlockPos, BlockState};
use voxmotion_world::ChunkedWorld;

use crate::blocks;

/// Half extent of the loaded area around the origin, in blocks.
pub const LOADED_RADIUS: i32 = 32;

/// Builder for a [`ChunkedWorld`] with an air-filled area loaded around the
/// origin (x and z in `-32..32`, y in `-16..80`).
pub struct SceneBuilder {
    world: ChunkedWorld,
}

impl Default for SceneBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneBuilder {
    #[must_use]
    pub fn new() -> Self {
        let world = ChunkedWorld::new(blocks::air());
        world.load_empty_region(
            BlockPos::new(-LOADED_RADIUS, -16, -LOADED_RADIUS),
            BlockPos::new(LOADED_RADIUS - 1, 79, LOADED_RADIUS - 1),
        );
        Self { world }
    }

    /// Place a single block.
    #[must_use]
    pub fn block(self, pos: BlockPos, state: BlockState) -> Self {
        self.world.set_block(pos, Arc::new(state));
        self
    }

    /// Fill an inclusive box.
    #[must_use]
    pub fn fill(self, min: BlockPos, max: BlockPos, state: BlockState) -> Self {
        self.world.fill(min, max, &Arc::new(state));
        self
    }

    /// A horizontal layer at `y` spanning `-radius..=radius` on x and z.
    #[must_use]
    pub fn floor(self, y: i32, radius: i32, state: BlockState) -> Self {
        self.fill(
            BlockPos::new(-radius, y, -radius),
            BlockPos::new(radius, y, radius),
            state,
        )
    }

    /// A stone floor at `y` covering the whole loaded area.
    #[must_use]
    pub fn stone_floor(self, y: i32) -> Self {
        self.floor(y, LOADED_RADIUS - 1, blocks::stone())
    }

    /// A pool of still water: stone bed at `bed_y`, water from `bed_y + 1`
    /// up to `bed_y + depth`.
    #[must_use]
    pub fn pool(self, bed_y: i32, radius: i32, depth: i32) -> Self {
        self.floor(bed_y, radius, blocks::stone()).fill(
            BlockPos::new(-radius, bed_y + 1, -radius),
            BlockPos::new(radius, bed_y + depth, radius),
            blocks::water(0),
        )
    }

    /// A vertical ladder column of `height` blocks starting at `base`.
    #[must_use]
    pub fn ladder(self, base: BlockPos, height: i32, facing: &str) -> Self {
        self.fill(base, base.offset(0, height - 1, 0), blocks::ladder(facing))
    }

    /// A scaffolding tower of `height` blocks; the lowest one is supported.
    #[must_use]
    pub fn scaffolding(self, base: BlockPos, height: i32) -> Self {
        self.fill(base, base.offset(0, height - 1, 0), blocks::scaffolding(false))
    }

    #[must_use]
    pub fn build(self) -> ChunkedWorld {
        self.world
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids;
    use voxmotion_core::BlockTypeId;
    use voxmotion_world::BlockAccess;

    #[test]
    fn loaded_area_is_air() {
        let world = SceneBuilder::new().build();
        let block = world.block_at(BlockPos::new(5, 60, -5)).unwrap();
        assert_eq!(block.type_id(), BlockTypeId::AIR);
        assert!(world.block_at(BlockPos::new(200, 60, 0)).is_none());
    }

    #[test]
    fn pool_has_bed_and_water() {
        let world = SceneBuilder::new().pool(10, 3, 2).build();
        assert_eq!(
            world.block_at(BlockPos::new(0, 10, 0)).unwrap().type_id(),
            BlockTypeId(ids::STONE)
        );
        assert_eq!(
            world.block_at(BlockPos::new(3, 12, -3)).unwrap().type_id(),
            BlockTypeId(ids::WATER)
        );
        assert_eq!(
            world.block_at(BlockPos::new(0, 13, 0)).unwrap().type_id(),
            BlockTypeId::AIR
        );
    }
}
