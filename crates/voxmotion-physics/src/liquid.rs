//! Liquid detection and water currents.

use glam::DVec3;
use voxmotion_core::{Aabb, Block, BlockPos};
use voxmotion_world::BlockAccess;

use crate::classify::BlockCategory;
use crate::engine::PhysicsEngine;
use crate::snapshot::EntitySnapshot;

/// Horizontal neighbours, in the order flow is accumulated.
const NEIGHBOURS: [(i32, i32); 4] = [(0, 1), (-1, 0), (0, -1), (1, 0)];

/// Metadata at and above which water is falling.
const FALLING_WATER: u8 = 8;

fn voxels(bb: &Aabb) -> impl Iterator<Item = BlockPos> {
    let min = BlockPos::containing(bb.min);
    let max = BlockPos::containing(bb.max);
    (min.y..=max.y).flat_map(move |y| {
        (min.z..=max.z).flat_map(move |z| (min.x..=max.x).map(move |x| BlockPos::new(x, y, z)))
    })
}

impl PhysicsEngine {
    /// Water depth as drawn: 0 for sources, falling water and anything
    /// holding water, the level for flowing water, -1 when not water.
    #[must_use]
    pub fn rendered_depth(&self, block: Option<&Block>) -> i32 {
        let Some(block) = block else {
            return -1;
        };
        let category = self.blocks.category(block.type_id());
        if category.is_some_and(BlockCategory::is_water_like) || block.state.waterlogged {
            return 0;
        }
        if category != Some(BlockCategory::Water) {
            return -1;
        }
        match block.metadata() {
            m if m >= FALLING_WATER => 0,
            m => i32::from(m),
        }
    }

    /// Fraction of the voxel filled by water, from its rendered depth.
    fn liquid_height_percent(depth: i32) -> f64 {
        f64::from(depth + 1) / 9.0
    }

    /// Water voxels overlapping `bb` whose surface reaches the box.
    pub(crate) fn water_in_box<W: BlockAccess>(&self, world: &W, bb: &Aabb) -> Vec<Block> {
        let top = bb.max.y.ceil();
        voxels(bb)
            .filter_map(|pos| world.block_at(pos))
            .filter(|block| {
                let depth = self.rendered_depth(Some(block));
                depth >= 0
                    && top >= f64::from(block.position.y) + 1.0 - Self::liquid_height_percent(depth)
            })
            .collect()
    }

    fn lava_in_box<W: BlockAccess>(&self, world: &W, bb: &Aabb) -> bool {
        voxels(bb).any(|pos| {
            world
                .block_at(pos)
                .is_some_and(|b| self.blocks.is(b.type_id(), BlockCategory::Lava))
        })
    }

    /// Unit direction water in `block` pushes towards, or zero.
    #[must_use]
    pub fn flow<W: BlockAccess>(&self, world: &W, block: &Block) -> DVec3 {
        let pos = block.position;
        let own = self.rendered_depth(Some(block));
        let mut flow = DVec3::ZERO;

        for (dx, dz) in NEIGHBOURS {
            let adjacent = world.block_at(pos.offset(dx, 0, dz));
            let adjacent_depth = self.rendered_depth(adjacent.as_ref());
            let strength = if adjacent_depth >= 0 {
                Some(adjacent_depth - own)
            } else if adjacent.is_some_and(|b| b.state.is_solid()) {
                let below = world.block_at(pos.offset(dx, -1, dz));
                let below_depth = self.rendered_depth(below.as_ref());
                (below_depth >= 0).then(|| below_depth - (own - 8))
            } else {
                None
            };
            if let Some(f) = strength {
                flow.x += f64::from(dx * f);
                flow.z += f64::from(dz * f);
            }
        }

        if block.metadata() >= FALLING_WATER {
            let solid = |p: BlockPos| world.block_at(p).is_some_and(|b| b.state.is_solid());
            for (dx, dz) in NEIGHBOURS {
                if solid(pos.offset(dx, 0, dz)) || solid(pos.offset(dx, 1, dz)) {
                    flow = flow.normalize_or_zero() + DVec3::new(0.0, -6.0, 0.0);
                }
            }
        }

        flow.normalize_or_zero()
    }

    /// Detect water in `bb` and push `velocity` along the summed current.
    pub(crate) fn apply_water_current<W: BlockAccess>(
        &self,
        world: &W,
        bb: &Aabb,
        velocity: &mut DVec3,
    ) -> bool {
        let water = self.water_in_box(world, bb);
        let current: DVec3 = water.iter().map(|block| self.flow(world, block)).sum();
        let len = current.length();
        if len > 0.0 {
            *velocity += current / len * self.constants.water_current;
        }
        !water.is_empty()
    }

    /// Refresh the in-water and in-lava flags, applying water currents.
    pub(crate) fn detect_liquids<W: BlockAccess>(&self, snap: &mut EntitySnapshot, world: &W) {
        let bb = self.hitbox(snap);
        let water_box = bb.contract(0.001, 0.401, 0.001);
        let lava_box = bb.contract(0.1, 0.4, 0.1);
        snap.contacts.in_water = self.apply_water_current(world, &water_box, &mut snap.velocity);
        snap.contacts.in_lava = self.lava_in_box(world, &lava_box);
    }

    /// Whether the head is below a water voxel, for swimming.
    pub(crate) fn water_above_head<W: BlockAccess>(&self, world: &W, feet: DVec3) -> bool {
        let eye = BlockPos::containing(feet + DVec3::new(0.0, 0.9, 0.0));
        self.rendered_depth(world.block_at(eye.above()).as_ref()) >= 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::sync::Arc;
    use voxmotion_test::{blocks, fixture_registry, SceneBuilder};

    fn engine() -> PhysicsEngine {
        PhysicsEngine::new(&fixture_registry("1.20.4")).unwrap()
    }

    fn block(pos: BlockPos, state: voxmotion_core::BlockState) -> Block {
        Block::new(pos, Arc::new(state))
    }

    #[test]
    fn rendered_depths() {
        let engine = engine();
        let at = BlockPos::new(0, 0, 0);
        assert_eq!(engine.rendered_depth(None), -1);
        assert_eq!(engine.rendered_depth(Some(&block(at, blocks::stone()))), -1);
        assert_eq!(engine.rendered_depth(Some(&block(at, blocks::water(0)))), 0);
        assert_eq!(engine.rendered_depth(Some(&block(at, blocks::water(3)))), 3);
        assert_eq!(engine.rendered_depth(Some(&block(at, blocks::water(9)))), 0);
        assert_eq!(engine.rendered_depth(Some(&block(at, blocks::flowing_water(5)))), 5);
        assert_eq!(engine.rendered_depth(Some(&block(at, blocks::seagrass()))), 0);
        assert_eq!(engine.rendered_depth(Some(&block(at, blocks::bubble_column(true)))), 0);
        assert_eq!(
            engine.rendered_depth(Some(&block(at, blocks::ladder("north").waterlogged()))),
            0
        );
        assert_eq!(engine.rendered_depth(Some(&block(at, blocks::lava(0)))), -1);
    }

    #[test]
    fn still_source_has_no_current() {
        let engine = engine();
        let world = SceneBuilder::new().pool(30, 4, 3).build();
        let source = world_block(&world, BlockPos::new(0, 31, 0));
        assert_eq!(engine.flow(&world, &source), DVec3::ZERO);

        let mut velocity = DVec3::ZERO;
        let bb = Aabb::from_array([0.2, 31.0, 0.2, 0.8, 32.8, 0.8]).contract(0.001, 0.401, 0.001);
        assert!(engine.apply_water_current(&world, &bb, &mut velocity));
        assert_eq!(velocity, DVec3::ZERO);
    }

    #[test]
    fn flowing_water_pushes_downstream() {
        let engine = engine();
        let world = SceneBuilder::new()
            .floor(30, 4, blocks::stone())
            .block(BlockPos::new(-1, 31, 0), blocks::water(0))
            .block(BlockPos::new(0, 31, 0), blocks::water(1))
            .block(BlockPos::new(1, 31, 0), blocks::water(2))
            .build();
        let middle = world_block(&world, BlockPos::new(0, 31, 0));
        let flow = engine.flow(&world, &middle);
        // Depth grows towards +X: (-1)(0 - 1) + (1)(2 - 1) = 2 along X
        assert_relative_eq!(flow.x, 1.0);
        assert_relative_eq!(flow.z, 0.0);

        let mut velocity = DVec3::ZERO;
        let bb = Aabb::from_array([0.2, 31.0, 0.2, 0.8, 32.8, 0.8]).contract(0.001, 0.401, 0.001);
        assert!(engine.apply_water_current(&world, &bb, &mut velocity));
        assert_relative_eq!(velocity.x, 0.014);
    }

    #[test]
    fn falling_water_pulls_down_beside_walls() {
        let engine = engine();
        let world = SceneBuilder::new()
            .block(BlockPos::new(0, 40, 0), blocks::water(8))
            .block(BlockPos::new(1, 40, 0), blocks::stone())
            .build();
        let falling = world_block(&world, BlockPos::new(0, 40, 0));
        let flow = engine.flow(&world, &falling);
        assert_relative_eq!(flow.y, -1.0);
    }

    #[test]
    fn water_surface_must_reach_the_box() {
        let engine = engine();
        let world = SceneBuilder::new()
            .block(BlockPos::new(0, 40, 0), blocks::water(7))
            .build();
        let dipping = Aabb::from_array([0.2, 39.0, 0.2, 0.8, 40.05, 0.8]);
        assert_eq!(engine.water_in_box(&world, &dipping).len(), 1);
        // Touching the voxel floor scans it, but the surface sits at 41 - 8/9
        let touching = Aabb::from_array([0.2, 38.5, 0.2, 0.8, 40.0, 0.8]);
        assert!(engine.water_in_box(&world, &touching).is_empty());
    }

    #[test]
    fn detects_lava_and_water() {
        let engine = engine();
        let world = SceneBuilder::new()
            .block(BlockPos::new(0, 40, 0), blocks::lava(0))
            .block(BlockPos::new(4, 40, 0), blocks::water(0))
            .build();
        let mut snap = EntitySnapshot::new(DVec3::new(0.5, 40.0, 0.5));
        engine.detect_liquids(&mut snap, &world);
        assert!(snap.contacts.in_lava);
        assert!(!snap.contacts.in_water);

        let mut snap = EntitySnapshot::new(DVec3::new(4.5, 40.0, 0.5));
        engine.detect_liquids(&mut snap, &world);
        assert!(snap.contacts.in_water);
        assert!(!snap.contacts.in_lava);
    }

    fn world_block(world: &voxmotion_world::ChunkedWorld, pos: BlockPos) -> Block {
        world.block_at(pos).unwrap()
    }
}
