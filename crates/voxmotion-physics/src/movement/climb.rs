//! Ladders, vines, climbable trapdoors and scaffolding.

use glam::DVec3;
use voxmotion_core::BlockPos;
use voxmotion_world::BlockAccess;

use crate::classify::BlockCategory;
use crate::engine::PhysicsEngine;
use crate::snapshot::EntitySnapshot;

/// How an entity relates to scaffolding this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScaffoldingContact {
    None,
    /// Feet inside a scaffolding voxel
    Inside,
    /// Standing on top of a scaffolding voxel
    OnTop,
}

impl PhysicsEngine {
    /// Whether the voxel at `feet` can be climbed.
    ///
    /// Open trapdoors count when they sit on a ladder facing the same way.
    pub(crate) fn is_on_climbable<W: BlockAccess>(&self, world: &W, feet: DVec3) -> bool {
        let pos = BlockPos::containing(feet);
        let Some(block) = world.block_at(pos) else {
            return false;
        };
        match self.blocks.category(block.type_id()) {
            Some(BlockCategory::Ladder | BlockCategory::Vine) => true,
            Some(BlockCategory::Trapdoor) if self.features.climbable_trapdoor => {
                let Some(below) = world.block_at(pos.below()) else {
                    return false;
                };
                self.blocks.is(below.type_id(), BlockCategory::Ladder)
                    && block.state.flag("open")
                    && block.state.enum_property("facing") == below.state.enum_property("facing")
            }
            _ => false,
        }
    }

    pub(crate) fn scaffolding_contact<W: BlockAccess>(
        &self,
        snap: &EntitySnapshot,
        world: &W,
    ) -> ScaffoldingContact {
        let feet = BlockPos::containing(snap.position);
        let is_scaffolding = |pos: BlockPos| {
            world
                .block_at(pos)
                .is_some_and(|b| self.blocks.is(b.type_id(), BlockCategory::Scaffolding))
        };
        if is_scaffolding(feet) {
            ScaffoldingContact::Inside
        } else if snap.contacts.on_ground && is_scaffolding(feet.below()) {
            ScaffoldingContact::OnTop
        } else {
            ScaffoldingContact::None
        }
    }
}
