//! Jump input handling.

use std::f64::consts::PI;

use glam::DVec3;
use voxmotion_world::BlockAccess;

use crate::classify::BlockCategory;
use crate::engine::PhysicsEngine;
use crate::snapshot::EntitySnapshot;

impl PhysicsEngine {
    /// Apply jump input: swim up in liquids, leap off the ground when the
    /// cooldown has run out. Crawling entities cannot jump.
    pub(crate) fn handle_jump<W: BlockAccess>(&self, snap: &mut EntitySnapshot, world: &W) {
        let c = &self.constants;
        let requested = snap.wants_jump() || snap.jump_queued;
        snap.jump_queued = false;
        if snap.crawling {
            return;
        }
        if !requested {
            snap.jump_ticks = 0;
            return;
        }

        snap.jump_ticks = snap.jump_ticks.saturating_sub(1);
        if snap.contacts.in_liquid() {
            snap.velocity.y += c.liquid_jump;
        } else if snap.contacts.on_ground && snap.jump_ticks == 0 {
            let on_honey = self
                .block_underfoot(world, snap.position)
                .is_some_and(|b| self.blocks.is(b.type_id(), BlockCategory::Honey));
            let factor = if on_honey { c.honey_jump_speed } else { 1.0 };
            snap.velocity.y =
                c.jump_impulse * factor + c.jump_boost * f64::from(snap.effects.jump_boost);
            if snap.is_sprinting() {
                let yaw = PI - snap.yaw;
                snap.velocity += DVec3::new(-yaw.sin(), 0.0, yaw.cos()) * c.sprint_jump_speed;
            }
            snap.jump_ticks = c.jump_cooldown;
        }
    }
}
