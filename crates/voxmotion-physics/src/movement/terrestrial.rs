//! Walking, falling and climbing.

use voxmotion_core::{clamp, BlockPos};
use voxmotion_world::BlockAccess;

use super::climb::ScaffoldingContact;
use crate::attribute::{
    Attribute, ModifierOperation, SLOWNESS_MODIFIER, SNEAK_MODIFIER, SPEED_MODIFIER, SPRINT_MODIFIER,
};
use crate::engine::PhysicsEngine;
use crate::snapshot::EntitySnapshot;

impl PhysicsEngine {
    /// Movement speed for this tick. The attribute is rebuilt from the
    /// base speed with only the effect, sprint and sneak modifiers, and the
    /// result replaces the snapshot's attribute.
    fn effective_speed(&self, snap: &mut EntitySnapshot) -> f64 {
        let c = &self.constants;
        let level = |l: u8| (l > 0).then_some(f64::from(l));
        let mut speed = Attribute::new(c.player_speed);
        speed.toggle_modifier(
            SPEED_MODIFIER,
            level(snap.effects.speed).map(|l| l * c.speed_effect),
            ModifierOperation::MultiplyTotal,
        );
        speed.toggle_modifier(
            SLOWNESS_MODIFIER,
            level(snap.effects.slowness).map(|l| l * c.slowness_effect),
            ModifierOperation::MultiplyTotal,
        );
        speed.toggle_modifier(
            SPRINT_MODIFIER,
            snap.is_sprinting().then_some(c.sprint_speed),
            ModifierOperation::MultiplyTotal,
        );
        speed.toggle_modifier(
            SNEAK_MODIFIER,
            (snap.is_sneaking() || snap.crawling).then_some(c.sneak_speed),
            ModifierOperation::MultiplyTotal,
        );
        let value = speed.value();
        snap.movement_speed = speed;
        value
    }

    pub(super) fn travel_on_land<W: BlockAccess>(
        &self,
        snap: &mut EntitySnapshot,
        world: &W,
        strafe: f64,
        forward: f64,
        gravity_multiplier: f64,
    ) {
        let c = &self.constants;
        let under = world.block_at(BlockPos::containing(snap.position).below());

        let (acceleration, inertia) = match under {
            Some(block) if snap.contacts.on_ground => {
                let slipperiness = self
                    .blocks
                    .slipperiness(block.type_id())
                    .unwrap_or(c.default_slipperiness);
                let inertia = slipperiness * c.airborne_inertia;
                let acceleration =
                    self.effective_speed(snap) * (c.ground_acceleration / inertia.powi(3));
                (acceleration.max(0.0), inertia)
            }
            _ => {
                let mut acceleration = c.airborne_acceleration;
                if snap.is_sprinting() {
                    acceleration += c.sprint_air_acceleration;
                }
                (acceleration, c.airborne_inertia)
            }
        };

        Self::apply_heading(snap, strafe, forward, acceleration);

        if self.is_on_climbable(world, snap.position) {
            let max = c.ladder_max_speed;
            snap.velocity.x = clamp(-max, snap.velocity.x, max);
            snap.velocity.z = clamp(-max, snap.velocity.z, max);
            let floor = if snap.is_sneaking() { 0.0 } else { -max };
            snap.velocity.y = snap.velocity.y.max(floor);
        }

        let mut descending = false;
        let contact = self.scaffolding_contact(snap, world);
        if contact != ScaffoldingContact::None {
            let max = c.ladder_max_speed;
            snap.velocity.x = clamp(-max, snap.velocity.x, max);
            snap.velocity.z = clamp(-max, snap.velocity.z, max);
        }
        match contact {
            ScaffoldingContact::Inside => {
                if snap.wants_jump() {
                    snap.velocity.y = c.scaffolding_climb_speed;
                } else if snap.is_sneaking() {
                    snap.velocity.y = -c.scaffolding_descend_speed;
                    descending = true;
                } else {
                    snap.velocity.y = snap.velocity.y.max(-c.scaffolding_descend_speed);
                }
            }
            ScaffoldingContact::OnTop if snap.is_sneaking() => {
                snap.velocity.y = -c.scaffolding_descend_speed;
                descending = true;
            }
            _ => {}
        }

        let delta = snap.velocity;
        self.move_entity(snap, world, delta, descending);

        if self.is_on_climbable(world, snap.position)
            && (snap.contacts.collided_horizontally
                || (self.features.climb_using_jump && snap.wants_jump()))
        {
            snap.velocity.y = c.ladder_climb_speed;
        }

        if snap.effects.levitation > 0 {
            let target = c.levitation_speed * f64::from(snap.effects.levitation);
            snap.velocity.y += (target - snap.velocity.y) * 0.2;
        } else {
            snap.velocity.y -= c.gravity * gravity_multiplier;
        }
        snap.velocity.y *= c.air_drag;
        snap.velocity.x *= inertia;
        snap.velocity.z *= inertia;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribute::AttributeModifier;
    use crate::snapshot::Controls;
    use approx::assert_relative_eq;
    use glam::DVec3;
    use voxmotion_test::{blocks, fixture_registry, SceneBuilder};

    fn engine() -> PhysicsEngine {
        PhysicsEngine::new(&fixture_registry("1.20.4")).unwrap()
    }

    fn grounded(x: f64, y: f64, z: f64) -> EntitySnapshot {
        let mut snap = EntitySnapshot::new(DVec3::new(x, y, z));
        snap.contacts.on_ground = true;
        snap
    }

    #[test]
    fn sprinting_is_thirty_percent_faster() {
        let engine = engine();
        let world = SceneBuilder::new().stone_floor(63).build();

        let mut walk = grounded(0.5, 64.0, 0.5);
        engine.travel_on_land(&mut walk, &world, 0.0, 0.98, 1.0);
        let mut sprint = grounded(0.5, 64.0, 0.5);
        sprint.controls = Controls::SPRINT;
        engine.travel_on_land(&mut sprint, &world, 0.0, 0.98, 1.0);

        assert!(walk.velocity.z < 0.0);
        assert_relative_eq!(sprint.velocity.z / walk.velocity.z, 1.3, epsilon = 1e-9);
    }

    #[test]
    fn speed_effect_scales_ground_acceleration() {
        let engine = engine();
        let world = SceneBuilder::new().stone_floor(63).build();

        let mut plain = grounded(0.5, 64.0, 0.5);
        engine.travel_on_land(&mut plain, &world, 0.0, 0.98, 1.0);
        let mut fast = grounded(0.5, 64.0, 0.5);
        fast.effects.speed = 2;
        engine.travel_on_land(&mut fast, &world, 0.0, 0.98, 1.0);

        assert_relative_eq!(fast.velocity.z / plain.velocity.z, 1.4, epsilon = 1e-9);
        assert!(fast.movement_speed.has_modifier(SPEED_MODIFIER));
        assert!(!plain.movement_speed.has_modifier(SPEED_MODIFIER));
    }

    #[test]
    fn ground_speed_ignores_the_incoming_attribute() {
        let engine = engine();
        let world = SceneBuilder::new().stone_floor(63).build();

        let mut plain = grounded(0.5, 64.0, 0.5);
        engine.travel_on_land(&mut plain, &world, 0.0, 0.98, 1.0);

        let mut tampered = grounded(0.5, 64.0, 0.5);
        tampered.movement_speed = Attribute::new(0.5);
        tampered.movement_speed.set_modifier(AttributeModifier::new(
            uuid::Uuid::from_u128(7),
            1.0,
            ModifierOperation::MultiplyTotal,
        ));
        engine.travel_on_land(&mut tampered, &world, 0.0, 0.98, 1.0);

        assert_relative_eq!(tampered.velocity.z, plain.velocity.z, epsilon = 1e-15);
        assert_relative_eq!(tampered.movement_speed.base, 0.1);
        assert!(tampered.movement_speed.modifiers.is_empty());
    }

    #[test]
    fn crawling_is_as_slow_as_sneaking() {
        let engine = engine();
        let world = SceneBuilder::new().stone_floor(63).build();

        let mut walk = grounded(0.5, 64.0, 0.5);
        engine.travel_on_land(&mut walk, &world, 0.0, 0.98, 1.0);
        let mut crawl = grounded(0.5, 64.0, 0.5);
        crawl.crawling = true;
        engine.travel_on_land(&mut crawl, &world, 0.0, 0.98, 1.0);

        assert_relative_eq!(crawl.velocity.z / walk.velocity.z, 0.3, epsilon = 1e-9);
    }

    #[test]
    fn ice_keeps_momentum() {
        let engine = engine();
        let stone = SceneBuilder::new().stone_floor(63).build();
        let ice = SceneBuilder::new().floor(63, 4, blocks::packed_ice()).build();

        let mut on_stone = grounded(0.5, 64.0, 0.5);
        on_stone.velocity.x = 0.2;
        engine.travel_on_land(&mut on_stone, &stone, 0.0, 0.0, 1.0);
        let mut on_ice = grounded(0.5, 64.0, 0.5);
        on_ice.velocity.x = 0.2;
        engine.travel_on_land(&mut on_ice, &ice, 0.0, 0.0, 1.0);

        assert_relative_eq!(on_stone.velocity.x, 0.2 * 0.6 * 0.91, epsilon = 1e-12);
        assert_relative_eq!(on_ice.velocity.x, 0.2 * 0.98 * 0.91, epsilon = 1e-12);
    }

    #[test]
    fn slow_falling_and_levitation() {
        let engine = engine();
        let world = SceneBuilder::new().build();
        let drag = engine.constants().air_drag;

        let mut slow = EntitySnapshot::new(DVec3::new(0.5, 40.0, 0.5));
        engine.travel_on_land(&mut slow, &world, 0.0, 0.0, 0.125);
        assert_relative_eq!(slow.velocity.y, -0.01 * drag, epsilon = 1e-12);

        let mut floating = EntitySnapshot::new(DVec3::new(0.5, 40.0, 0.5));
        floating.effects.levitation = 1;
        engine.travel_on_land(&mut floating, &world, 0.0, 0.0, 1.0);
        assert_relative_eq!(floating.velocity.y, 0.01 * drag, epsilon = 1e-12);
    }

    #[test]
    fn pushing_into_a_ladder_climbs() {
        let engine = engine();
        let world = SceneBuilder::new()
            .ladder(BlockPos::new(0, 40, 0), 4, "north")
            .build();
        let mut snap = EntitySnapshot::new(DVec3::new(0.5, 40.0, 0.5));
        snap.velocity.z = 0.1;
        engine.travel_on_land(&mut snap, &world, 0.0, 0.0, 1.0);

        assert!(snap.contacts.collided_horizontally);
        assert_relative_eq!(snap.position.z, 0.5125, epsilon = 1e-9);
        let drag = engine.constants().air_drag;
        assert_relative_eq!(snap.velocity.y, (0.2 - 0.08) * drag, epsilon = 1e-12);
    }

    #[test]
    fn jump_climbs_without_a_wall() {
        let engine = engine();
        let world = SceneBuilder::new().block(BlockPos::new(0, 40, 0), blocks::vine()).build();
        let mut snap = EntitySnapshot::new(DVec3::new(0.5, 40.0, 0.5));
        snap.controls = Controls::JUMP;
        engine.travel_on_land(&mut snap, &world, 0.0, 0.0, 1.0);
        let drag = engine.constants().air_drag;
        assert_relative_eq!(snap.velocity.y, (0.2 - 0.08) * drag, epsilon = 1e-12);

        let legacy = PhysicsEngine::new(&fixture_registry("1.12.2")).unwrap();
        let mut snap = EntitySnapshot::new(DVec3::new(0.5, 40.0, 0.5));
        snap.controls = Controls::JUMP;
        legacy.travel_on_land(&mut snap, &world, 0.0, 0.0, 1.0);
        assert!(snap.velocity.y < 0.0);
    }

    #[test]
    fn sneaking_holds_position_on_a_ladder() {
        let engine = engine();
        let world = SceneBuilder::new()
            .ladder(BlockPos::new(0, 40, 0), 4, "north")
            .build();
        let mut snap = EntitySnapshot::new(DVec3::new(0.5, 41.0, 0.5));
        snap.controls = Controls::SNEAK;
        snap.velocity.y = -0.5;
        engine.travel_on_land(&mut snap, &world, 0.0, 0.0, 1.0);
        assert_relative_eq!(snap.position.y, 41.0);
    }

    #[test]
    fn sneaking_descends_scaffolding() {
        let engine = engine();
        let world = SceneBuilder::new()
            .scaffolding(BlockPos::new(0, 40, 0), 2)
            .build();
        let mut snap = grounded(0.5, 42.0, 0.5);
        snap.controls = Controls::SNEAK;
        engine.travel_on_land(&mut snap, &world, 0.0, 0.0, 1.0);
        assert_relative_eq!(snap.position.y, 41.85, epsilon = 1e-12);
        assert!(!snap.contacts.on_ground);
    }

    #[test]
    fn standing_on_scaffolding_clamps_horizontal_speed() {
        let engine = engine();
        let world = SceneBuilder::new()
            .scaffolding(BlockPos::new(0, 40, 0), 2)
            .build();
        let mut snap = grounded(0.5, 42.0, 0.5);
        snap.velocity.x = 0.4;
        engine.travel_on_land(&mut snap, &world, 0.0, 0.0, 1.0);
        assert_relative_eq!(snap.position.x, 0.65, epsilon = 1e-12);
        assert_relative_eq!(snap.position.y, 42.0, epsilon = 1e-12);
    }

    #[test]
    fn jumping_climbs_scaffolding() {
        let engine = engine();
        let world = SceneBuilder::new()
            .scaffolding(BlockPos::new(0, 40, 0), 3)
            .build();
        let mut snap = EntitySnapshot::new(DVec3::new(0.5, 40.3, 0.5));
        snap.controls = Controls::JUMP;
        engine.travel_on_land(&mut snap, &world, 0.0, 0.0, 1.0);
        assert_relative_eq!(snap.position.y, 40.5, epsilon = 1e-12);
    }
}
