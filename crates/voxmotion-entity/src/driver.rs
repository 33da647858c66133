//! Runs the physics engine over every simulated entity in a world.

use voxmotion_data::Registry;
use voxmotion_physics::{
    Controls, EffectLevels, EntitySnapshot, PhysicsEngine, Result, TickOutcome,
};
use voxmotion_world::BlockAccess;

use crate::ids::{EffectIds, EquipmentIds};
use crate::{ActiveEffects, Body, Equipment, Look, Pose};

/// Counts from one [`PhysicsDriver::tick`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub advanced: usize,
    /// Entities whose surroundings were not loaded
    pub skipped: usize,
}

/// Marshals entities into snapshots, simulates them, and writes the results
/// back.
#[derive(Debug, Clone)]
pub struct PhysicsDriver {
    engine: PhysicsEngine,
    effects: EffectIds,
    equipment: EquipmentIds,
}

impl PhysicsDriver {
    pub fn new(registry: &Registry) -> Result<Self> {
        Ok(Self::with_engine(PhysicsEngine::new(registry)?, registry))
    }

    /// Drive a preconfigured engine.
    #[must_use]
    pub fn with_engine(engine: PhysicsEngine, registry: &Registry) -> Self {
        Self {
            engine,
            effects: EffectIds::resolve(registry),
            equipment: EquipmentIds::resolve(registry),
        }
    }

    #[must_use]
    pub const fn engine(&self) -> &PhysicsEngine {
        &self.engine
    }

    /// Advance every entity that has a [`Body`] and a [`Look`] by one tick.
    pub fn tick<W: BlockAccess>(&self, entities: &mut hecs::World, world: &W) -> TickReport {
        let mut report = TickReport::default();
        for (entity, (body, look, pose, controls, effects, equipment)) in entities
            .query_mut::<(
                &mut Body,
                &Look,
                Option<&Pose>,
                Option<&Controls>,
                Option<&ActiveEffects>,
                Option<&Equipment>,
            )>()
        {
            let mut snap = self.snapshot(body, look, pose, controls, effects, equipment);
            match self.engine.simulate(&mut snap, world) {
                TickOutcome::Advanced => {
                    Self::write_back(body, snap);
                    report.advanced += 1;
                }
                TickOutcome::Skipped => {
                    tracing::trace!(?entity, "Entity outside loaded world");
                    report.skipped += 1;
                }
            }
        }
        report
    }

    fn snapshot(
        &self,
        body: &Body,
        look: &Look,
        pose: Option<&Pose>,
        controls: Option<&Controls>,
        effects: Option<&ActiveEffects>,
        equipment: Option<&Equipment>,
    ) -> EntitySnapshot {
        let pose = pose.copied().unwrap_or_default();
        let ids = &self.effects;
        let effect_levels = effects.map_or_else(EffectLevels::default, |e| EffectLevels {
            jump_boost: e.level(ids.jump_boost),
            speed: e.level(ids.speed),
            slowness: e.level(ids.slowness),
            dolphins_grace: e.level(ids.dolphins_grace),
            slow_falling: e.level(ids.slow_falling),
            levitation: e.level(ids.levitation),
        });
        let chest = equipment.and_then(|e| e.chest.as_ref());
        let feet = equipment.and_then(|e| e.feet.as_ref());

        let mut snap = EntitySnapshot::new(body.position);
        snap.velocity = body.velocity;
        snap.yaw = look.yaw;
        snap.pitch = look.pitch;
        snap.crawling = pose.crawling;
        snap.swimming = pose.swimming;
        snap.contacts = body.contacts;
        snap.elytra_flying = body.elytra_flying;
        snap.jump_queued = body.jump_queued;
        snap.jump_ticks = body.jump_ticks;
        snap.firework_ticks = body.firework_ticks;
        snap.controls = controls.copied().unwrap_or_default();
        snap.movement_speed = body.movement_speed.clone();
        snap.effects = effect_levels;
        snap.depth_strider = feet.map_or(0, |boots| boots.enchantment(self.equipment.depth_strider));
        snap.elytra_equipped = chest
            .zip(self.equipment.elytra)
            .is_some_and(|(item, elytra)| item.item == elytra);
        snap
    }

    fn write_back(body: &mut Body, snap: EntitySnapshot) {
        body.position = snap.position;
        body.velocity = snap.velocity;
        body.contacts = snap.contacts;
        body.elytra_flying = snap.elytra_flying;
        body.jump_queued = snap.jump_queued;
        body.jump_ticks = snap.jump_ticks;
        body.firework_ticks = snap.firework_ticks;
        body.movement_speed = snap.movement_speed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ItemStack;
    use approx::assert_relative_eq;
    use glam::DVec3;
    use voxmotion_test::{fixture_registry, ids, SceneBuilder};

    fn driver() -> PhysicsDriver {
        PhysicsDriver::new(&fixture_registry("1.20.4")).unwrap()
    }

    #[test]
    fn ticks_every_body() {
        let driver = driver();
        let world = SceneBuilder::new().stone_floor(63).build();
        let mut entities = hecs::World::new();
        let walker = entities.spawn((
            Body::at(DVec3::new(0.5, 64.0, 0.5)),
            Look::default(),
            Controls::FORWARD,
        ));
        let faller = entities.spawn((Body::at(DVec3::new(4.5, 70.0, 4.5)), Look::default()));
        // No look: not simulated
        entities.spawn((Body::at(DVec3::new(8.5, 70.0, 8.5)),));

        let report = driver.tick(&mut entities, &world);
        assert_eq!(report, TickReport { advanced: 2, skipped: 0 });

        let faller_body = entities.get::<&Body>(faller).unwrap();
        assert!(faller_body.velocity.y < 0.0);
        drop(faller_body);

        for _ in 0..10 {
            driver.tick(&mut entities, &world);
        }
        let walker_body = entities.get::<&Body>(walker).unwrap();
        assert!(walker_body.position.z < 0.0);
        assert!(walker_body.contacts.on_ground);
    }

    #[test]
    fn unloaded_entities_are_skipped() {
        let driver = driver();
        let world = SceneBuilder::new().build();
        let mut entities = hecs::World::new();
        let far = DVec3::new(10_000.5, 64.0, 0.5);
        let lost = entities.spawn((Body::at(far), Look::default()));

        let report = driver.tick(&mut entities, &world);
        assert_eq!(report, TickReport { advanced: 0, skipped: 1 });
        assert_eq!(entities.get::<&Body>(lost).unwrap().position, far);
    }

    #[test]
    fn effects_and_equipment_reach_the_snapshot() {
        let driver = driver();
        let body = Body::at(DVec3::ZERO);
        let mut effects = ActiveEffects::default();
        effects.insert(ids::JUMP_BOOST, 1);
        effects.insert(ids::SLOW_FALLING, 0);
        let equipment = Equipment {
            chest: Some(ItemStack::new(ids::ELYTRA)),
            feet: Some(ItemStack::new(ids::LEATHER_BOOTS).with_enchantment(ids::DEPTH_STRIDER, 2)),
        };
        let pose = Pose {
            crawling: false,
            swimming: true,
        };

        let snap = driver.snapshot(
            &body,
            &Look { yaw: 1.0, pitch: -0.5 },
            Some(&pose),
            Some(&Controls::SNEAK),
            Some(&effects),
            Some(&equipment),
        );
        assert_eq!(snap.effects.jump_boost, 2);
        assert_eq!(snap.effects.slow_falling, 1);
        assert_eq!(snap.effects.speed, 0);
        assert_eq!(snap.depth_strider, 2);
        assert!(snap.elytra_equipped);
        assert!(snap.swimming);
        assert_relative_eq!(snap.pitch, -0.5);
        assert_eq!(snap.controls, Controls::SNEAK);
    }

    #[test]
    fn written_back_state_resumes_like_a_direct_simulation() {
        let driver = driver();
        let world = SceneBuilder::new().stone_floor(63).build();
        let look = Look { yaw: 0.4, pitch: 0.0 };
        let controls = Controls::FORWARD | Controls::SPRINT | Controls::JUMP;
        let mut effects = ActiveEffects::default();
        effects.insert(ids::SPEED, 1);

        let mut entities = hecs::World::new();
        let runner = entities.spawn((
            Body::at(DVec3::new(0.5, 64.0, 0.5)),
            look,
            controls,
            effects.clone(),
        ));
        let mut direct = {
            let body = entities.get::<&Body>(runner).unwrap();
            driver.snapshot(&body, &look, None, Some(&controls), Some(&effects), None)
        };

        for _ in 0..30 {
            driver.tick(&mut entities, &world);
            assert_eq!(driver.engine().simulate(&mut direct, &world), TickOutcome::Advanced);

            let body = entities.get::<&Body>(runner).unwrap();
            let rebuilt =
                driver.snapshot(&body, &look, None, Some(&controls), Some(&effects), None);
            assert_eq!(rebuilt, direct);
        }
        assert!(direct.movement_speed.has_modifier(voxmotion_physics::SPEED_MODIFIER));
    }

    #[test]
    fn queued_jump_is_consumed() {
        let driver = driver();
        let world = SceneBuilder::new().stone_floor(63).build();
        let mut entities = hecs::World::new();
        let mut body = Body::at(DVec3::new(0.5, 64.0, 0.5));
        body.contacts.on_ground = true;
        body.jump_queued = true;
        let jumper = entities.spawn((body, Look::default()));

        driver.tick(&mut entities, &world);
        let body = entities.get::<&Body>(jumper).unwrap();
        assert!(!body.jump_queued);
        assert!(body.position.y > 64.0);
        assert_eq!(body.jump_ticks, 10);
    }
}
