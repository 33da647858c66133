//! Swimming through water and lava.

use glam::DVec3;
use voxmotion_world::BlockAccess;

use crate::collision::Observer;
use crate::engine::PhysicsEngine;
use crate::snapshot::EntitySnapshot;

/// Look pitch below which swimmers dive faster.
const STEEP_DIVE: f64 = -0.2;
const DIVE_RATE: f64 = 0.085;
const SWIM_RATE: f64 = 0.06;
/// Height above the start of the tick probed before hopping out.
const EXIT_PROBE_HEIGHT: f64 = 0.6;

impl PhysicsEngine {
    pub(super) fn travel_in_liquid<W: BlockAccess>(
        &self,
        snap: &mut EntitySnapshot,
        world: &W,
        strafe: f64,
        forward: f64,
        gravity_multiplier: f64,
    ) {
        let c = &self.constants;
        let in_water = snap.contacts.in_water;
        let last_y = snap.position.y;

        if in_water {
            if snap.swimming {
                let look_y = snap.look_direction().y;
                let rate = if look_y < STEEP_DIVE { DIVE_RATE } else { SWIM_RATE };
                if look_y <= 0.0
                    || snap.wants_jump()
                    || self.water_above_head(world, snap.position)
                {
                    snap.velocity.y += (look_y - snap.velocity.y) * rate;
                }
            }
            if snap.is_sneaking() {
                snap.velocity.y -= c.swim_sink_speed;
            }
        }

        let inertia = if in_water { c.water_inertia } else { c.lava_inertia };
        let mut horizontal_inertia = inertia;
        let mut acceleration = c.liquid_acceleration;

        if in_water {
            let mut strider = f64::from(snap.depth_strider.min(3));
            if !snap.contacts.on_ground {
                strider *= 0.5;
            }
            if strider > 0.0 {
                horizontal_inertia += (c.depth_strider_inertia - horizontal_inertia) * strider / 3.0;
                acceleration += (c.depth_strider_acceleration - acceleration) * strider / 3.0;
            }
            if snap.effects.dolphins_grace > 0 {
                horizontal_inertia = c.dolphins_grace_inertia;
            }
        }

        Self::apply_heading(snap, strafe, forward, acceleration);
        let delta = snap.velocity;
        self.move_entity(snap, world, delta, false);

        let gravity = if in_water {
            self.liquid_gravity.water(c.gravity)
        } else {
            self.liquid_gravity.lava(c.gravity)
        };
        snap.velocity.y = snap.velocity.y * inertia - gravity * gravity_multiplier;
        snap.velocity.x *= horizontal_inertia;
        snap.velocity.z *= horizontal_inertia;

        if snap.contacts.collided_horizontally {
            let probe = DVec3::new(
                snap.position.x + snap.velocity.x,
                last_y + snap.velocity.y + EXIT_PROBE_HEIGHT,
                snap.position.z + snap.velocity.z,
            );
            if self.is_clear_of_liquid_and_blocks(world, snap, probe) {
                snap.velocity.y = c.out_of_liquid_impulse;
            }
        }
    }

    /// Whether a hitbox at `feet` would touch neither colliders nor water.
    fn is_clear_of_liquid_and_blocks<W: BlockAccess>(
        &self,
        world: &W,
        snap: &EntitySnapshot,
        feet: DVec3,
    ) -> bool {
        let bb = self.hitbox_at(feet, self.hitbox_height(snap));
        let observer = Observer {
            feet_y: feet.y,
            descending: false,
        };
        !self.collides(world, &bb, observer) && self.water_in_box(world, &bb).is_empty()
    }
}
