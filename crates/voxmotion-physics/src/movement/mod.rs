//! Movement models. Exactly one runs per tick, chosen by priority:
//! liquid, then elytra, then terrestrial.

mod climb;
mod elytra;
mod liquid;
mod terrestrial;

pub use elytra::gravity_term as elytra_gravity_term;

use std::f64::consts::PI;

use voxmotion_world::BlockAccess;

use crate::engine::PhysicsEngine;
use crate::snapshot::EntitySnapshot;

impl PhysicsEngine {
    pub(crate) fn travel<W: BlockAccess>(
        &self,
        snap: &mut EntitySnapshot,
        world: &W,
        strafe: f64,
        forward: f64,
    ) {
        let gravity_multiplier = if snap.velocity.y <= 0.0 && snap.effects.slow_falling > 0 {
            self.constants.slow_falling
        } else {
            1.0
        };

        if snap.contacts.in_liquid() {
            self.travel_in_liquid(snap, world, strafe, forward, gravity_multiplier);
        } else if snap.elytra_flying {
            self.glide(snap, world, gravity_multiplier);
        } else {
            self.travel_on_land(snap, world, strafe, forward, gravity_multiplier);
        }
    }

    /// Accelerate along the input direction relative to yaw.
    pub(crate) fn apply_heading(
        snap: &mut EntitySnapshot,
        strafe: f64,
        forward: f64,
        multiplier: f64,
    ) {
        let speed = (strafe * strafe + forward * forward).sqrt();
        if speed < 0.01 {
            return;
        }
        let scale = multiplier / speed.max(1.0);
        let (strafe, forward) = (strafe * scale, forward * scale);
        let (sin, cos) = (PI - snap.yaw).sin_cos();
        snap.velocity.x -= strafe * cos + forward * sin;
        snap.velocity.z += forward * cos - strafe * sin;
    }
}
