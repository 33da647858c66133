//! Elytra gliding.

use glam::DVec3;
use voxmotion_world::BlockAccess;

use crate::engine::PhysicsEngine;
use crate::snapshot::EntitySnapshot;

/// Vertical acceleration from gravity while gliding at `pitch`. Level flight
/// keeps a quarter of it; a vertical dive feels all of it.
#[must_use]
pub fn gravity_term(gravity: f64, multiplier: f64, pitch: f64) -> f64 {
    let cos = pitch.cos();
    gravity * multiplier * (cos * cos * 0.75 - 1.0)
}

impl PhysicsEngine {
    pub(super) fn glide<W: BlockAccess>(
        &self,
        snap: &mut EntitySnapshot,
        world: &W,
        gravity_multiplier: f64,
    ) {
        let look = snap.look_direction();
        let (sin_pitch, cos_pitch) = snap.pitch.sin_cos();
        let cos_sq = cos_pitch * cos_pitch;
        let horizontal = snap.velocity.x.hypot(snap.velocity.z);
        let v = &mut snap.velocity;

        v.y += gravity_term(self.constants.gravity, gravity_multiplier, snap.pitch);

        if v.y < 0.0 && cos_pitch > 0.0 {
            let descent = v.y * -0.1 * cos_sq;
            v.x += look.x * descent / cos_pitch;
            v.y += descent;
            v.z += look.z * descent / cos_pitch;
        }

        if snap.pitch < 0.0 && cos_pitch > 0.0 {
            let lift = horizontal * -sin_pitch * 0.04;
            v.x -= look.x * lift / cos_pitch;
            v.y += lift * 3.2;
            v.z -= look.z * lift / cos_pitch;
        }

        if cos_pitch > 0.0 {
            v.x += (look.x / cos_pitch * horizontal - v.x) * 0.1;
            v.z += (look.z / cos_pitch * horizontal - v.z) * 0.1;
        }

        *v *= DVec3::from_array(self.constants.elytra_drag);
        let delta = *v;
        self.move_entity(snap, world, delta, false);

        if snap.contacts.on_ground {
            snap.elytra_flying = false;
        }
    }
}
