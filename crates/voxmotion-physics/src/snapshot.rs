//! Per-tick entity state consumed and produced by the engine.

use bitflags::bitflags;
use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::attribute::Attribute;

bitflags! {
    /// Movement inputs held during a tick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct Controls: u8 {
        const FORWARD = 0b0000_0001;
        const BACK    = 0b0000_0010;
        const LEFT    = 0b0000_0100;
        const RIGHT   = 0b0000_1000;
        const JUMP    = 0b0001_0000;
        const SPRINT  = 0b0010_0000;
        const SNEAK   = 0b0100_0000;
    }
}

impl Controls {
    /// Strafe axis in `-1..=1`, positive to the right.
    #[inline]
    #[must_use]
    pub fn strafe(self) -> f64 {
        f64::from(u8::from(self.contains(Self::RIGHT))) - f64::from(u8::from(self.contains(Self::LEFT)))
    }

    /// Forward axis in `-1..=1`.
    #[inline]
    #[must_use]
    pub fn forward(self) -> f64 {
        f64::from(u8::from(self.contains(Self::FORWARD))) - f64::from(u8::from(self.contains(Self::BACK)))
    }
}

/// Active status effect levels (0 = inactive).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectLevels {
    pub jump_boost: u8,
    pub speed: u8,
    pub slowness: u8,
    pub dolphins_grace: u8,
    pub slow_falling: u8,
    pub levitation: u8,
}

/// Contact state produced by the previous move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contacts {
    pub on_ground: bool,
    pub collided_horizontally: bool,
    pub collided_vertically: bool,
    pub in_water: bool,
    pub in_lava: bool,
    /// Set by touching cobweb, consumed by the next move
    pub in_web: bool,
}

impl Contacts {
    #[inline]
    #[must_use]
    pub const fn in_liquid(&self) -> bool {
        self.in_water || self.in_lava
    }
}

/// Everything one tick reads and writes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySnapshot {
    /// Feet position, centred horizontally
    pub position: DVec3,
    pub velocity: DVec3,
    /// Radians; 0 looks towards -Z
    pub yaw: f64,
    /// Radians; positive looks up
    pub pitch: f64,
    pub crawling: bool,
    pub swimming: bool,
    pub contacts: Contacts,
    pub elytra_flying: bool,
    /// A jump requested outside the held jump control
    pub jump_queued: bool,
    /// Ticks until an auto-jump may fire again
    pub jump_ticks: u32,
    pub firework_ticks: u32,
    pub controls: Controls,
    pub movement_speed: Attribute,
    pub effects: EffectLevels,
    pub depth_strider: u8,
    pub elytra_equipped: bool,
}

impl EntitySnapshot {
    /// A standing entity at rest with default movement speed 0.1.
    #[must_use]
    pub fn new(position: DVec3) -> Self {
        Self {
            position,
            velocity: DVec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            crawling: false,
            swimming: false,
            contacts: Contacts::default(),
            elytra_flying: false,
            jump_queued: false,
            jump_ticks: 0,
            firework_ticks: 0,
            controls: Controls::empty(),
            movement_speed: Attribute::new(0.1),
            effects: EffectLevels::default(),
            depth_strider: 0,
            elytra_equipped: false,
        }
    }

    /// Sneak input counts only when not crawling.
    #[inline]
    #[must_use]
    pub fn is_sneaking(&self) -> bool {
        self.controls.contains(Controls::SNEAK) && !self.crawling
    }

    #[inline]
    #[must_use]
    pub fn is_sprinting(&self) -> bool {
        self.controls.contains(Controls::SPRINT)
    }

    #[inline]
    #[must_use]
    pub fn wants_jump(&self) -> bool {
        self.controls.contains(Controls::JUMP)
    }

    /// Unit look direction.
    #[must_use]
    pub fn look_direction(&self) -> DVec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        DVec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }
}

/// Result of [`crate::PhysicsEngine::simulate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum TickOutcome {
    /// The snapshot was advanced by one tick.
    Advanced,
    /// The world around the entity is not loaded; nothing changed.
    Skipped,
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn control_axes() {
        let c = Controls::FORWARD | Controls::LEFT;
        assert_relative_eq!(c.forward(), 1.0);
        assert_relative_eq!(c.strafe(), -1.0);
        assert_relative_eq!((Controls::FORWARD | Controls::BACK).forward(), 0.0);
    }

    #[test]
    fn crawling_cancels_sneak() {
        let mut snap = EntitySnapshot::new(DVec3::ZERO);
        snap.controls = Controls::SNEAK;
        assert!(snap.is_sneaking());
        snap.crawling = true;
        assert!(!snap.is_sneaking());
    }

    #[test]
    fn look_direction_axes() {
        let mut snap = EntitySnapshot::new(DVec3::ZERO);
        let look = snap.look_direction();
        assert_relative_eq!(look.z, -1.0);
        assert_relative_eq!(look.length(), 1.0, epsilon = 1e-12);

        snap.pitch = std::f64::consts::FRAC_PI_2;
        assert_relative_eq!(snap.look_direction().y, 1.0);
    }
}
