//! Tunable physics constants.
//!
//! Values are per tick; distances in blocks, velocities in blocks per tick.

use serde::{Deserialize, Serialize};

/// Drag applied by one bubble column voxel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BubbleDrag {
    /// Downward acceleration of a dragging column
    pub down: f64,
    /// Lowest vertical velocity a dragging column produces
    pub max_down: f64,
    /// Upward acceleration of a lifting column
    pub up: f64,
    /// Highest vertical velocity a lifting column produces
    pub max_up: f64,
}

impl BubbleDrag {
    /// Push `vy` in the column's direction, clamped to its limit.
    #[inline]
    #[must_use]
    pub fn apply(&self, vy: f64, drag_down: bool) -> f64 {
        if drag_down {
            self.max_down.max(vy - self.down)
        } else {
            self.max_up.min(vy + self.up)
        }
    }
}

/// How liquids pull entities down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LiquidGravity {
    /// A fixed 0.02 in both water and lava.
    Independent,
    /// A fraction of terrestrial gravity: 1/16 in water, 1/4 in lava.
    Proportional,
}

impl LiquidGravity {
    /// Water gravity for terrestrial `gravity`.
    #[must_use]
    pub fn water(self, gravity: f64) -> f64 {
        match self {
            Self::Independent => 0.02,
            Self::Proportional => gravity / 16.0,
        }
    }

    /// Lava gravity for terrestrial `gravity`.
    #[must_use]
    pub fn lava(self, gravity: f64) -> f64 {
        match self {
            Self::Independent => 0.02,
            Self::Proportional => gravity / 4.0,
        }
    }
}

/// Player hitbox sizes per pose.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerDimensions {
    pub width: f64,
    pub height: f64,
    /// Height while sneaking, when the version shrinks the sneaking hitbox
    pub sneak_height: f64,
    /// Height while crawling or swimming
    pub crawl_height: f64,
}

impl Default for PlayerDimensions {
    fn default() -> Self {
        Self {
            width: 0.6,
            height: 1.8,
            sneak_height: 1.5,
            crawl_height: 0.6,
        }
    }
}

impl PlayerDimensions {
    /// Half of the hitbox width.
    #[inline]
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width / 2.0
    }
}

/// Every constant the movement models read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhysicsConstants {
    pub gravity: f64,
    /// Vertical drag applied after terrestrial movement
    pub air_drag: f64,
    /// Base movement speed attribute value
    pub player_speed: f64,
    pub sprint_speed: f64,
    /// Multiply-total modifier applied while sneaking or crawling
    pub sneak_speed: f64,
    /// Multiply-total modifier per speed effect level
    pub speed_effect: f64,
    /// Multiply-total modifier per slowness effect level
    pub slowness_effect: f64,
    pub step_height: f64,
    /// Velocity components below this magnitude snap to zero
    pub negligible_velocity: f64,
    /// Scale applied to strafe and forward inputs
    pub input_damping: f64,
    /// Ground acceleration numerator, divided by inertia cubed
    pub ground_acceleration: f64,
    pub default_slipperiness: f64,
    pub airborne_inertia: f64,
    pub airborne_acceleration: f64,
    /// Extra airborne acceleration while sprinting
    pub sprint_air_acceleration: f64,
    pub soul_sand_speed: f64,
    pub honey_speed: f64,
    pub honey_jump_speed: f64,
    /// Displacement scale inside cobweb
    pub web_slowdown: [f64; 3],
    pub ladder_max_speed: f64,
    pub ladder_climb_speed: f64,
    pub scaffolding_climb_speed: f64,
    pub scaffolding_descend_speed: f64,
    pub jump_impulse: f64,
    /// Jump height bonus per jump boost level
    pub jump_boost: f64,
    /// Horizontal impulse of a sprint jump
    pub sprint_jump_speed: f64,
    /// Upward push per tick while holding jump in a liquid
    pub liquid_jump: f64,
    pub jump_cooldown: u32,
    pub water_inertia: f64,
    pub lava_inertia: f64,
    pub liquid_acceleration: f64,
    pub depth_strider_inertia: f64,
    pub depth_strider_acceleration: f64,
    pub dolphins_grace_inertia: f64,
    pub out_of_liquid_impulse: f64,
    pub swim_sink_speed: f64,
    /// Scale of the summed water current
    pub water_current: f64,
    pub slow_falling: f64,
    pub levitation_speed: f64,
    pub bubble_column_surface: BubbleDrag,
    pub bubble_column: BubbleDrag,
    /// Elytra drag per axis
    pub elytra_drag: [f64; 3],
}

impl Default for PhysicsConstants {
    fn default() -> Self {
        Self {
            gravity: 0.08,
            air_drag: f64::from(0.98_f32),
            player_speed: 0.1,
            sprint_speed: 0.3,
            sneak_speed: -0.7,
            speed_effect: 0.2,
            slowness_effect: -0.15,
            step_height: 0.6,
            negligible_velocity: 0.003,
            input_damping: 0.98,
            ground_acceleration: 0.162_771_4,
            default_slipperiness: 0.6,
            airborne_inertia: 0.91,
            airborne_acceleration: 0.02,
            sprint_air_acceleration: 0.02 * 0.3,
            soul_sand_speed: 0.4,
            honey_speed: 0.4,
            honey_jump_speed: 0.4,
            web_slowdown: [0.25, 0.05, 0.25],
            ladder_max_speed: 0.15,
            ladder_climb_speed: 0.2,
            scaffolding_climb_speed: 0.2,
            scaffolding_descend_speed: 0.15,
            jump_impulse: f64::from(0.42_f32),
            jump_boost: 0.1,
            sprint_jump_speed: 0.2,
            liquid_jump: 0.04,
            jump_cooldown: 10,
            water_inertia: 0.8,
            lava_inertia: 0.5,
            liquid_acceleration: 0.02,
            depth_strider_inertia: 0.546,
            depth_strider_acceleration: 0.7,
            dolphins_grace_inertia: 0.96,
            out_of_liquid_impulse: 0.3,
            swim_sink_speed: 0.04,
            water_current: 0.014,
            slow_falling: 0.125,
            levitation_speed: 0.05,
            bubble_column_surface: BubbleDrag {
                down: 0.03,
                max_down: -0.9,
                up: 0.1,
                max_up: 1.8,
            },
            bubble_column: BubbleDrag {
                down: 0.03,
                max_down: -0.3,
                up: 0.06,
                max_up: 0.7,
            },
            elytra_drag: [0.99, 0.98, 0.99],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn single_precision_constants() {
        let c = PhysicsConstants::default();
        assert_relative_eq!(c.air_drag, 0.980_000_019_073_486_3);
        assert_relative_eq!(c.jump_impulse, 0.419_999_986_886_978_15);
    }

    #[test]
    fn liquid_gravity_schemes() {
        assert_relative_eq!(LiquidGravity::Independent.water(0.08), 0.02);
        assert_relative_eq!(LiquidGravity::Independent.lava(0.08), 0.02);
        assert_relative_eq!(LiquidGravity::Proportional.water(0.08), 0.005);
        assert_relative_eq!(LiquidGravity::Proportional.lava(0.08), 0.02);
    }

    #[test]
    fn bubble_drag_clamps() {
        let c = PhysicsConstants::default();
        assert_relative_eq!(c.bubble_column.apply(-0.29, true), -0.3);
        assert_relative_eq!(c.bubble_column.apply(0.0, true), -0.03);
        assert_relative_eq!(c.bubble_column_surface.apply(1.75, false), 1.8);
        assert_relative_eq!(c.bubble_column_surface.apply(0.0, false), 0.1);
    }
}
