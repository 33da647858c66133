//! Math utilities and helpers.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box in world units.
///
/// All operations keep `min <= max` on every axis. Boxes are cheap `Copy`
/// values; the transforming methods return a new box instead of mutating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: DVec3,
    /// Maximum corner
    pub max: DVec3,
}

impl Aabb {
    /// Create a new AABB from min and max corners
    #[inline]
    #[must_use]
    pub const fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Create an AABB from the six scalars `[min_x, min_y, min_z, max_x, max_y, max_z]`
    #[inline]
    #[must_use]
    pub const fn from_array(v: [f64; 6]) -> Self {
        Self {
            min: DVec3::new(v[0], v[1], v[2]),
            max: DVec3::new(v[3], v[4], v[5]),
        }
    }

    /// Create an AABB for a unit cube at the given position
    #[inline]
    #[must_use]
    pub fn unit_cube(pos: DVec3) -> Self {
        Self {
            min: pos,
            max: pos + DVec3::ONE,
        }
    }

    /// Get the center of the AABB
    #[inline]
    #[must_use]
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Get the size of the AABB
    #[inline]
    #[must_use]
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Translate all six scalars.
    #[inline]
    #[must_use]
    pub fn offset(self, dx: f64, dy: f64, dz: f64) -> Self {
        let d = DVec3::new(dx, dy, dz);
        Self {
            min: self.min + d,
            max: self.max + d,
        }
    }

    /// Grow the box to cover the volume swept by a displacement.
    ///
    /// Negative deltas move the minimum face, positive deltas the maximum face.
    #[must_use]
    pub fn extend(self, dx: f64, dy: f64, dz: f64) -> Self {
        let mut out = self;
        if dx < 0.0 {
            out.min.x += dx;
        } else {
            out.max.x += dx;
        }
        if dy < 0.0 {
            out.min.y += dy;
        } else {
            out.max.y += dy;
        }
        if dz < 0.0 {
            out.min.z += dz;
        } else {
            out.max.z += dz;
        }
        out
    }

    /// Shrink every face inward.
    ///
    /// An axis thinner than twice its contraction collapses to its midpoint.
    #[must_use]
    pub fn contract(self, ex: f64, ey: f64, ez: f64) -> Self {
        fn shrink(min: f64, max: f64, e: f64) -> (f64, f64) {
            let lo = min + e;
            let hi = max - e;
            if lo <= hi {
                (lo, hi)
            } else {
                let mid = (min + max) * 0.5;
                (mid, mid)
            }
        }

        let (min_x, max_x) = shrink(self.min.x, self.max.x, ex);
        let (min_y, max_y) = shrink(self.min.y, self.max.y, ey);
        let (min_z, max_z) = shrink(self.min.z, self.max.z, ez);
        Self {
            min: DVec3::new(min_x, min_y, min_z),
            max: DVec3::new(max_x, max_y, max_z),
        }
    }

    /// Strict overlap test on all three axes. Touching faces do not intersect.
    #[inline]
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.min.x < other.max.x
            && self.max.x > other.min.x
            && self.min.y < other.max.y
            && self.max.y > other.min.y
            && self.min.z < other.max.z
            && self.max.z > other.min.z
    }

    /// Clip a desired X displacement of `moving` so it stops at this box.
    ///
    /// Only applies when `moving` already overlaps this box on Y and Z.
    #[must_use]
    pub fn compute_offset_x(&self, moving: &Self, mut dx: f64) -> f64 {
        if moving.max.y > self.min.y
            && moving.min.y < self.max.y
            && moving.max.z > self.min.z
            && moving.min.z < self.max.z
        {
            if dx > 0.0 && moving.max.x <= self.min.x {
                dx = dx.min(self.min.x - moving.max.x);
            } else if dx < 0.0 && moving.min.x >= self.max.x {
                dx = dx.max(self.max.x - moving.min.x);
            }
        }
        dx
    }

    /// Clip a desired Y displacement of `moving` so it stops at this box.
    ///
    /// Only applies when `moving` already overlaps this box on X and Z.
    #[must_use]
    pub fn compute_offset_y(&self, moving: &Self, mut dy: f64) -> f64 {
        if moving.max.x > self.min.x
            && moving.min.x < self.max.x
            && moving.max.z > self.min.z
            && moving.min.z < self.max.z
        {
            if dy > 0.0 && moving.max.y <= self.min.y {
                dy = dy.min(self.min.y - moving.max.y);
            } else if dy < 0.0 && moving.min.y >= self.max.y {
                dy = dy.max(self.max.y - moving.min.y);
            }
        }
        dy
    }

    /// Clip a desired Z displacement of `moving` so it stops at this box.
    ///
    /// Only applies when `moving` already overlaps this box on X and Y.
    #[must_use]
    pub fn compute_offset_z(&self, moving: &Self, mut dz: f64) -> f64 {
        if moving.max.x > self.min.x
            && moving.min.x < self.max.x
            && moving.max.y > self.min.y
            && moving.min.y < self.max.y
        {
            if dz > 0.0 && moving.max.z <= self.min.z {
                dz = dz.min(self.min.z - moving.max.z);
            } else if dz < 0.0 && moving.min.z >= self.max.z {
                dz = dz.max(self.max.z - moving.min.z);
            }
        }
        dz
    }
}

/// Clamp that mirrors the argument order used by the movement code.
#[inline]
#[must_use]
pub fn clamp(min: f64, value: f64, max: f64) -> f64 {
    value.max(min).min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cube() -> Aabb {
        Aabb::from_array([0.0, 0.0, 0.0, 1.0, 1.0, 1.0])
    }

    #[test]
    fn intersects_is_symmetric() {
        let a = cube();
        let b = cube().offset(0.5, 0.5, 0.5);
        let c = cube().offset(1.0, 0.0, 0.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
        // Touching faces do not count
        assert!(!a.intersects(&c));
        assert!(!c.intersects(&a));
    }

    #[test]
    fn offset_roundtrip_is_exact() {
        let a = Aabb::from_array([0.3, 64.0, -12.7, 0.9, 65.8, -12.1]);
        let back = a.offset(0.125, -0.5, 3.0).offset(-0.125, 0.5, -3.0);
        assert_eq!(a, back);
    }

    #[test]
    fn extend_handles_negative_deltas() {
        let a = cube().extend(-2.0, 0.5, 0.0);
        assert_relative_eq!(a.min.x, -2.0);
        assert_relative_eq!(a.max.x, 1.0);
        assert_relative_eq!(a.max.y, 1.5);
        assert_relative_eq!(a.min.y, 0.0);
    }

    #[test]
    fn contract_collapses_thin_axes() {
        let a = Aabb::from_array([0.0, 0.0, 0.0, 0.6, 0.6, 0.6]).contract(0.001, 0.401, 0.001);
        assert!(a.min.y <= a.max.y);
        assert_relative_eq!(a.min.y, 0.3);
        assert_relative_eq!(a.min.x, 0.001);
        assert_relative_eq!(a.max.x, 0.599);
    }

    #[test]
    fn compute_offset_y_stops_at_floor() {
        let floor = cube();
        let player = Aabb::from_array([0.2, 1.5, 0.2, 0.8, 3.3, 0.8]);
        assert_relative_eq!(floor.compute_offset_y(&player, -1.0), -0.5);
        // Moving away is never clipped
        assert_relative_eq!(floor.compute_offset_y(&player, 2.0), 2.0);
    }

    #[test]
    fn compute_offset_ignores_non_overlapping_boxes() {
        let wall = cube();
        let player = Aabb::from_array([-1.0, 2.0, 0.2, -0.4, 3.8, 0.8]);
        assert_relative_eq!(wall.compute_offset_x(&player, 1.0), 1.0);
        let player = player.offset(0.0, -2.0, 0.0);
        assert_relative_eq!(wall.compute_offset_x(&player, 1.0), 0.4);
        assert_relative_eq!(wall.compute_offset_z(&player, 1.0), 1.0);
    }
}
