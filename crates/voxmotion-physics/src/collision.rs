//! Swept box collision against voxel shapes, step-up and contact effects.

use glam::DVec3;
use voxmotion_core::{Aabb, Block, BlockPos};
use voxmotion_world::BlockAccess;

use crate::classify::BlockCategory;
use crate::engine::PhysicsEngine;
use crate::snapshot::EntitySnapshot;

/// Horizontal trim step used while sneaking at a ledge.
const SNEAK_EDGE_STEP: f64 = 0.05;
/// Height of the floor slab of unsupported scaffolding.
const SCAFFOLDING_FLOOR: f64 = 0.125;
const SCAFFOLDING_EPSILON: f64 = 1e-5;
/// How far below the feet slime is looked up for bouncing.
const SLIME_PROBE_DEPTH: f64 = 0.2;

/// The entity on whose behalf colliders are gathered. Scaffolding collides
/// differently depending on where its feet are.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observer {
    pub feet_y: f64,
    /// Sneaking down through scaffolding this tick
    pub descending: bool,
}

fn sweep_x(colliders: &[Aabb], moving: &Aabb, dx: f64) -> f64 {
    colliders.iter().fold(dx, |d, b| b.compute_offset_x(moving, d))
}

fn sweep_y(colliders: &[Aabb], moving: &Aabb, dy: f64) -> f64 {
    colliders.iter().fold(dy, |d, b| b.compute_offset_y(moving, d))
}

fn sweep_z(colliders: &[Aabb], moving: &Aabb, dz: f64) -> f64 {
    colliders.iter().fold(dz, |d, b| b.compute_offset_z(moving, d))
}

/// Move `d` one sneak step towards zero.
fn trim_toward_zero(d: f64) -> f64 {
    if (-SNEAK_EDGE_STEP..SNEAK_EDGE_STEP).contains(&d) {
        0.0
    } else if d > 0.0 {
        d - SNEAK_EDGE_STEP
    } else {
        d + SNEAK_EDGE_STEP
    }
}

/// Raise `base` by at most `rise` (probing with `probe`), then slide along
/// X and Z. Returns the moved box and the applied `(dx, dy, dz)`.
fn raise_and_slide(
    colliders: &[Aabb],
    base: Aabb,
    probe: &Aabb,
    rise: f64,
    dx: f64,
    dz: f64,
) -> (Aabb, DVec3) {
    let dy = sweep_y(colliders, probe, rise);
    let mut bb = base.offset(0.0, dy, 0.0);
    let dx = sweep_x(colliders, &bb, dx);
    bb = bb.offset(dx, 0.0, 0.0);
    let dz = sweep_z(colliders, &bb, dz);
    bb = bb.offset(0.0, 0.0, dz);
    (bb, DVec3::new(dx, dy, dz))
}

impl PhysicsEngine {
    /// World-space collision boxes of every voxel overlapping `query`,
    /// padded one voxel downwards so fences and walls are seen from above.
    pub fn surrounding_boxes<W: BlockAccess>(
        &self,
        world: &W,
        query: &Aabb,
        observer: Observer,
    ) -> Vec<Aabb> {
        let min = BlockPos::containing(query.min);
        let max = BlockPos::containing(query.max);
        let mut boxes = Vec::new();
        for y in (min.y - 1)..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    let Some(block) = world.block_at(BlockPos::new(x, y, z)) else {
                        continue;
                    };
                    if self.blocks.is(block.type_id(), BlockCategory::Scaffolding) {
                        Self::scaffolding_boxes(&block, observer, &mut boxes);
                    } else {
                        boxes.extend(block.world_shapes());
                    }
                }
            }
        }
        boxes
    }

    fn scaffolding_boxes(block: &Block, observer: Observer, out: &mut Vec<Aabb>) {
        let base = block.position.to_dvec3();
        if observer.feet_y >= base.y + 1.0 - SCAFFOLDING_EPSILON && !observer.descending {
            out.extend(block.world_shapes());
        } else if block.state.flag("bottom")
            && observer.feet_y >= base.y + SCAFFOLDING_FLOOR - SCAFFOLDING_EPSILON
        {
            out.push(Aabb::new(
                base,
                base + DVec3::new(1.0, SCAFFOLDING_FLOOR, 1.0),
            ));
        }
    }

    /// Whether a box at `bb` overlaps any collider.
    pub(crate) fn collides<W: BlockAccess>(&self, world: &W, bb: &Aabb, observer: Observer) -> bool {
        self.surrounding_boxes(world, bb, observer)
            .iter()
            .any(|c| c.intersects(bb))
    }

    /// Move the entity by `delta`, resolving collisions and updating contact
    /// flags, velocity and position.
    #[allow(clippy::float_cmp)]
    pub(crate) fn move_entity<W: BlockAccess>(
        &self,
        snap: &mut EntitySnapshot,
        world: &W,
        delta: DVec3,
        descending: bool,
    ) {
        let c = &self.constants;
        let mut d = delta;
        if snap.contacts.in_web {
            d *= DVec3::from_array(c.web_slowdown);
            snap.velocity = DVec3::ZERO;
            snap.contacts.in_web = false;
        }

        let height = self.hitbox_height(snap);
        let start = self.hitbox_at(snap.position, height);
        let observer = Observer {
            feet_y: snap.position.y,
            descending,
        };

        let mut old = d;
        if snap.is_sneaking() && snap.contacts.on_ground {
            // Supported only by something the lowered box actually overlaps
            let over_void = |dx: f64, dz: f64| {
                !self.collides(world, &start.offset(dx, -c.step_height, dz), observer)
            };
            while d.x != 0.0 && over_void(d.x, 0.0) {
                d.x = trim_toward_zero(d.x);
                old.x = d.x;
            }
            while d.z != 0.0 && over_void(0.0, d.z) {
                d.z = trim_toward_zero(d.z);
                old.z = d.z;
            }
            while d.x != 0.0 && d.z != 0.0 && over_void(d.x, d.z) {
                d.x = trim_toward_zero(d.x);
                d.z = trim_toward_zero(d.z);
                old.x = d.x;
                old.z = d.z;
            }
        }

        let colliders = self.surrounding_boxes(world, &start.extend(d.x, d.y, d.z), observer);
        let mut bb = start;
        d.y = sweep_y(&colliders, &bb, d.y);
        bb = bb.offset(0.0, d.y, 0.0);
        d.x = sweep_x(&colliders, &bb, d.x);
        bb = bb.offset(d.x, 0.0, 0.0);
        d.z = sweep_z(&colliders, &bb, d.z);
        bb = bb.offset(0.0, 0.0, d.z);

        let blocked_horizontally = d.x != old.x || d.z != old.z;
        let landed = d.y != old.y && old.y < 0.0;
        if !snap.crawling
            && c.step_height > 0.0
            && (snap.contacts.on_ground || landed)
            && blocked_horizontally
        {
            (bb, d) = self.step_up(world, observer, start, bb, d, old);
        }

        let hw = self.dimensions.half_width();
        snap.position = DVec3::new(bb.min.x + hw, bb.min.y, bb.min.z + hw);

        snap.contacts.collided_horizontally = d.x != old.x || d.z != old.z;
        snap.contacts.collided_vertically = d.y != old.y;
        snap.contacts.on_ground = snap.contacts.collided_vertically && old.y < 0.0;

        if d.x != old.x {
            snap.velocity.x = 0.0;
        }
        if d.z != old.z {
            snap.velocity.z = 0.0;
        }
        if d.y != old.y {
            let under = world.block_at(BlockPos::containing(
                snap.position - DVec3::new(0.0, SLIME_PROBE_DEPTH, 0.0),
            ));
            let bounces = under.is_some_and(|b| self.blocks.is(b.type_id(), BlockCategory::Slime));
            snap.velocity.y = if bounces && !snap.is_sneaking() {
                -snap.velocity.y
            } else {
                0.0
            };
        }

        self.apply_block_contacts(snap, world, &bb);
    }

    /// Try climbing onto whatever blocked the horizontal move. Returns the
    /// blocked outcome unless stepping gets strictly further.
    fn step_up<W: BlockAccess>(
        &self,
        world: &W,
        observer: Observer,
        start: Aabb,
        blocked_bb: Aabb,
        blocked: DVec3,
        old: DVec3,
    ) -> (Aabb, DVec3) {
        let rise = self.constants.step_height;
        let colliders = self.surrounding_boxes(world, &start.extend(old.x, rise, old.z), observer);

        let widened = start.extend(blocked.x, 0.0, blocked.z);
        let (bb1, d1) = raise_and_slide(&colliders, start, &widened, rise, old.x, old.z);
        let (bb2, d2) = raise_and_slide(&colliders, start, &start, rise, old.x, old.z);

        let (mut bb, mut d) = if d1.x * d1.x + d1.z * d1.z > d2.x * d2.x + d2.z * d2.z {
            (bb1, d1)
        } else {
            (bb2, d2)
        };
        d.y = sweep_y(&colliders, &bb, -d.y);
        bb = bb.offset(0.0, d.y, 0.0);

        if blocked.x * blocked.x + blocked.z * blocked.z >= d.x * d.x + d.z * d.z {
            (blocked_bb, blocked)
        } else {
            (bb, d)
        }
    }

    /// The block half a voxel below the feet, which is what the entity
    /// stands on even for blocks lower than a full cube.
    pub(crate) fn block_underfoot<W: BlockAccess>(&self, world: &W, feet: DVec3) -> Option<Block> {
        world.block_at(BlockPos::containing(feet - DVec3::new(0.0, 0.5, 0.0)))
    }

    /// Effects of blocks the final hitbox overlaps or stands on.
    fn apply_block_contacts<W: BlockAccess>(&self, snap: &mut EntitySnapshot, world: &W, bb: &Aabb) {
        let c = &self.constants;
        let inner = bb.contract(0.001, 0.001, 0.001);
        let min = BlockPos::containing(inner.min);
        let max = BlockPos::containing(inner.max);
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    let pos = BlockPos::new(x, y, z);
                    let Some(block) = world.block_at(pos) else {
                        continue;
                    };
                    let category = self.blocks.category(block.type_id());
                    if self.features.velocity_blocks_on_collision {
                        match category {
                            Some(BlockCategory::SoulSand) => {
                                snap.velocity.x *= c.soul_sand_speed;
                                snap.velocity.z *= c.soul_sand_speed;
                            }
                            Some(BlockCategory::Honey) => {
                                snap.velocity.x *= c.honey_speed;
                                snap.velocity.z *= c.honey_speed;
                            }
                            _ => {}
                        }
                    }
                    match category {
                        Some(BlockCategory::Cobweb) => snap.contacts.in_web = true,
                        Some(BlockCategory::BubbleColumn) => {
                            let drag_down = block.metadata() == 0;
                            let surface = world
                                .block_at(pos.above())
                                .is_some_and(|above| self.blocks.is_air(above.type_id()));
                            let drag = if surface {
                                &c.bubble_column_surface
                            } else {
                                &c.bubble_column
                            };
                            snap.velocity.y = drag.apply(snap.velocity.y, drag_down);
                        }
                        _ => {}
                    }
                }
            }
        }

        if self.features.velocity_blocks_on_top {
            match self
                .block_underfoot(world, snap.position)
                .and_then(|b| self.blocks.category(b.type_id()))
            {
                Some(BlockCategory::SoulSand) => {
                    snap.velocity.x *= c.soul_sand_speed;
                    snap.velocity.z *= c.soul_sand_speed;
                }
                Some(BlockCategory::Honey) => {
                    snap.velocity.x *= c.honey_speed;
                    snap.velocity.z *= c.honey_speed;
                }
                _ => {}
            }
        }
    }
}
