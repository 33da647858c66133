//! Engine construction and the per-tick entry point.

use glam::DVec3;
use voxmotion_core::{Aabb, BlockPos};
use voxmotion_data::{GameVersion, Registry};
use voxmotion_world::BlockAccess;

use crate::classify::BlockClasses;
use crate::constants::{LiquidGravity, PhysicsConstants, PlayerDimensions};
use crate::error::{PhysicsError, Result};
use crate::snapshot::{EntitySnapshot, TickOutcome};

/// Version-gated behaviour, read from the registry's feature table once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VersionFeatures {
    /// Soul sand and honey slow entities touching them
    pub velocity_blocks_on_collision: bool,
    /// Soul sand and honey slow entities standing on them
    pub velocity_blocks_on_top: bool,
    pub climb_using_jump: bool,
    pub climbable_trapdoor: bool,
    /// Sneaking shrinks the hitbox
    pub reduced_sneak_hitbox: bool,
}

impl VersionFeatures {
    #[must_use]
    pub fn from_registry(registry: &Registry) -> Self {
        Self {
            velocity_blocks_on_collision: registry.supports_feature("velocityBlocksOnCollision"),
            velocity_blocks_on_top: registry.supports_feature("velocityBlocksOnTop"),
            climb_using_jump: registry.supports_feature("climbUsingJump"),
            climbable_trapdoor: registry.supports_feature("climbableTrapdoor"),
            reduced_sneak_hitbox: registry.supports_feature("reducedSneakHitbox"),
        }
    }
}

/// Player movement simulation for one game version.
///
/// Holds only immutable, version-derived data; every tick is a pure function
/// of the snapshot and the world.
#[derive(Debug, Clone)]
pub struct PhysicsEngine {
    pub(crate) constants: PhysicsConstants,
    pub(crate) dimensions: PlayerDimensions,
    pub(crate) liquid_gravity: LiquidGravity,
    pub(crate) features: VersionFeatures,
    pub(crate) blocks: BlockClasses,
    version: GameVersion,
}

impl PhysicsEngine {
    /// Build an engine with default constants.
    pub fn new(registry: &Registry) -> Result<Self> {
        Self::with_constants(registry, PhysicsConstants::default(), PlayerDimensions::default())
    }

    /// Build an engine with custom constants.
    pub fn with_constants(
        registry: &Registry,
        constants: PhysicsConstants,
        dimensions: PlayerDimensions,
    ) -> Result<Self> {
        let version = registry.version();
        let liquid_gravity = if registry.supports_feature("independentLiquidGravity") {
            LiquidGravity::Independent
        } else if registry.supports_feature("proportionalLiquidGravity") {
            LiquidGravity::Proportional
        } else {
            return Err(PhysicsError::NoLiquidGravity {
                version: version.to_string(),
            });
        };

        let blocks = BlockClasses::resolve(registry)?;
        let features = VersionFeatures::from_registry(registry);

        tracing::debug!(
            %version,
            ?liquid_gravity,
            classified_blocks = blocks.len(),
            ?features,
            "Physics engine ready"
        );

        Ok(Self {
            constants,
            dimensions,
            liquid_gravity,
            features,
            blocks,
            version,
        })
    }

    #[must_use]
    pub const fn version(&self) -> GameVersion {
        self.version
    }

    #[must_use]
    pub const fn constants(&self) -> &PhysicsConstants {
        &self.constants
    }

    #[must_use]
    pub const fn dimensions(&self) -> &PlayerDimensions {
        &self.dimensions
    }

    #[must_use]
    pub const fn liquid_gravity(&self) -> LiquidGravity {
        self.liquid_gravity
    }

    #[must_use]
    pub const fn features(&self) -> VersionFeatures {
        self.features
    }

    #[must_use]
    pub const fn blocks(&self) -> &BlockClasses {
        &self.blocks
    }

    /// Hitbox height for the snapshot's pose.
    #[must_use]
    pub fn hitbox_height(&self, snap: &EntitySnapshot) -> f64 {
        if snap.crawling || snap.swimming {
            self.dimensions.crawl_height
        } else if snap.is_sneaking() && self.features.reduced_sneak_hitbox {
            self.dimensions.sneak_height
        } else {
            self.dimensions.height
        }
    }

    /// Hitbox of an entity standing at `feet`.
    #[must_use]
    pub fn hitbox_at(&self, feet: DVec3, height: f64) -> Aabb {
        let w = self.dimensions.half_width();
        Aabb::from_array([-w, 0.0, -w, w, height, w]).offset(feet.x, feet.y, feet.z)
    }

    /// Hitbox for the snapshot's position and pose.
    #[must_use]
    pub fn hitbox(&self, snap: &EntitySnapshot) -> Aabb {
        self.hitbox_at(snap.position, self.hitbox_height(snap))
    }

    /// Advance `snap` by one tick.
    ///
    /// Returns [`TickOutcome::Skipped`] without touching the snapshot when the
    /// voxel at the entity's feet is not loaded.
    #[tracing::instrument(level = "trace", skip_all)]
    pub fn simulate<W: BlockAccess>(&self, snap: &mut EntitySnapshot, world: &W) -> TickOutcome {
        if world.block_at(BlockPos::containing(snap.position)).is_none() {
            tracing::trace!(position = ?snap.position, "Feet voxel not loaded, skipping tick");
            return TickOutcome::Skipped;
        }

        self.detect_liquids(snap, world);
        self.zero_negligible_velocity(snap);
        self.handle_jump(snap, world);

        let c = &self.constants;
        let strafe = snap.controls.strafe() * c.input_damping;
        let forward = snap.controls.forward() * c.input_damping;

        snap.elytra_flying = snap.elytra_flying
            && snap.elytra_equipped
            && !snap.contacts.on_ground
            && snap.effects.levitation == 0;
        self.apply_firework(snap);

        self.travel(snap, world, strafe, forward);

        tracing::trace!(
            position = ?snap.position,
            velocity = ?snap.velocity,
            on_ground = snap.contacts.on_ground,
            "Tick complete"
        );
        TickOutcome::Advanced
    }

    fn zero_negligible_velocity(&self, snap: &mut EntitySnapshot) {
        let threshold = self.constants.negligible_velocity;
        for axis in 0..3 {
            if snap.velocity[axis].abs() < threshold {
                snap.velocity[axis] = 0.0;
            }
        }
    }

    /// Rocket boost along the look direction while gliding.
    fn apply_firework(&self, snap: &mut EntitySnapshot) {
        if snap.firework_ticks == 0 {
            return;
        }
        if !snap.elytra_flying {
            snap.firework_ticks = 0;
            return;
        }
        let look = snap.look_direction();
        snap.velocity += look * 0.1 + (look * 1.5 - snap.velocity) * 0.5;
        snap.firework_ticks -= 1;
    }
}
