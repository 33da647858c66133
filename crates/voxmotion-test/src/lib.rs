//! Test fixtures for the voxmotion crates.
//!
//! Provides a registry with a fixed id layout, block state constructors for
//! every block the simulation treats specially, and a [`SceneBuilder`] for
//! small hand-made worlds.

pub mod blocks;
pub mod scene;

pub use scene::SceneBuilder;

use voxmotion_data::{FeatureTable, GameVersion, Registry};

/// Block ids used by [`fixture_registry`].
pub mod ids {
    pub const AIR: u32 = 0;
    pub const STONE: u32 = 1;
    pub const DIRT: u32 = 2;
    pub const GRASS: u32 = 3;
    pub const WATER: u32 = 4;
    pub const LAVA: u32 = 5;
    pub const SOUL_SAND: u32 = 6;
    pub const HONEY: u32 = 7;
    pub const COBWEB: u32 = 8;
    pub const LADDER: u32 = 9;
    pub const VINE: u32 = 10;
    pub const BUBBLE_COLUMN: u32 = 11;
    pub const SLIME: u32 = 12;
    pub const SCAFFOLDING: u32 = 13;
    pub const OAK_TRAPDOOR: u32 = 14;
    pub const ICE: u32 = 15;
    pub const PACKED_ICE: u32 = 16;
    pub const BLUE_ICE: u32 = 17;
    pub const SEAGRASS: u32 = 18;
    pub const KELP: u32 = 19;
    pub const IRON_TRAPDOOR: u32 = 20;
    pub const FLOWING_WATER: u32 = 21;
    pub const FLOWING_LAVA: u32 = 22;

    pub const MOVEMENT_SPEED: u32 = 5;

    pub const SPEED: u32 = 1;
    pub const SLOWNESS: u32 = 2;
    pub const JUMP_BOOST: u32 = 8;
    pub const LEVITATION: u32 = 25;
    pub const SLOW_FALLING: u32 = 28;
    pub const DOLPHINS_GRACE: u32 = 30;

    pub const ELYTRA: u32 = 802;
    pub const LEATHER_BOOTS: u32 = 760;

    pub const DEPTH_STRIDER: u32 = 8;
}

/// A registry for `version` using the builtin feature table and [`ids`].
///
/// # Panics
///
/// Panics if `version` does not parse or the builtin feature table is
/// malformed.
#[must_use]
pub fn fixture_registry(version: &str) -> Registry {
    let version: GameVersion = version.parse().expect("fixture version");
    let features = FeatureTable::builtin().expect("builtin features");
    Registry::builder(version)
        .features(features)
        .block("air", ids::AIR)
        .block("stone", ids::STONE)
        .block("dirt", ids::DIRT)
        .block("grass_block", ids::GRASS)
        .block("water", ids::WATER)
        .block("flowing_water", ids::FLOWING_WATER)
        .block("lava", ids::LAVA)
        .block("flowing_lava", ids::FLOWING_LAVA)
        .block("soul_sand", ids::SOUL_SAND)
        .block("honey_block", ids::HONEY)
        .block("cobweb", ids::COBWEB)
        .block("ladder", ids::LADDER)
        .block("vine", ids::VINE)
        .block("bubble_column", ids::BUBBLE_COLUMN)
        .block("slime_block", ids::SLIME)
        .block("scaffolding", ids::SCAFFOLDING)
        .block("oak_trapdoor", ids::OAK_TRAPDOOR)
        .block("iron_trapdoor", ids::IRON_TRAPDOOR)
        .block("ice", ids::ICE)
        .block("packed_ice", ids::PACKED_ICE)
        .block("blue_ice", ids::BLUE_ICE)
        .block("seagrass", ids::SEAGRASS)
        .block("kelp", ids::KELP)
        .attribute("generic.movement_speed", ids::MOVEMENT_SPEED)
        .effect("speed", ids::SPEED)
        .effect("slowness", ids::SLOWNESS)
        .effect("jump_boost", ids::JUMP_BOOST)
        .effect("levitation", ids::LEVITATION)
        .effect("slow_falling", ids::SLOW_FALLING)
        .effect("dolphins_grace", ids::DOLPHINS_GRACE)
        .item("elytra", ids::ELYTRA)
        .item("leather_boots", ids::LEATHER_BOOTS)
        .enchantment("depth_strider", ids::DEPTH_STRIDER)
        .build()
}
