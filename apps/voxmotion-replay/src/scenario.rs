//! Scripted worlds and inputs for the replay harness.

use std::str::FromStr;
use std::sync::Arc;

use anyhow::{bail, Context};
use glam::DVec3;
use voxmotion_core::{Aabb, BlockPos, BlockState, ChunkPos};
use voxmotion_data::Registry;
use voxmotion_entity::{Body, Controls, Entity, Equipment, ItemStack, Look, World};
use voxmotion_world::{ChunkedWorld, TerrainConfig, TerrainGenerator, TerrainPalette};

/// Flat worlds span this many blocks around the origin on x and z.
const FLAT_RADIUS: i32 = 48;
const FLOOR_Y: i32 = 63;
/// Noise terrain is generated for chunks in these ranges.
const TERRAIN_CHUNKS_XZ: std::ops::RangeInclusive<i32> = -6..=5;
const TERRAIN_CHUNKS_Y: std::ops::RangeInclusive<i32> = 0..=7;
const GLIDE_START_Y: f64 = 100.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scenario {
    /// Sprint-jumping across a flat stone floor
    Flat,
    /// Walking over noise terrain, jumping over hills
    Terrain,
    /// Swimming across a pool, then sinking
    Pool,
    /// Climbing a ladder against a wall
    Ladder,
    /// Elytra flight over noise terrain with a rocket boost
    Glide,
}

impl FromStr for Scenario {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        Ok(match s {
            "flat" => Self::Flat,
            "terrain" => Self::Terrain,
            "pool" => Self::Pool,
            "ladder" => Self::Ladder,
            "glide" => Self::Glide,
            other => bail!("unknown scenario {other:?}, expected flat, terrain, pool, ladder or glide"),
        })
    }
}

/// Block states the scenarios place, resolved by registry name.
struct Palette {
    air: Arc<BlockState>,
    stone: Arc<BlockState>,
    dirt: Arc<BlockState>,
    grass: Arc<BlockState>,
    water: Arc<BlockState>,
    ladder: Arc<BlockState>,
}

impl Palette {
    fn resolve(registry: &Registry) -> anyhow::Result<Self> {
        let id = |name: &str| {
            registry
                .block(name)
                .with_context(|| format!("registry has no block named {name}"))
        };
        let cube = |name: &str| id(name).map(|id| Arc::new(BlockState::full_cube(id)));
        let ladder_shape = Aabb::from_array([0.0, 0.0, 0.0, 1.0, 1.0, 0.1875]);
        Ok(Self {
            air: Arc::new(BlockState::empty(id("air")?)),
            stone: cube("stone")?,
            dirt: cube("dirt")?,
            grass: cube("grass_block")?,
            water: Arc::new(BlockState::empty(id("water")?)),
            ladder: Arc::new(
                BlockState::empty(id("ladder")?)
                    .with_shapes(vec![ladder_shape])
                    .with_property("facing", "south"),
            ),
        })
    }

    fn terrain(&self) -> TerrainPalette {
        TerrainPalette {
            air: Arc::clone(&self.air),
            stone: Arc::clone(&self.stone),
            dirt: Arc::clone(&self.dirt),
            grass: Arc::clone(&self.grass),
            water: Arc::clone(&self.water),
        }
    }
}

/// A built scenario: the block world, the entity world and the player.
pub struct Setup {
    pub scenario: Scenario,
    pub world: ChunkedWorld,
    pub entities: World,
    pub player: Entity,
}

impl Scenario {
    pub fn build(self, registry: &Registry, seed: u32) -> anyhow::Result<Setup> {
        let palette = Palette::resolve(registry)?;
        let world = ChunkedWorld::new((*palette.air).clone());

        let spawn = match self {
            Self::Flat | Self::Pool | Self::Ladder => {
                flat_world(&world, &palette);
                match self {
                    Self::Pool => {
                        world.fill(
                            BlockPos::new(-8, FLOOR_Y - 3, -24),
                            BlockPos::new(8, FLOOR_Y, 8),
                            &palette.water,
                        );
                        DVec3::new(0.5, f64::from(FLOOR_Y) - 1.0, 0.5)
                    }
                    Self::Ladder => {
                        let top = FLOOR_Y + 16;
                        world.fill(
                            BlockPos::new(-2, FLOOR_Y + 1, -2),
                            BlockPos::new(2, top, -2),
                            &palette.stone,
                        );
                        world.fill(
                            BlockPos::new(0, FLOOR_Y + 1, -1),
                            BlockPos::new(0, top, -1),
                            &palette.ladder,
                        );
                        DVec3::new(0.5, f64::from(FLOOR_Y + 1), 0.5)
                    }
                    _ => DVec3::new(0.5, f64::from(FLOOR_Y + 1), 0.5),
                }
            }
            Self::Terrain | Self::Glide => {
                let config = TerrainConfig {
                    seed,
                    ..TerrainConfig::default()
                };
                let generator = TerrainGenerator::new(config, palette.terrain());
                for cx in TERRAIN_CHUNKS_XZ {
                    for cz in TERRAIN_CHUNKS_XZ {
                        for cy in TERRAIN_CHUNKS_Y {
                            world.insert(generator.generate_chunk(ChunkPos::new(cx, cy, cz)));
                        }
                    }
                }
                if self == Self::Glide {
                    DVec3::new(0.5, GLIDE_START_Y, 0.5)
                } else {
                    let surface = generator
                        .height_at(0, 0)
                        .max(generator.config().sea_level);
                    DVec3::new(0.5, f64::from(surface + 1), 0.5)
                }
            }
        };

        let mut entities = World::new();
        let mut body = Body::at(spawn);
        let mut equipment = Equipment::default();
        let mut look = Look::default();
        if self == Self::Glide {
            let elytra = registry.item("elytra").context("registry has no elytra")?;
            equipment.chest = Some(ItemStack::new(elytra));
            body.elytra_flying = true;
            look.pitch = -0.15;
        }
        let player = entities.spawn((body, look, Controls::empty(), equipment));

        tracing::info!(
            scenario = ?self,
            chunks = world.len(),
            ?spawn,
            "Scenario ready"
        );
        Ok(Setup {
            scenario: self,
            world,
            entities,
            player,
        })
    }

    /// Input held during `tick`.
    pub fn controls(self, tick: u32) -> Controls {
        match self {
            Self::Flat => Controls::FORWARD | Controls::SPRINT | Controls::JUMP,
            Self::Terrain | Self::Ladder => Controls::FORWARD | Controls::JUMP,
            Self::Pool if tick < 60 => Controls::FORWARD | Controls::JUMP,
            Self::Pool => Controls::SNEAK,
            Self::Glide => Controls::empty(),
        }
    }
}

impl Setup {
    /// Apply the scripted input for `tick` to the player.
    pub fn script(&mut self, tick: u32) -> anyhow::Result<()> {
        let mut controls = self.entities.get::<&mut Controls>(self.player)?;
        *controls = self.scenario.controls(tick);
        drop(controls);

        if self.scenario == Scenario::Glide && tick == 40 {
            let mut body = self.entities.get::<&mut Body>(self.player)?;
            body.firework_ticks = 20;
            tracing::info!(tick, "Rocket boost");
        }
        Ok(())
    }
}

fn flat_world(world: &ChunkedWorld, palette: &Palette) {
    world.load_empty_region(
        BlockPos::new(-FLAT_RADIUS, 0, -FLAT_RADIUS),
        BlockPos::new(FLAT_RADIUS - 1, 95, FLAT_RADIUS - 1),
    );
    world.fill(
        BlockPos::new(-FLAT_RADIUS, FLOOR_Y - 4, -FLAT_RADIUS),
        BlockPos::new(FLAT_RADIUS - 1, FLOOR_Y, FLAT_RADIUS - 1),
        &palette.stone,
    );
}
