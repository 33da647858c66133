//! Procedural terrain used by the replay harness and benches.

use std::sync::Arc;

use noise::{Fbm, MultiFractal, NoiseFn, Perlin};
use voxmotion_core::constants::CHUNK_SIZE;
use voxmotion_core::coords::{ChunkPos, LocalPos};
use voxmotion_core::BlockState;

use crate::chunk::Chunk;

/// Terrain generator configuration.
#[derive(Debug, Clone)]
pub struct TerrainConfig {
    /// Seed for noise generation.
    pub seed: u32,
    /// Water fills air up to and including this Y.
    pub sea_level: i32,
    /// Lowest surface Y the noise maps to.
    pub base_height: i32,
    /// Horizontal scale of terrain features.
    pub terrain_scale: f64,
    /// Maximum terrain height variation.
    pub terrain_height: f64,
    /// Number of noise octaves for detail.
    pub octaves: usize,
    /// Frequency multiplier between octaves.
    pub lacunarity: f64,
    /// Amplitude multiplier between octaves.
    pub persistence: f64,
    /// Depth of dirt layer below surface.
    pub dirt_depth: i32,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            sea_level: 62,
            base_height: 56,
            terrain_scale: 100.0,
            terrain_height: 16.0,
            octaves: 4,
            lacunarity: 2.0,
            persistence: 0.5,
            dirt_depth: 3,
        }
    }
}

/// Block states placed by the generator.
#[derive(Debug, Clone)]
pub struct TerrainPalette {
    pub air: Arc<BlockState>,
    pub stone: Arc<BlockState>,
    pub dirt: Arc<BlockState>,
    pub grass: Arc<BlockState>,
    /// Still water source, used below sea level.
    pub water: Arc<BlockState>,
}

/// Heightmap terrain generator using fractal noise.
pub struct TerrainGenerator {
    config: TerrainConfig,
    palette: TerrainPalette,
    height_noise: Fbm<Perlin>,
}

impl TerrainGenerator {
    /// Create a new terrain generator.
    #[must_use]
    pub fn new(config: TerrainConfig, palette: TerrainPalette) -> Self {
        let height_noise = Fbm::<Perlin>::new(config.seed)
            .set_octaves(config.octaves)
            .set_lacunarity(config.lacunarity)
            .set_persistence(config.persistence);

        Self {
            config,
            palette,
            height_noise,
        }
    }

    /// Get the terrain configuration.
    #[must_use]
    pub const fn config(&self) -> &TerrainConfig {
        &self.config
    }

    /// Surface Y at world XZ coordinates.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn height_at(&self, world_x: i32, world_z: i32) -> i32 {
        let nx = f64::from(world_x) / self.config.terrain_scale;
        let nz = f64::from(world_z) / self.config.terrain_scale;

        // Noise returns [-1, 1], map to [0, terrain_height]
        let noise_value = self.height_noise.get([nx, nz]).clamp(-1.0, 1.0);
        ((noise_value + 1.0) * 0.5 * self.config.terrain_height) as i32 + self.config.base_height
    }

    fn state_at(&self, world_y: i32, surface: i32) -> &Arc<BlockState> {
        let p = &self.palette;
        if world_y > surface {
            if world_y <= self.config.sea_level {
                &p.water
            } else {
                &p.air
            }
        } else if world_y == surface && surface >= self.config.sea_level {
            &p.grass
        } else if world_y > surface - self.config.dirt_depth {
            &p.dirt
        } else {
            &p.stone
        }
    }

    /// Generate a chunk at the given position.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn generate_chunk(&self, pos: ChunkPos) -> Chunk {
        let mut chunk = Chunk::filled(pos, Arc::clone(&self.palette.air));
        let base = pos.min_block();

        for lz in 0..CHUNK_SIZE {
            for lx in 0..CHUNK_SIZE {
                let surface = self.height_at(base.x + lx as i32, base.z + lz as i32);
                for ly in 0..CHUNK_SIZE {
                    let state = self.state_at(base.y + ly as i32, surface);
                    if !Arc::ptr_eq(state, &self.palette.air) {
                        chunk.set(
                            LocalPos::new(lx as u8, ly as u8, lz as u8),
                            Arc::clone(state),
                        );
                    }
                }
            }
        }

        tracing::trace!(?pos, palette = chunk.palette_len(), "Generated chunk");
        chunk
    }
}
