//! Core types, math, and traits for the voxmotion simulation.
//!
//! This crate provides the foundational types used throughout the workspace:
//! - Axis-aligned bounding boxes with swept-collision offsets
//! - Block positions and chunk coordinates
//! - Block states as seen by the physics engine

pub mod coords;
pub mod math;
pub mod types;

pub use coords::{BlockPos, ChunkPos, LocalPos};
pub use math::{clamp, Aabb};
pub use types::{Block, BlockState, BlockTypeId, PropertyValue};

/// Workspace-wide constants
pub mod constants {
    /// Size of a chunk in voxels per axis
    pub const CHUNK_SIZE: usize = 16;
    /// Total voxels in a chunk (16^3)
    pub const CHUNK_SIZE_CUBED: usize = CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE;
    /// Bits needed to represent position within a chunk (4 bits for 0-15)
    pub const CHUNK_BITS: u32 = 4;
}
