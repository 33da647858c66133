//! Block types as observed by the movement simulation.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::coords::BlockPos;
use crate::math::Aabb;

/// Numeric block type identifier, assigned per game version by the registry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(transparent)]
pub struct BlockTypeId(pub u32);

impl BlockTypeId {
    /// Air is id 0 in every version table.
    pub const AIR: Self = Self(0);
}

/// Value of a single block-state property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Int(i32),
    Enum(String),
}

impl From<bool> for PropertyValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for PropertyValue {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<&str> for PropertyValue {
    fn from(v: &str) -> Self {
        Self::Enum(v.to_owned())
    }
}

/// Immutable description of a block state, shared between every voxel using it.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BlockState {
    /// Block type
    pub type_id: BlockTypeId,
    /// Legacy metadata nibble (liquid level, bubble column drag, ...)
    pub metadata: u8,
    /// Collision shapes in block-local space (0..1 per axis for full cubes)
    pub shapes: Vec<Aabb>,
    /// Named state properties
    pub properties: BTreeMap<String, PropertyValue>,
    /// Whether the block also contains a water source
    pub waterlogged: bool,
}

impl BlockState {
    /// A state without collision shapes
    #[must_use]
    pub fn empty(type_id: BlockTypeId) -> Self {
        Self {
            type_id,
            ..Self::default()
        }
    }

    /// A state with a single full-cube shape
    #[must_use]
    pub fn full_cube(type_id: BlockTypeId) -> Self {
        Self {
            type_id,
            shapes: vec![Aabb::from_array([0.0, 0.0, 0.0, 1.0, 1.0, 1.0])],
            ..Self::default()
        }
    }

    /// Set the metadata nibble
    #[must_use]
    pub fn with_metadata(mut self, metadata: u8) -> Self {
        self.metadata = metadata;
        self
    }

    /// Replace the collision shapes
    #[must_use]
    pub fn with_shapes(mut self, shapes: Vec<Aabb>) -> Self {
        self.shapes = shapes;
        self
    }

    /// Add a state property
    #[must_use]
    pub fn with_property(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.to_owned(), value.into());
        self
    }

    /// Mark the state as waterlogged
    #[must_use]
    pub fn waterlogged(mut self) -> Self {
        self.waterlogged = true;
        self
    }

    /// Whether the state has any collision shape
    #[inline]
    #[must_use]
    pub fn is_solid(&self) -> bool {
        !self.shapes.is_empty()
    }

    /// Boolean property, `false` when absent or not a boolean
    #[must_use]
    pub fn flag(&self, name: &str) -> bool {
        matches!(self.properties.get(name), Some(PropertyValue::Bool(true)))
    }

    /// Enum-valued property as a string slice
    #[must_use]
    pub fn enum_property(&self, name: &str) -> Option<&str> {
        match self.properties.get(name) {
            Some(PropertyValue::Enum(s)) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// A block state placed at a world position.
#[derive(Clone, Debug, PartialEq)]
pub struct Block {
    /// World position of the voxel
    pub position: BlockPos,
    /// Shared block state
    pub state: Arc<BlockState>,
}

impl Block {
    /// Create a block from a shared state
    #[must_use]
    pub const fn new(position: BlockPos, state: Arc<BlockState>) -> Self {
        Self { position, state }
    }

    /// Block type id
    #[inline]
    #[must_use]
    pub fn type_id(&self) -> BlockTypeId {
        self.state.type_id
    }

    /// Metadata nibble
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> u8 {
        self.state.metadata
    }

    /// Collision shapes translated to world space
    pub fn world_shapes(&self) -> impl Iterator<Item = Aabb> + '_ {
        let origin = self.position.to_dvec3();
        self.state
            .shapes
            .iter()
            .map(move |s| s.offset(origin.x, origin.y, origin.z))
    }
}
