//! Block ids the movement models treat specially, resolved once per registry.

use hashbrown::HashMap;
use voxmotion_core::BlockTypeId;
use voxmotion_data::Registry;

use crate::error::{PhysicsError, Result};

/// Closed set of block behaviours the simulation distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BlockCategory {
    Air,
    Water,
    Lava,
    /// Plants that always hold water (seagrass, kelp)
    WaterPlant,
    SoulSand,
    Honey,
    Cobweb,
    Ladder,
    Vine,
    BubbleColumn,
    Slime,
    Scaffolding,
    Trapdoor,
}

impl BlockCategory {
    /// Counts as a full water source regardless of metadata.
    #[inline]
    #[must_use]
    pub const fn is_water_like(self) -> bool {
        matches!(self, Self::WaterPlant | Self::BubbleColumn)
    }
}

/// Blocks that must exist in every supported version, with renamed aliases.
const REQUIRED: &[(&[&str], BlockCategory)] = &[
    (&["water"], BlockCategory::Water),
    (&["lava"], BlockCategory::Lava),
    (&["soul_sand"], BlockCategory::SoulSand),
    (&["ladder"], BlockCategory::Ladder),
    (&["vine"], BlockCategory::Vine),
    (&["cobweb", "web"], BlockCategory::Cobweb),
    (&["slime_block", "slime"], BlockCategory::Slime),
];

const OPTIONAL: &[(&str, BlockCategory)] = &[
    ("air", BlockCategory::Air),
    ("cave_air", BlockCategory::Air),
    ("void_air", BlockCategory::Air),
    ("flowing_water", BlockCategory::Water),
    ("flowing_lava", BlockCategory::Lava),
    ("seagrass", BlockCategory::WaterPlant),
    ("tall_seagrass", BlockCategory::WaterPlant),
    ("kelp", BlockCategory::WaterPlant),
    ("kelp_plant", BlockCategory::WaterPlant),
    ("honey_block", BlockCategory::Honey),
    ("bubble_column", BlockCategory::BubbleColumn),
    ("scaffolding", BlockCategory::Scaffolding),
];

const REQUIRED_SLIPPERY: &[(&str, f64)] = &[("ice", 0.98), ("packed_ice", 0.98)];

const OPTIONAL_SLIPPERY: &[(&[&str], f64)] = &[
    (&["slime_block", "slime"], 0.8),
    (&["frosted_ice"], 0.98),
    (&["blue_ice"], 0.989),
];

/// Block id lookup tables for one registry.
#[derive(Debug, Clone)]
pub struct BlockClasses {
    categories: HashMap<BlockTypeId, BlockCategory>,
    slipperiness: HashMap<BlockTypeId, f64>,
}

impl BlockClasses {
    /// Resolve every special block in `registry`.
    ///
    /// Optional blocks missing from the registry are left out and never match.
    pub fn resolve(registry: &Registry) -> Result<Self> {
        let mut categories = HashMap::new();
        let mut slipperiness = HashMap::new();

        for (names, category) in REQUIRED {
            let id = registry
                .block_any(names)
                .ok_or_else(|| PhysicsError::MissingBlock(names[0].to_owned()))?;
            categories.insert(id, *category);
        }
        for (name, category) in OPTIONAL {
            if let Some(id) = registry.block(name) {
                categories.insert(id, *category);
            }
        }
        for (name, id) in registry.blocks() {
            if name.ends_with("trapdoor") {
                categories.insert(id, BlockCategory::Trapdoor);
            }
        }

        for (name, value) in REQUIRED_SLIPPERY {
            let id = registry
                .block(name)
                .ok_or_else(|| PhysicsError::MissingBlock((*name).to_owned()))?;
            slipperiness.insert(id, *value);
        }
        for (names, value) in OPTIONAL_SLIPPERY {
            if let Some(id) = registry.block_any(names) {
                slipperiness.insert(id, *value);
            }
        }

        Ok(Self {
            categories,
            slipperiness,
        })
    }

    /// Category of a block id, if it is special at all.
    #[inline]
    #[must_use]
    pub fn category(&self, id: BlockTypeId) -> Option<BlockCategory> {
        self.categories.get(&id).copied()
    }

    #[inline]
    #[must_use]
    pub fn is(&self, id: BlockTypeId, category: BlockCategory) -> bool {
        self.category(id) == Some(category)
    }

    /// Air, or the reserved air id when the registry names none.
    #[inline]
    #[must_use]
    pub fn is_air(&self, id: BlockTypeId) -> bool {
        id == BlockTypeId::AIR || self.is(id, BlockCategory::Air)
    }

    /// Slipperiness of a block, if it differs from the default.
    #[inline]
    #[must_use]
    pub fn slipperiness(&self, id: BlockTypeId) -> Option<f64> {
        self.slipperiness.get(&id).copied()
    }

    /// Number of classified block ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.categories.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
