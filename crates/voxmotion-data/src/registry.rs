//! Name to id tables for a single game version.

use hashbrown::HashMap;
use serde::Deserialize;
use voxmotion_core::BlockTypeId;

use crate::error::Result;
use crate::features::FeatureTable;
use crate::version::GameVersion;

/// Registry tables of one game version plus its feature table.
#[derive(Clone, Debug)]
pub struct Registry {
    version: GameVersion,
    features: FeatureTable,
    blocks: HashMap<String, BlockTypeId>,
    items: HashMap<String, u32>,
    attributes: HashMap<String, u32>,
    effects: HashMap<String, u32>,
    enchantments: HashMap<String, u32>,
}

#[derive(Deserialize)]
struct RegistryDocument {
    version: String,
    #[serde(default)]
    blocks: HashMap<String, u32>,
    #[serde(default)]
    items: HashMap<String, u32>,
    #[serde(default)]
    attributes: HashMap<String, u32>,
    #[serde(default)]
    effects: HashMap<String, u32>,
    #[serde(default)]
    enchantments: HashMap<String, u32>,
}

impl Registry {
    /// Start building a registry for `version`.
    #[must_use]
    pub fn builder(version: GameVersion) -> RegistryBuilder {
        RegistryBuilder {
            registry: Self {
                version,
                features: FeatureTable::default(),
                blocks: HashMap::new(),
                items: HashMap::new(),
                attributes: HashMap::new(),
                effects: HashMap::new(),
                enchantments: HashMap::new(),
            },
        }
    }

    /// Load a registry document of the form
    /// `{"version": "1.20.4", "blocks": {"stone": 1}, "effects": {...}, ...}`.
    pub fn from_json(json: &str, features: FeatureTable) -> Result<Self> {
        let doc: RegistryDocument = serde_json::from_str(json)?;
        let version: GameVersion = doc.version.parse()?;
        let registry = Self {
            version,
            features,
            blocks: doc
                .blocks
                .into_iter()
                .map(|(name, id)| (name, BlockTypeId(id)))
                .collect(),
            items: doc.items,
            attributes: doc.attributes,
            effects: doc.effects,
            enchantments: doc.enchantments,
        };
        tracing::debug!(
            version = %registry.version,
            blocks = registry.blocks.len(),
            "Loaded registry"
        );
        Ok(registry)
    }

    /// Game version of these tables
    #[must_use]
    pub const fn version(&self) -> GameVersion {
        self.version
    }

    /// Feature table consulted for this version
    #[must_use]
    pub const fn features(&self) -> &FeatureTable {
        &self.features
    }

    /// Whether the named feature applies to this version
    #[must_use]
    pub fn supports_feature(&self, name: &str) -> bool {
        self.features.supports(name, &self.version)
    }

    /// Block id by name
    #[must_use]
    pub fn block(&self, name: &str) -> Option<BlockTypeId> {
        self.blocks.get(name).copied()
    }

    /// First block id found among alternative names (renamed across versions)
    #[must_use]
    pub fn block_any(&self, names: &[&str]) -> Option<BlockTypeId> {
        names.iter().find_map(|n| self.block(n))
    }

    /// All registered blocks as `(name, id)` pairs, in no particular order
    pub fn blocks(&self) -> impl Iterator<Item = (&str, BlockTypeId)> + '_ {
        self.blocks.iter().map(|(name, id)| (name.as_str(), *id))
    }

    /// Item id by name
    #[must_use]
    pub fn item(&self, name: &str) -> Option<u32> {
        self.items.get(name).copied()
    }

    /// Attribute id by name
    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<u32> {
        self.attributes.get(name).copied()
    }

    /// Status effect id by name
    #[must_use]
    pub fn effect(&self, name: &str) -> Option<u32> {
        self.effects.get(name).copied()
    }

    /// Enchantment id by name
    #[must_use]
    pub fn enchantment(&self, name: &str) -> Option<u32> {
        self.enchantments.get(name).copied()
    }

    /// Number of registered blocks
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

/// Builder for [`Registry`].
#[derive(Clone, Debug)]
pub struct RegistryBuilder {
    registry: Registry,
}

impl RegistryBuilder {
    /// Use this feature table
    #[must_use]
    pub fn features(mut self, features: FeatureTable) -> Self {
        self.registry.features = features;
        self
    }

    /// Register a block
    #[must_use]
    pub fn block(mut self, name: &str, id: u32) -> Self {
        self.registry.blocks.insert(name.to_owned(), BlockTypeId(id));
        self
    }

    /// Register an item
    #[must_use]
    pub fn item(mut self, name: &str, id: u32) -> Self {
        self.registry.items.insert(name.to_owned(), id);
        self
    }

    /// Register an attribute
    #[must_use]
    pub fn attribute(mut self, name: &str, id: u32) -> Self {
        self.registry.attributes.insert(name.to_owned(), id);
        self
    }

    /// Register a status effect
    #[must_use]
    pub fn effect(mut self, name: &str, id: u32) -> Self {
        self.registry.effects.insert(name.to_owned(), id);
        self
    }

    /// Register an enchantment
    #[must_use]
    pub fn enchantment(mut self, name: &str, id: u32) -> Self {
        self.registry.enchantments.insert(name.to_owned(), id);
        self
    }

    /// Finish building
    #[must_use]
    pub fn build(self) -> Registry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_registers_names() {
        let registry = Registry::builder(GameVersion::new(1, 20, 4))
            .block("stone", 1)
            .block("cobweb", 7)
            .effect("speed", 1)
            .enchantment("depth_strider", 8)
            .build();
        assert_eq!(registry.block("stone"), Some(BlockTypeId(1)));
        assert_eq!(registry.block("web"), None);
        assert_eq!(registry.block_any(&["web", "cobweb"]), Some(BlockTypeId(7)));
        assert_eq!(registry.effect("speed"), Some(1));
        assert_eq!(registry.enchantment("depth_strider"), Some(8));
        assert_eq!(registry.block_count(), 2);
        let mut names: Vec<_> = registry.blocks().map(|(name, _)| name).collect();
        names.sort_unstable();
        assert_eq!(names, ["cobweb", "stone"]);
    }

    #[test]
    fn loads_json_document() {
        let json = r#"{
            "version": "1.12.2",
            "blocks": {"air": 0, "water": 9, "flowing_water": 8},
            "attributes": {"generic.movement_speed": 3}
        }"#;
        let registry = Registry::from_json(json, FeatureTable::builtin().unwrap()).unwrap();
        assert_eq!(registry.version(), GameVersion::new(1, 12, 2));
        assert_eq!(registry.block("flowing_water"), Some(BlockTypeId(8)));
        assert_eq!(registry.attribute("generic.movement_speed"), Some(3));
        assert!(registry.supports_feature("independentLiquidGravity"));
        assert!(!registry.supports_feature("proportionalLiquidGravity"));
        assert!(registry.items.is_empty());
    }

    #[test]
    fn bad_version_is_rejected() {
        let json = r#"{"version": "latest"}"#;
        assert!(Registry::from_json(json, FeatureTable::default()).is_err());
    }
}
