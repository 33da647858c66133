//! Version-gated behaviour switches.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::version::GameVersion;

const BUILTIN_FEATURES: &str = include_str!("../data/features.json");

/// A named behaviour switch and the major versions it applies to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feature {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub versions: Vec<String>,
}

/// Collection of [`Feature`] entries.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureTable {
    features: Vec<Feature>,
}

impl FeatureTable {
    /// The table shipped with this crate.
    pub fn builtin() -> Result<Self> {
        Self::from_json(BUILTIN_FEATURES)
    }

    /// Parse a table from a JSON array of `{name, versions}` objects.
    pub fn from_json(json: &str) -> Result<Self> {
        let features: Vec<Feature> = serde_json::from_str(json)?;
        Ok(Self { features })
    }

    /// Build a table from already-constructed entries.
    #[must_use]
    pub const fn from_features(features: Vec<Feature>) -> Self {
        Self { features }
    }

    /// Whether `name` applies to `version`.
    ///
    /// Unknown feature names are simply unsupported.
    #[must_use]
    pub fn supports(&self, name: &str, version: &GameVersion) -> bool {
        let major = version.major_version();
        self.features
            .iter()
            .any(|f| f.name == name && f.versions.iter().any(|v| *v == major))
    }

    /// Whether an entry named `name` exists at all.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.features.iter().any(|f| f.name == name)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}
