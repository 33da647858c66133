//! Version-keyed game data for the voxmotion simulation.
//!
//! The physics engine never looks names up while simulating. Instead it is
//! constructed from a [`Registry`], which maps block, item, attribute, effect
//! and enchantment names to the numeric ids of one game version, and a
//! [`FeatureTable`], which says which behaviour switches apply to that version.
//!
//! # Core Types
//!
//! - [`GameVersion`]: Parsed release version with its major line (`1.20.4` → `1.20`)
//! - [`Registry`]: Name to id tables for one version
//! - [`FeatureTable`]: `{name, versions}` entries, loaded from JSON

mod error;
mod features;
mod registry;
mod version;

pub use error::{DataError, Result};
pub use features::{Feature, FeatureTable};
pub use registry::{Registry, RegistryBuilder};
pub use version::GameVersion;
