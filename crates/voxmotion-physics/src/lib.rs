//! Per-tick player movement for block worlds.
//!
//! [`PhysicsEngine`] is built once per game version from a
//! [`voxmotion_data::Registry`]. Each call to [`PhysicsEngine::simulate`]
//! advances an [`EntitySnapshot`] by one 50 ms tick against any
//! [`voxmotion_world::BlockAccess`]:
//!
//! 1. liquid detection and water currents
//! 2. jump handling
//! 3. one movement model (liquid, elytra or terrestrial)
//! 4. swept collision with step-up and block contact effects

pub mod attribute;
pub mod classify;
pub mod collision;
pub mod constants;
pub mod engine;
pub mod error;
mod jump;
pub mod liquid;
mod movement;
pub mod snapshot;

pub use attribute::{
    Attribute, AttributeModifier, ModifierOperation, SLOWNESS_MODIFIER, SNEAK_MODIFIER,
    SPEED_MODIFIER, SPRINT_MODIFIER,
};
pub use classify::{BlockCategory, BlockClasses};
pub use collision::Observer;
pub use constants::{BubbleDrag, LiquidGravity, PhysicsConstants, PlayerDimensions};
pub use engine::{PhysicsEngine, VersionFeatures};
pub use error::{PhysicsError, Result};
pub use movement::elytra_gravity_term;
pub use snapshot::{Contacts, Controls, EffectLevels, EntitySnapshot, TickOutcome};
