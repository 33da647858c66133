//! Entity storage for physics sessions.
//!
//! Uses hecs as the ECS backend. Entities carry a [`Body`] and a [`Look`];
//! every other component is optional and defaults to "absent" when the
//! driver builds a snapshot.

mod driver;
mod ids;

use glam::DVec3;
use hashbrown::HashMap;
pub use hecs::{Entity, World};
use voxmotion_physics::{Attribute, Contacts};
pub use voxmotion_physics::Controls;

pub use driver::{PhysicsDriver, TickReport};
pub use ids::{EffectIds, EquipmentIds};

/// Physical state carried between ticks.
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub position: DVec3,
    pub velocity: DVec3,
    pub contacts: Contacts,
    pub elytra_flying: bool,
    /// One-shot jump request, consumed by the next tick
    pub jump_queued: bool,
    pub jump_ticks: u32,
    pub firework_ticks: u32,
    pub movement_speed: Attribute,
}

impl Body {
    /// A body at rest with the default player movement speed.
    #[must_use]
    pub fn at(position: DVec3) -> Self {
        Self {
            position,
            velocity: DVec3::ZERO,
            contacts: Contacts::default(),
            elytra_flying: false,
            jump_queued: false,
            jump_ticks: 0,
            firework_ticks: 0,
            movement_speed: Attribute::new(0.1),
        }
    }
}

/// Look angles in radians.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Look {
    pub yaw: f64,
    pub pitch: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pose {
    pub crawling: bool,
    pub swimming: bool,
}

/// Status effects by registry id, valued by amplifier (level - 1).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveEffects(pub HashMap<u32, u8>);

impl ActiveEffects {
    pub fn insert(&mut self, effect: u32, amplifier: u8) {
        self.0.insert(effect, amplifier);
    }

    pub fn remove(&mut self, effect: u32) {
        self.0.remove(&effect);
    }

    /// Effect level, 0 when absent.
    #[must_use]
    pub fn level(&self, effect: Option<u32>) -> u8 {
        effect
            .and_then(|id| self.0.get(&id))
            .map_or(0, |amplifier| amplifier.saturating_add(1))
    }
}

/// An equipped item and its enchantment levels.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemStack {
    pub item: u32,
    pub enchantments: HashMap<u32, u8>,
}

impl ItemStack {
    #[must_use]
    pub fn new(item: u32) -> Self {
        Self {
            item,
            enchantments: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_enchantment(mut self, enchantment: u32, level: u8) -> Self {
        self.enchantments.insert(enchantment, level);
        self
    }

    #[must_use]
    pub fn enchantment(&self, enchantment: Option<u32>) -> u8 {
        enchantment
            .and_then(|id| self.enchantments.get(&id))
            .copied()
            .unwrap_or(0)
    }
}

/// Armor slots that affect movement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Equipment {
    pub chest: Option<ItemStack>,
    pub feet: Option<ItemStack>,
}
