//! Registry ids the driver needs, resolved once per session.

use voxmotion_data::Registry;

fn lookup(kind: &str, name: &str, id: Option<u32>) -> Option<u32> {
    if id.is_none() {
        tracing::warn!(kind, name, "Registry has no entry, ignoring it");
    }
    id
}

/// Status effect ids that change movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EffectIds {
    pub speed: Option<u32>,
    pub slowness: Option<u32>,
    pub jump_boost: Option<u32>,
    pub levitation: Option<u32>,
    pub slow_falling: Option<u32>,
    pub dolphins_grace: Option<u32>,
}

impl EffectIds {
    #[must_use]
    pub fn resolve(registry: &Registry) -> Self {
        let effect = |name| lookup("effect", name, registry.effect(name));
        Self {
            speed: effect("speed"),
            slowness: effect("slowness"),
            jump_boost: effect("jump_boost"),
            levitation: effect("levitation"),
            slow_falling: effect("slow_falling"),
            dolphins_grace: effect("dolphins_grace"),
        }
    }
}

/// Item and enchantment ids read from equipment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EquipmentIds {
    pub elytra: Option<u32>,
    pub depth_strider: Option<u32>,
}

impl EquipmentIds {
    #[must_use]
    pub fn resolve(registry: &Registry) -> Self {
        Self {
            elytra: lookup("item", "elytra", registry.item("elytra")),
            depth_strider: lookup(
                "enchantment",
                "depth_strider",
                registry.enchantment("depth_strider"),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voxmotion_data::GameVersion;
    use voxmotion_test::{fixture_registry, ids};

    #[test]
    fn resolves_fixture_ids() {
        let registry = fixture_registry("1.20.4");
        let effects = EffectIds::resolve(&registry);
        assert_eq!(effects.speed, Some(ids::SPEED));
        assert_eq!(effects.dolphins_grace, Some(ids::DOLPHINS_GRACE));
        let equipment = EquipmentIds::resolve(&registry);
        assert_eq!(equipment.elytra, Some(ids::ELYTRA));
        assert_eq!(equipment.depth_strider, Some(ids::DEPTH_STRIDER));
    }

    #[test]
    fn missing_names_resolve_to_none() {
        let registry = Registry::builder(GameVersion::new(1, 8, 9))
            .effect("speed", 1)
            .build();
        let effects = EffectIds::resolve(&registry);
        assert_eq!(effects.speed, Some(1));
        assert_eq!(effects.dolphins_grace, None);
        assert_eq!(EquipmentIds::resolve(&registry), EquipmentIds::default());
    }
}
