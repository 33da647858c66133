//! Entity attributes with keyed modifiers.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Modifier key for sprinting.
pub const SPRINT_MODIFIER: Uuid = Uuid::from_u128(0x662a_6b8d_da3e_4c1c_8813_96ea_6097_278d);
/// Modifier key for the speed effect.
pub const SPEED_MODIFIER: Uuid = Uuid::from_u128(0x91ae_aa56_376b_4498_935b_2f7f_6807_0635);
/// Modifier key for the slowness effect.
pub const SLOWNESS_MODIFIER: Uuid = Uuid::from_u128(0x7107_de5e_7ce8_4030_940e_514c_1f16_0890);
/// Modifier key for sneaking and crawling.
pub const SNEAK_MODIFIER: Uuid = Uuid::from_u128(0x3c1a_6d4e_8b0f_4f5c_a2d7_5e9b_0c41_7a26);

/// How a modifier combines with the attribute value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum ModifierOperation {
    /// Added to the base value
    Add,
    /// Adds `amount` times the post-addition value
    MultiplyBase,
    /// Multiplies the running total by `1 + amount`
    MultiplyTotal,
}

impl From<ModifierOperation> for u8 {
    fn from(op: ModifierOperation) -> Self {
        match op {
            ModifierOperation::Add => 0,
            ModifierOperation::MultiplyBase => 1,
            ModifierOperation::MultiplyTotal => 2,
        }
    }
}

impl TryFrom<u8> for ModifierOperation {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Add),
            1 => Ok(Self::MultiplyBase),
            2 => Ok(Self::MultiplyTotal),
            other => Err(format!("unknown modifier operation {other}")),
        }
    }
}

/// A keyed change to an attribute.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttributeModifier {
    pub id: Uuid,
    pub amount: f64,
    pub operation: ModifierOperation,
}

impl AttributeModifier {
    #[must_use]
    pub const fn new(id: Uuid, amount: f64, operation: ModifierOperation) -> Self {
        Self {
            id,
            amount,
            operation,
        }
    }
}

/// Base value plus an ordered modifier list. At most one modifier per key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub base: f64,
    pub modifiers: Vec<AttributeModifier>,
}

impl Attribute {
    #[must_use]
    pub const fn new(base: f64) -> Self {
        Self {
            base,
            modifiers: Vec::new(),
        }
    }

    /// Whether a modifier with key `id` is present.
    #[must_use]
    pub fn has_modifier(&self, id: Uuid) -> bool {
        self.modifiers.iter().any(|m| m.id == id)
    }

    /// Insert `modifier`, replacing any modifier with the same key in place.
    pub fn set_modifier(&mut self, modifier: AttributeModifier) {
        match self.modifiers.iter_mut().find(|m| m.id == modifier.id) {
            Some(existing) => *existing = modifier,
            None => self.modifiers.push(modifier),
        }
    }

    /// Remove the modifier keyed `id`, returning it.
    pub fn remove_modifier(&mut self, id: Uuid) -> Option<AttributeModifier> {
        let index = self.modifiers.iter().position(|m| m.id == id)?;
        Some(self.modifiers.remove(index))
    }

    /// Set the modifier keyed `id` when `amount` is `Some`, remove it otherwise.
    pub fn toggle_modifier(&mut self, id: Uuid, amount: Option<f64>, operation: ModifierOperation) {
        match amount {
            Some(amount) => self.set_modifier(AttributeModifier::new(id, amount, operation)),
            None => {
                self.remove_modifier(id);
            }
        }
    }

    /// Fold the modifiers: additions, then multiply-base, then multiply-total,
    /// each group in list order.
    #[must_use]
    pub fn value(&self) -> f64 {
        let added = self.base
            + self
                .with_operation(ModifierOperation::Add)
                .map(|m| m.amount)
                .sum::<f64>();
        let mut value = added;
        for m in self.with_operation(ModifierOperation::MultiplyBase) {
            value += added * m.amount;
        }
        for m in self.with_operation(ModifierOperation::MultiplyTotal) {
            value *= 1.0 + m.amount;
        }
        value
    }

    fn with_operation(
        &self,
        operation: ModifierOperation,
    ) -> impl Iterator<Item = &AttributeModifier> + '_ {
        self.modifiers.iter().filter(move |m| m.operation == operation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn base_value_without_modifiers() {
        assert_relative_eq!(Attribute::new(0.1).value(), 0.1);
    }

    #[test]
    fn operations_fold_in_order() {
        let mut attr = Attribute::new(1.0);
        attr.set_modifier(AttributeModifier::new(
            Uuid::from_u128(3),
            0.5,
            ModifierOperation::MultiplyTotal,
        ));
        attr.set_modifier(AttributeModifier::new(Uuid::from_u128(1), 1.0, ModifierOperation::Add));
        attr.set_modifier(AttributeModifier::new(
            Uuid::from_u128(2),
            0.5,
            ModifierOperation::MultiplyBase,
        ));
        // (1 + 1) = 2, + 2 * 0.5 = 3, * 1.5 = 4.5
        assert_relative_eq!(attr.value(), 4.5);
    }

    #[test]
    fn sprint_modifier() {
        let mut attr = Attribute::new(0.1);
        attr.toggle_modifier(SPRINT_MODIFIER, Some(0.3), ModifierOperation::MultiplyTotal);
        assert_relative_eq!(attr.value(), 0.13);
        assert!(attr.has_modifier(SPRINT_MODIFIER));

        attr.toggle_modifier(SPRINT_MODIFIER, None, ModifierOperation::MultiplyTotal);
        assert!(!attr.has_modifier(SPRINT_MODIFIER));
        assert_relative_eq!(attr.value(), 0.1);
    }

    #[test]
    fn same_key_replaces() {
        let mut attr = Attribute::new(0.1);
        attr.set_modifier(AttributeModifier::new(SPEED_MODIFIER, 0.2, ModifierOperation::MultiplyTotal));
        attr.set_modifier(AttributeModifier::new(SPEED_MODIFIER, 0.4, ModifierOperation::MultiplyTotal));
        assert_eq!(attr.modifiers.len(), 1);
        assert_relative_eq!(attr.value(), 0.14);
    }

    #[test]
    fn operation_codes() {
        assert_eq!(u8::from(ModifierOperation::MultiplyBase), 1);
        assert_eq!(ModifierOperation::try_from(2), Ok(ModifierOperation::MultiplyTotal));
        assert!(ModifierOperation::try_from(3).is_err());
    }
}
