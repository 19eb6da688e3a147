//! Minimal inventory model the ingredient ledger works against.
//!
//! The host game owns the real item registry; [`CollectibleRegistry`] is the
//! narrow view of it recipe resolution needs, and [`CollectibleTable`] is a
//! plain in-memory implementation for tools and tests.

use schematic_core::AssetCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// Whether a code names an item or a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemClass {
    #[default]
    Item,
    Block,
}

/// A stack of one collectible.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemStack {
    #[serde(rename = "type", default)]
    pub class: ItemClass,
    pub code: AssetCode,
    pub stack_size: u32,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
    /// Remaining durability for tools. `None` for collectibles without durability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durability: Option<u32>,
    /// Liquid held by a container stack. `None` when empty or not a container.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub liquid: Option<Box<ItemStack>>,
}

impl ItemStack {
    pub fn new(class: ItemClass, code: AssetCode, stack_size: u32) -> Self {
        Self {
            class,
            code,
            stack_size,
            attributes: Map::new(),
            durability: None,
            liquid: None,
        }
    }

    pub fn item(code: AssetCode, stack_size: u32) -> Self {
        Self::new(ItemClass::Item, code, stack_size)
    }

    pub fn block(code: AssetCode, stack_size: u32) -> Self {
        Self::new(ItemClass::Block, code, stack_size)
    }

    pub fn with_durability(mut self, durability: u32) -> Self {
        self.durability = Some(durability);
        self
    }

    pub fn with_liquid(mut self, liquid: ItemStack) -> Self {
        self.liquid = Some(Box::new(liquid));
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// Durability left before the tool breaks; `0` for collectibles without durability.
    pub fn remaining_durability(&self) -> u32 {
        self.durability.unwrap_or(0)
    }
}

/// One inventory slot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemSlot {
    pub stack: Option<ItemStack>,
}

impl ItemSlot {
    pub fn new(stack: ItemStack) -> Self {
        Self { stack: Some(stack) }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_none()
    }

    /// Take `amount` items from the stack, emptying the slot when none remain.
    pub fn take(&mut self, amount: u32) {
        if let Some(stack) = &mut self.stack {
            stack.stack_size = stack.stack_size.saturating_sub(amount);
            if stack.stack_size == 0 {
                self.stack = None;
            }
        }
    }

    /// Drain `amount` units of held liquid, clearing the content when none remain.
    pub fn drain_liquid(&mut self, amount: u32) {
        let Some(stack) = &mut self.stack else {
            return;
        };
        if let Some(liquid) = &mut stack.liquid {
            liquid.stack_size = liquid.stack_size.saturating_sub(amount);
            if liquid.stack_size == 0 {
                stack.liquid = None;
            }
        }
    }
}

// ─── Tool damage ─────────────────────────────────────────────────────────────

/// Receives tool wear while recipe inputs are consumed.
///
/// Hosts implement this to route damage through their own item logic
/// (break sounds, stat tracking...). [`ApplyDamage`] is the plain version.
pub trait DamageSink {
    /// Damage the tool held in `slot` (at `slot_index` of the consumed inventory) by `amount`.
    fn damage(&mut self, slot_index: usize, slot: &mut ItemSlot, amount: u32);
}

/// Subtracts durability directly and empties the slot once a tool is worn out.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApplyDamage;

impl DamageSink for ApplyDamage {
    fn damage(&mut self, _slot_index: usize, slot: &mut ItemSlot, amount: u32) {
        let Some(stack) = &mut slot.stack else {
            return;
        };
        let remaining = stack.remaining_durability().saturating_sub(amount);
        if remaining == 0 {
            slot.stack = None;
        } else {
            stack.durability = Some(remaining);
        }
    }
}

// ─── Registry ────────────────────────────────────────────────────────────────

/// Properties of a collectible that can be held as a liquid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidProps {
    pub items_per_litre: f32,
}

/// The host's collectible registry, as far as recipe resolution needs it.
pub trait CollectibleRegistry {
    /// `true` if `code` names a registered collectible of `class`.
    fn contains(&self, class: ItemClass, code: &AssetCode) -> bool;

    /// Liquid properties for `code`, or `None` if it is not a liquid.
    fn liquid_props(&self, code: &AssetCode) -> Option<LiquidProps>;
}

/// In-memory [`CollectibleRegistry`].
#[derive(Debug, Clone, Default)]
pub struct CollectibleTable {
    entries: HashMap<(ItemClass, AssetCode), Option<LiquidProps>>,
}

impl CollectibleTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, class: ItemClass, code: AssetCode) -> &mut Self {
        self.entries.insert((class, code), None);
        self
    }

    pub fn insert_liquid(&mut self, code: AssetCode, items_per_litre: f32) -> &mut Self {
        self.entries
            .insert((ItemClass::Item, code), Some(LiquidProps { items_per_litre }));
        self
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl CollectibleRegistry for CollectibleTable {
    fn contains(&self, class: ItemClass, code: &AssetCode) -> bool {
        self.entries.contains_key(&(class, code.clone()))
    }

    fn liquid_props(&self, code: &AssetCode) -> Option<LiquidProps> {
        [ItemClass::Item, ItemClass::Block]
            .into_iter()
            .find_map(|class| self.entries.get(&(class, code.clone())).copied().flatten())
    }
}
