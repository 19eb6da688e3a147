//! Inventory matching and consumption for resolved ingredients.
//!
//! Ingredients are split into three pools (items, tools, liquids) each holding
//! a remaining weight. Every non-empty slot is charged against the pools in
//! that order, walking each pool from the back. An ingredient leaves its pool
//! once its weight reaches zero; the inventory matches when all pools drain.
//! Matching and consuming share the same walk: consuming replays the recorded
//! per-slot charges onto the slots.

use crate::{DamageSink, IngredientKind, ItemSlot, ItemStack, ResolvedIngredient};

#[derive(Debug, Clone)]
struct Pending<'r> {
    ingredient: &'r ResolvedIngredient,
    remaining: u32,
}

/// What one stack gives up to the recipe.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotCharge {
    /// Items taken from the stack.
    pub items: u32,
    /// Durability taken from the stack as a tool.
    pub durability: u32,
    /// Units drained from the stack's liquid content.
    pub liquid: u32,
}

impl SlotCharge {
    pub fn is_empty(&self) -> bool {
        self.items == 0 && self.durability == 0 && self.liquid == 0
    }
}

/// Outstanding ingredient weights of one recipe.
#[derive(Debug, Clone)]
pub struct IngredientLedger<'r> {
    items: Vec<Pending<'r>>,
    tools: Vec<Pending<'r>>,
    liquids: Vec<Pending<'r>>,
}

impl<'r> IngredientLedger<'r> {
    pub fn new(ingredients: &'r [ResolvedIngredient]) -> Self {
        let mut ledger = Self {
            items: Vec::new(),
            tools: Vec::new(),
            liquids: Vec::new(),
        };
        for ingredient in ingredients {
            let pending = Pending {
                ingredient,
                remaining: ingredient.weight,
            };
            match ingredient.kind {
                IngredientKind::Item => ledger.items.push(pending),
                IngredientKind::Tool => ledger.tools.push(pending),
                IngredientKind::Liquid => ledger.liquids.push(pending),
            }
        }
        ledger
    }

    /// `true` once every ingredient has been fully paid for.
    pub fn is_settled(&self) -> bool {
        self.items.is_empty() && self.tools.is_empty() && self.liquids.is_empty()
    }

    /// Number of ingredients still outstanding.
    pub fn outstanding(&self) -> usize {
        self.items.len() + self.tools.len() + self.liquids.len()
    }

    /// Charge `stack` against the outstanding ingredients.
    pub fn charge(&mut self, stack: &ItemStack) -> SlotCharge {
        let mut charge = SlotCharge {
            items: draw(&mut self.items, stack, stack.stack_size),
            ..SlotCharge::default()
        };
        if charge.items == stack.stack_size {
            return charge;
        }

        // Durability is only read once a tool ingredient accepts the stack.
        let mut durability: Option<u32> = None;
        for i in (0..self.tools.len()).rev() {
            if !self.tools[i].ingredient.satisfies(stack) {
                continue;
            }
            let left = durability.get_or_insert_with(|| stack.remaining_durability());
            *left -= settle(&mut self.tools, i, *left);
            if *left == 0 {
                break;
            }
        }
        if let Some(left) = durability {
            charge.durability = stack.remaining_durability() - left;
            if left == 0 {
                return charge;
            }
        }

        if !self.liquids.is_empty() {
            if let Some(liquid) = &stack.liquid {
                charge.liquid = draw(&mut self.liquids, liquid, liquid.stack_size);
            }
        }
        charge
    }

    /// Charge every slot in order and return the per-slot charges if the ledger settles.
    pub fn charge_slots(mut self, slots: &[ItemSlot]) -> Option<Vec<SlotCharge>> {
        let charges = slots
            .iter()
            .map(|slot| match &slot.stack {
                Some(stack) => self.charge(stack),
                None => SlotCharge::default(),
            })
            .collect();
        self.is_settled().then_some(charges)
    }
}

/// Pay `pool` from a stack offering `budget`, returning how much was taken.
fn draw(pool: &mut Vec<Pending<'_>>, stack: &ItemStack, budget: u32) -> u32 {
    let mut left = budget;
    for i in (0..pool.len()).rev() {
        if pool[i].ingredient.satisfies(stack) {
            left -= settle(pool, i, left);
            if left == 0 {
                break;
            }
        }
    }
    budget - left
}

/// Pay up to `amount` towards `pool[index]`, dropping it once paid in full.
fn settle(pool: &mut Vec<Pending<'_>>, index: usize, amount: u32) -> u32 {
    let consumed = amount.min(pool[index].remaining);
    pool[index].remaining -= consumed;
    if pool[index].remaining == 0 {
        pool.remove(index);
    }
    consumed
}

/// `true` if `slots` hold everything `ingredients` ask for.
pub fn matches(ingredients: &[ResolvedIngredient], slots: &[ItemSlot]) -> bool {
    IngredientLedger::new(ingredients).charge_slots(slots).is_some()
}

/// Take `ingredients` out of `slots`, routing tool wear through `sink`.
///
/// Does nothing and returns `false` if the slots do not match.
pub fn consume(
    ingredients: &[ResolvedIngredient],
    slots: &mut [ItemSlot],
    sink: &mut dyn DamageSink,
) -> bool {
    let Some(charges) = IngredientLedger::new(ingredients).charge_slots(slots) else {
        return false;
    };
    for (index, (slot, charge)) in slots.iter_mut().zip(charges).enumerate() {
        if charge.items > 0 {
            slot.take(charge.items);
        }
        if charge.durability > 0 {
            sink.damage(index, slot, charge.durability);
        }
        if charge.liquid > 0 {
            slot.drain_liquid(charge.liquid);
        }
    }
    true
}
