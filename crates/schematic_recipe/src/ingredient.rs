//! Recipe ingredients and their resolution against the collectible registry.

use schematic_core::AssetCode;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::warn;

use crate::{CollectibleRegistry, ItemClass, ItemStack, RecipeError};

fn default_quantity() -> u32 {
    1
}

/// An ingredient as authored in a recipe document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ingredient {
    #[serde(rename = "type", default)]
    pub class: ItemClass,
    pub code: AssetCode,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Tools are not used up; they lose `tool_durability_cost` durability instead.
    #[serde(default)]
    pub is_tool: bool,
    #[serde(default)]
    pub tool_durability_cost: u32,
    /// Volume for liquid ingredients. `0` means "not given".
    #[serde(default)]
    pub litres: f32,
    /// Attributes a stack must carry (with equal values) to satisfy this ingredient.
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

impl Ingredient {
    pub fn new(class: ItemClass, code: AssetCode, quantity: u32) -> Self {
        Self {
            class,
            code,
            quantity,
            is_tool: false,
            tool_durability_cost: 0,
            litres: 0.0,
            attributes: Map::new(),
        }
    }

    /// Author an ingredient that asks for exactly `stack`.
    ///
    /// Liquid stacks are expressed in litres with a zero quantity.
    pub fn from_stack<R: CollectibleRegistry + ?Sized>(stack: &ItemStack, registry: &R) -> Self {
        let mut ingredient = Self::new(stack.class, stack.code.clone(), stack.stack_size);
        ingredient.attributes = stack.attributes.clone();
        if let Some(props) = registry.liquid_props(&stack.code) {
            if props.items_per_litre > 0.0 {
                ingredient.litres = stack.stack_size as f32 / props.items_per_litre;
                ingredient.quantity = 0;
            }
        }
        ingredient
    }

    /// `true` if `stack` is this ingredient: same code, same class and every
    /// declared attribute present with an equal value.
    pub fn satisfies(&self, stack: &ItemStack) -> bool {
        self.code == stack.code
            && self.class == stack.class
            && self
                .attributes
                .iter()
                .all(|(key, value)| stack.attributes.get(key) == Some(value))
    }

    pub fn qualify(&mut self, domain: &str) {
        self.code.qualify(domain);
    }

    /// Resolve against `registry`, classifying the ingredient and computing its weight.
    ///
    /// `index` and `source` only feed diagnostics. With `legacy_liquid_quantity`
    /// a liquid written with `quantity` but no `litres` takes the quantity as litres.
    pub fn resolve<R: CollectibleRegistry + ?Sized>(
        self,
        index: usize,
        registry: &R,
        legacy_liquid_quantity: bool,
        source: &str,
    ) -> Result<ResolvedIngredient, RecipeError> {
        if self.code.is_wildcard() {
            return Err(RecipeError::WildcardIngredient {
                index,
                code: self.code,
            });
        }
        if !registry.contains(self.class, &self.code) {
            return Err(RecipeError::UnresolvedIngredient {
                index,
                code: self.code,
            });
        }

        if self.is_tool {
            let weight = self.tool_durability_cost;
            return Ok(ResolvedIngredient::new(self, IngredientKind::Tool, weight));
        }

        let Some(props) = registry.liquid_props(&self.code) else {
            let weight = self.quantity;
            return Ok(ResolvedIngredient::new(self, IngredientKind::Item, weight));
        };

        let mut ingredient = self;
        if ingredient.litres <= f32::EPSILON {
            if ingredient.quantity > 0 && legacy_liquid_quantity {
                warn!(
                    "[drafts] recipe {}, ingredient {} ({}) has a quantity but no litres, reading quantity as litres",
                    source, index, ingredient.code
                );
                ingredient.litres = ingredient.quantity as f32;
            } else {
                ingredient.litres = 1.0;
            }
        }
        let weight = (props.items_per_litre * ingredient.litres).round().max(0.0) as u32;
        Ok(ResolvedIngredient::new(ingredient, IngredientKind::Liquid, weight))
    }
}

/// Which pass of the ledger an ingredient is settled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IngredientKind {
    /// Consumed by stack size.
    Item,
    /// Consumed as durability.
    Tool,
    /// Consumed from a container's liquid content.
    Liquid,
}

/// An ingredient with its kind and weight fixed by resolution.
///
/// Weight is the stack size for items, the durability cost for tools and
/// the content stack size (litres times items-per-litre) for liquids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedIngredient {
    pub ingredient: Ingredient,
    pub kind: IngredientKind,
    pub weight: u32,
}

impl ResolvedIngredient {
    pub fn new(ingredient: Ingredient, kind: IngredientKind, weight: u32) -> Self {
        Self {
            ingredient,
            kind,
            weight,
        }
    }

    pub fn item(code: AssetCode, quantity: u32) -> Self {
        Self::new(
            Ingredient::new(ItemClass::Item, code, quantity),
            IngredientKind::Item,
            quantity,
        )
    }

    pub fn tool(code: AssetCode, durability_cost: u32) -> Self {
        let mut ingredient = Ingredient::new(ItemClass::Item, code, 1);
        ingredient.is_tool = true;
        ingredient.tool_durability_cost = durability_cost;
        Self::new(ingredient, IngredientKind::Tool, durability_cost)
    }

    pub fn liquid(code: AssetCode, weight: u32) -> Self {
        Self::new(
            Ingredient::new(ItemClass::Item, code, 0),
            IngredientKind::Liquid,
            weight,
        )
    }

    pub fn satisfies(&self, stack: &ItemStack) -> bool {
        self.ingredient.satisfies(stack)
    }
}
