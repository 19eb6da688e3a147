//! Recipe documents and the resolved recipes built from them.

use schematic_core::{
    AssetCode, CanonicalSignature, ConnectionInfo, ConnectionTypeLookup, NodeInfo, ShapeLookup,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{
    ledger, CollectibleRegistry, DamageSink, Ingredient, ItemClass, ItemSlot, ItemStack,
    RecipeError, ResolvedIngredient, SchematicPattern,
};

fn default_enabled() -> bool {
    true
}

fn default_quantity() -> u32 {
    1
}

/// What a recipe produces, as authored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeOutput {
    #[serde(rename = "type", default)]
    pub class: ItemClass,
    pub code: AssetCode,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

impl RecipeOutput {
    pub fn resolve<R: CollectibleRegistry + ?Sized>(&self, registry: &R) -> Result<ItemStack, RecipeError> {
        if !registry.contains(self.class, &self.code) {
            return Err(RecipeError::UnresolvedOutput(self.code.clone()));
        }
        let mut stack = ItemStack::new(self.class, self.code.clone(), self.quantity);
        stack.attributes = self.attributes.clone();
        Ok(stack)
    }
}

/// Registries a recipe is resolved against.
pub struct ResolveContext<'a, R: ?Sized, D: ?Sized, C: ?Sized> {
    pub collectibles: &'a R,
    pub drafts: &'a D,
    pub connection_types: &'a C,
    /// Read `quantity` as litres for liquids that give no `litres`.
    pub legacy_liquid_quantity: bool,
}

/// A recipe as written in a recipe file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeDocument {
    /// Filled from the source file when left empty.
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    pub output: RecipeOutput,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    pub pattern: SchematicPattern,
}

impl RecipeDocument {
    /// Give unqualified codes the document's `domain`.
    pub fn qualify(&mut self, domain: &str) {
        self.output.code.qualify(domain);
        for ingredient in &mut self.ingredients {
            ingredient.qualify(domain);
        }
        self.pattern.qualify(domain);
    }

    /// Resolve into a [`SchematicRecipe`], collecting every failure.
    ///
    /// Checks run in order: ingredients, output, then the pattern. Pattern
    /// parts are only looked at once ingredients and output resolved. The
    /// pattern itself is dropped; only its canonical signature is kept.
    pub fn resolve<R, D, C>(
        self,
        ctx: &ResolveContext<'_, R, D, C>,
    ) -> Result<SchematicRecipe, Vec<RecipeError>>
    where
        R: CollectibleRegistry + ?Sized,
        D: ShapeLookup + ?Sized,
        C: ConnectionTypeLookup + ?Sized,
    {
        let mut errors = Vec::new();
        let mut ingredients = Vec::with_capacity(self.ingredients.len());
        for (index, ingredient) in self.ingredients.into_iter().enumerate() {
            match ingredient.resolve(index, ctx.collectibles, ctx.legacy_liquid_quantity, &self.name) {
                Ok(resolved) => ingredients.push(resolved),
                Err(err) => errors.push(err),
            }
        }
        let output = self
            .output
            .resolve(ctx.collectibles)
            .map_err(|err| errors.push(err))
            .ok();

        if self.pattern.is_empty() {
            errors.push(RecipeError::EmptyPattern);
        } else if errors.is_empty() {
            errors.extend(self.pattern.validate(ctx.drafts, ctx.connection_types));
        }

        match output {
            Some(output) if errors.is_empty() => Ok(SchematicRecipe {
                id: 0,
                name: self.name,
                enabled: self.enabled,
                output,
                ingredients,
                signature: self.pattern.signature(),
            }),
            _ => Err(errors),
        }
    }
}

/// A resolved recipe, keyed by the canonical signature of its pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchematicRecipe {
    /// Position in the [`RecipeIndex`](crate::RecipeIndex) sort order.
    pub id: usize,
    pub name: String,
    pub enabled: bool,
    pub output: ItemStack,
    ingredients: Vec<ResolvedIngredient>,
    signature: CanonicalSignature,
}

impl SchematicRecipe {
    /// Build a recipe directly from a signature. Fails on an empty signature.
    pub fn new(
        name: impl Into<String>,
        output: ItemStack,
        ingredients: Vec<ResolvedIngredient>,
        signature: CanonicalSignature,
    ) -> Result<Self, RecipeError> {
        if signature.is_empty() {
            return Err(RecipeError::EmptyPattern);
        }
        Ok(Self {
            id: 0,
            name: name.into(),
            enabled: true,
            output,
            ingredients,
            signature,
        })
    }

    pub fn ingredients(&self) -> &[ResolvedIngredient] {
        &self.ingredients
    }

    pub fn signature(&self) -> &CanonicalSignature {
        &self.signature
    }

    pub fn sorted_nodes(&self) -> &[NodeInfo] {
        self.signature.nodes()
    }

    pub fn sorted_connections(&self) -> &[ConnectionInfo] {
        self.signature.connections()
    }

    /// `true` if `slots` hold every ingredient.
    pub fn matches(&self, slots: &[ItemSlot]) -> bool {
        ledger::matches(&self.ingredients, slots)
    }

    /// Remove the ingredients from `slots`. Returns `false` and changes nothing
    /// if they are not all there.
    pub fn consume(&self, slots: &mut [ItemSlot], sink: &mut dyn DamageSink) -> bool {
        ledger::consume(&self.ingredients, slots, sink)
    }
}
