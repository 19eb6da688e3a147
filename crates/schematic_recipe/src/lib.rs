//! Schematic recipes
//!
//! This crate turns recipe documents into resolved [`SchematicRecipe`]s and
//! finds the ones matching a layout:
//! - [`RecipeDocument`] - Authored recipe (output, ingredients, named pattern)
//! - [`SchematicRecipe`] - Resolved recipe keyed by a canonical signature
//! - [`RecipeIndex`] - Sorted recipes with binary-searched lookup
//! - [`IngredientLedger`] - Matches and consumes ingredients from inventory slots
//!
//! # Example
//!
//! ```rust,ignore
//! use schematic_recipe::{RecipeIndex, ApplyDamage};
//!
//! let index = RecipeIndex::new(recipes);
//! let signature = layout.signature(&catalog);
//! if let Some(recipe) = index.lookup(&signature).into_iter().find(|r| r.matches(&slots)) {
//!     recipe.consume(&mut slots, &mut ApplyDamage);
//! }
//! ```

mod index;
mod ingredient;
mod inventory;
pub mod ledger;
mod pattern;
mod recipe;

pub use index::RecipeIndex;
pub use ingredient::{Ingredient, IngredientKind, ResolvedIngredient};
pub use inventory::{
    ApplyDamage, CollectibleRegistry, CollectibleTable, DamageSink, ItemClass, ItemSlot, ItemStack,
    LiquidProps,
};
pub use ledger::{IngredientLedger, SlotCharge};
pub use pattern::{PatternOutput, PatternPart, SchematicPattern};
pub use recipe::{RecipeDocument, RecipeOutput, ResolveContext, SchematicRecipe};

use schematic_core::AssetCode;
use thiserror::Error;

/// Reasons a recipe is excluded at load time
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecipeError {
    #[error("ingredient {index} ({code}) does not name a known collectible")]
    UnresolvedIngredient { index: usize, code: AssetCode },
    #[error("ingredient {index} ({code}) is a wildcard, which schematic recipes do not support")]
    WildcardIngredient { index: usize, code: AssetCode },
    #[error("output {0} does not name a known collectible")]
    UnresolvedOutput(AssetCode),
    #[error("pattern is empty")]
    EmptyPattern,
    #[error("part {part} refers to unknown draft {code}")]
    UnknownDraft { part: String, code: AssetCode },
    #[error("part {part}, output {output} targets unknown part '{target}'")]
    DanglingOutputTarget {
        part: String,
        output: usize,
        target: String,
    },
    #[error("part {part}, output {output} uses unknown connection type {connection_type}")]
    UnknownConnectionType {
        part: String,
        output: usize,
        connection_type: AssetCode,
    },
}
