//! Schematic drafts
//!
//! Players lay out drafts (rotatable tiles with typed input/output
//! connectors) on a bounded surface. The layout is reduced to a canonical
//! signature, recipes with the same signature are looked up, and the first
//! one whose ingredients are present in the input slots can be crafted.
//!
//! This crate ties the pieces together:
//! - [`DraftAssets`] - One published snapshot of connection types, drafts and recipes
//! - [`DraftingTable`] - A crafting session over a layout and its input slots
//! - [`try_learn_draft`] - Adds a draft to a player's collection
//!
//! # Example
//!
//! ```rust,ignore
//! use schematic::prelude::*;
//! use std::sync::Arc;
//!
//! let sources = AssetSources::from_dir(Path::new("assets"), "drafts")?;
//! let assets = Arc::new(DraftAssets::load(&sources, &collectibles, &LoadSettings::default()));
//!
//! let mut table = DraftingTable::new(assets, 8, 8, 16);
//! table.try_add_draft(AssetCode::new("drafts", "pump"), (0, 0), 0);
//! table.try_add_draft(AssetCode::new("drafts", "tank"), (1, 0), 0);
//! if let Some(output) = table.craft(&mut ApplyDamage) {
//!     // hand `output` to the player
//! }
//! ```

mod assets;
mod learn;
mod table;

pub use assets::DraftAssets;
pub use learn::{try_learn_draft, LearnResult, PlayerDrafts};
pub use table::DraftingTable;

pub use schematic_assets;
pub use schematic_core;
pub use schematic_recipe;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{try_learn_draft, DraftAssets, DraftingTable, LearnResult, PlayerDrafts};
    pub use schematic_assets::{AssetDocument, AssetSources, DraftCatalog, LoadSettings};
    pub use schematic_core::{
        AssetCode, CanonicalSignature, ConnectionSide, DraftLayout, DraftShape, PlacedDraft,
        ShapeLookup,
    };
    pub use schematic_recipe::{
        ApplyDamage, CollectibleRegistry, CollectibleTable, DamageSink, ItemClass, ItemSlot,
        ItemStack, RecipeIndex, SchematicRecipe,
    };
}
