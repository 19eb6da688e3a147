//! A loaded, immutable set of draft assets.

use schematic_assets::{
    load_recipes, AssetSources, ConnectionTypeRegistry, DraftCatalog, LoadSettings,
};
use schematic_core::{AssetCode, CanonicalSignature, DraftLayout, DraftShape, ShapeLookup};
use schematic_recipe::{CollectibleRegistry, RecipeIndex, SchematicRecipe};
use tracing::info;

/// Connection types, drafts and recipes from one load pass.
///
/// A snapshot never changes once built. Reloading builds a new one, which
/// hosts publish behind an `Arc` so sessions holding the old one keep working.
#[derive(Debug, Clone, Default)]
pub struct DraftAssets {
    pub connection_types: ConnectionTypeRegistry,
    pub catalog: DraftCatalog,
    pub recipes: RecipeIndex,
}

impl DraftAssets {
    pub fn new(connection_types: ConnectionTypeRegistry, catalog: DraftCatalog, recipes: RecipeIndex) -> Self {
        Self {
            connection_types,
            catalog,
            recipes,
        }
    }

    /// Load everything in `sources`: connection types, then drafts checked
    /// against them, then recipes checked against both.
    pub fn load<R>(sources: &AssetSources, collectibles: &R, settings: &LoadSettings) -> Self
    where
        R: CollectibleRegistry + Sync + ?Sized,
    {
        let connection_types = ConnectionTypeRegistry::load(&sources.connection_types, settings);
        let catalog = DraftCatalog::load_documents(&sources.drafts, Some(&connection_types), settings);
        let recipes = load_recipes(
            &sources.recipes,
            collectibles,
            &catalog,
            &connection_types,
            settings,
        );
        info!(
            "[drafts] assets ready: {} connection types, {} drafts, {} recipes",
            connection_types.len(),
            catalog.len(),
            recipes.len()
        );
        Self::new(connection_types, catalog, recipes)
    }

    /// Enabled recipes whose signature equals `signature`.
    pub fn find_recipes(&self, signature: &CanonicalSignature) -> Vec<&SchematicRecipe> {
        self.recipes.lookup(signature)
    }

    /// Enabled recipes matching the current placement of `layout`.
    pub fn find_layout_recipes(&self, layout: &DraftLayout) -> Vec<&SchematicRecipe> {
        self.find_recipes(&layout.signature(&self.catalog))
    }
}

impl ShapeLookup for DraftAssets {
    fn draft_shape(&self, code: &AssetCode) -> Option<&DraftShape> {
        self.catalog.draft_shape(code)
    }

    fn has_draft(&self, code: &AssetCode) -> bool {
        self.catalog.has_draft(code)
    }
}
