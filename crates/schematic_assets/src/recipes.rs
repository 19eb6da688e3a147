//! Recipe files: parse, resolve, index.

use rayon::prelude::*;
use schematic_core::{ConnectionTypeLookup, ShapeLookup};
use schematic_recipe::{
    CollectibleRegistry, RecipeDocument, RecipeError, RecipeIndex, ResolveContext, SchematicRecipe,
};
use serde::Deserialize;
use tracing::{error, info, warn};

use crate::{AssetDocument, AssetError, LoadSettings};

/// A recipe file holds one recipe or an array of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum RecipeFile {
    Many(Vec<RecipeDocument>),
    One(Box<RecipeDocument>),
}

/// Parse the recipes of one document.
///
/// Bare codes get the document's domain, or `settings.default_domain` when
/// the document has none. Unnamed recipes are named after the
/// document, with `#index` appended when the file holds an array.
pub fn parse_recipe_document(
    document: &AssetDocument,
    settings: &LoadSettings,
) -> Result<Vec<RecipeDocument>, AssetError> {
    let (mut recipes, many) = match serde_json::from_str(&document.content)? {
        RecipeFile::Many(recipes) => (recipes, true),
        RecipeFile::One(recipe) => (vec![*recipe], false),
    };
    for (index, recipe) in recipes.iter_mut().enumerate() {
        recipe.qualify(document.code_domain(settings));
        if recipe.name.is_empty() {
            recipe.name = if many {
                format!("{}#{}", document.source, index)
            } else {
                document.source.clone()
            };
        }
    }
    Ok(recipes)
}

/// Parse and resolve every recipe in `documents` and index the survivors.
///
/// Unreadable documents and recipes that fail to resolve are logged, one
/// line per problem, and left out. Surviving recipes keep document order
/// until the index sorts them.
pub fn load_recipes<R, D, C>(
    documents: &[AssetDocument],
    collectibles: &R,
    drafts: &D,
    connection_types: &C,
    settings: &LoadSettings,
) -> RecipeIndex
where
    R: CollectibleRegistry + Sync + ?Sized,
    D: ShapeLookup + Sync + ?Sized,
    C: ConnectionTypeLookup + Sync + ?Sized,
{
    let mut parsed = Vec::new();
    for document in documents {
        match parse_recipe_document(document, settings) {
            Ok(recipes) => parsed.extend(recipes),
            Err(e) => error!("[drafts] unable to read recipes from '{}': {}", document.source, e),
        }
    }
    let total = parsed.len();

    let ctx = ResolveContext {
        collectibles,
        drafts,
        connection_types,
        legacy_liquid_quantity: settings.legacy_liquid_quantity,
    };
    let resolve = |recipe: RecipeDocument| {
        let name = recipe.name.clone();
        (name, recipe.resolve(&ctx))
    };
    let results: Vec<(String, Result<SchematicRecipe, Vec<RecipeError>>)> = if settings.parallel {
        parsed.into_par_iter().map(resolve).collect()
    } else {
        parsed.into_iter().map(resolve).collect()
    };

    let mut recipes = Vec::with_capacity(results.len());
    for (name, result) in results {
        match result {
            Ok(recipe) => recipes.push(recipe),
            Err(errors) => {
                for e in errors {
                    warn!("[drafts] recipe {} excluded: {}", name, e);
                }
            }
        }
    }
    info!("[drafts] loaded {} of {} schematic recipes", recipes.len(), total);
    RecipeIndex::new(recipes)
}
