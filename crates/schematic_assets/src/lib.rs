//! Asset loading for schematic drafts
//!
//! This crate reads the JSON assets the recipe engine runs on:
//! - [`ConnectionTypeRegistry`] - Connector types, from arrays of [`ConnectionType`]
//! - [`DraftCatalog`] - Draft code → [`DraftDescriptor`], initialized in parallel
//! - [`load_recipes`] - Recipe files resolved into a [`RecipeIndex`](schematic_recipe::RecipeIndex)
//! - [`LoadSettings`] - Loader configuration from TOML or JSON
//!
//! Loaders never fail as a whole. A bad file or entry is logged through
//! `tracing` and left out; everything else still loads.

mod catalog;
mod connection;
mod descriptor;
mod document;
mod recipes;
mod settings;

pub use catalog::DraftCatalog;
pub use connection::{ConnectionTextures, ConnectionType, ConnectionTypeRegistry};
pub use descriptor::{parse_color, CellDocument, DraftDescriptor, DraftDocument, ItemDraftDescriptor};
pub use document::{AssetDocument, AssetSources};
pub use recipes::{load_recipes, parse_recipe_document};
pub use settings::LoadSettings;

use schematic_core::{AssetCode, ShapeError};
use thiserror::Error;

/// Errors that can occur while reading assets
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("IO error reading {path}: {message}")]
    Io { path: String, message: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error(transparent)]
    Shape(#[from] ShapeError),
    #[error("draft {draft} uses unknown side '{side}'")]
    UnknownSide { draft: AssetCode, side: String },
    #[error("cannot add connection type {0}, such a type already exists")]
    DuplicateConnectionType(AssetCode),
    #[error("draft {0} is already registered")]
    DuplicateDraft(AssetCode),
}
