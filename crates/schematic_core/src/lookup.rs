//! Read-only lookups supplied by the asset-loading side.

use std::collections::{HashMap, HashSet};

use crate::{AssetCode, DraftShape};

/// Resolves a draft code to its (unrotated) shape.
pub trait ShapeLookup {
    fn draft_shape(&self, code: &AssetCode) -> Option<&DraftShape>;

    fn has_draft(&self, code: &AssetCode) -> bool {
        self.draft_shape(code).is_some()
    }
}

impl ShapeLookup for HashMap<AssetCode, DraftShape> {
    fn draft_shape(&self, code: &AssetCode) -> Option<&DraftShape> {
        self.get(code)
    }
}

/// Answers whether a connection type is registered.
pub trait ConnectionTypeLookup {
    fn has_connection_type(&self, code: &AssetCode) -> bool;
}

impl ConnectionTypeLookup for HashSet<AssetCode> {
    fn has_connection_type(&self, code: &AssetCode) -> bool {
        self.contains(code)
    }
}

impl<T> ConnectionTypeLookup for HashMap<AssetCode, T> {
    fn has_connection_type(&self, code: &AssetCode) -> bool {
        self.contains_key(code)
    }
}
