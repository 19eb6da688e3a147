//! Signature-keyed recipe lookup.

use schematic_core::{compare_nodes, CanonicalSignature, ConnectionInfo, NodeInfo};
use std::cmp::Ordering;

use crate::SchematicRecipe;

/// Recipes sorted by node list (length, then lexicographic) for binary search.
///
/// Recipes with equal node lists keep their input order, and every recipe's
/// `id` is its position in the sorted list.
#[derive(Debug, Clone, Default)]
pub struct RecipeIndex {
    recipes: Vec<SchematicRecipe>,
}

impl RecipeIndex {
    pub fn new(mut recipes: Vec<SchematicRecipe>) -> Self {
        recipes.sort_by(|a, b| compare_nodes(a.sorted_nodes(), b.sorted_nodes()));
        for (id, recipe) in recipes.iter_mut().enumerate() {
            recipe.id = id;
        }
        Self { recipes }
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn get(&self, id: usize) -> Option<&SchematicRecipe> {
        self.recipes.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SchematicRecipe> {
        self.recipes.iter()
    }

    /// Enabled recipes whose signature equals `signature`, in index order.
    pub fn lookup(&self, signature: &CanonicalSignature) -> Vec<&SchematicRecipe> {
        self.lookup_parts(signature.nodes(), signature.connections())
    }

    /// [`lookup`](Self::lookup) over an already sorted node and connection list.
    pub fn lookup_parts(&self, nodes: &[NodeInfo], connections: &[ConnectionInfo]) -> Vec<&SchematicRecipe> {
        if nodes.is_empty() {
            return Vec::new();
        }
        let range = self.equal_range(nodes);
        self.recipes[range]
            .iter()
            .filter(|recipe| recipe.enabled && recipe.sorted_connections() == connections)
            .collect()
    }

    /// Range of recipes whose node list compares equal to `nodes`.
    fn equal_range(&self, nodes: &[NodeInfo]) -> std::ops::Range<usize> {
        let cmp = |recipe: &SchematicRecipe| compare_nodes(recipe.sorted_nodes(), nodes);
        let Ok(hit) = self.recipes.binary_search_by(cmp) else {
            return 0..0;
        };
        let mut start = hit;
        while start > 0 && cmp(&self.recipes[start - 1]) == Ordering::Equal {
            start -= 1;
        }
        let mut end = hit + 1;
        while end < self.recipes.len() && cmp(&self.recipes[end]) == Ordering::Equal {
            end += 1;
        }
        start..end
    }
}

impl FromIterator<SchematicRecipe> for RecipeIndex {
    fn from_iter<T: IntoIterator<Item = SchematicRecipe>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
