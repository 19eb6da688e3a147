//! A drafting table session: layout edits, recipe candidates and crafting.

use schematic_core::{AssetCode, DraftLayout};
use schematic_recipe::{DamageSink, ItemSlot, ItemStack, SchematicPattern, SchematicRecipe};
use std::sync::Arc;
use tracing::debug;

use crate::{DraftAssets, PlayerDrafts};

/// One crafting surface with its input slots.
///
/// Candidates (recipes whose signature equals the layout's) are recomputed
/// after every layout edit. The current recipe is the first candidate whose
/// ingredients are in the slots, checked on each call since slots change freely.
#[derive(Debug, Clone)]
pub struct DraftingTable {
    assets: Arc<DraftAssets>,
    layout: DraftLayout,
    slots: Vec<ItemSlot>,
    /// Recipe ids into `assets.recipes`, in lookup order.
    candidates: Vec<usize>,
}

impl DraftingTable {
    pub fn new(assets: Arc<DraftAssets>, width: i32, height: i32, slot_count: usize) -> Self {
        Self {
            assets,
            layout: DraftLayout::new(width, height),
            slots: vec![ItemSlot::empty(); slot_count],
            candidates: Vec::new(),
        }
    }

    /// Resume a session over a saved `layout`. Drafts the assets no longer know are dropped.
    pub fn with_layout(assets: Arc<DraftAssets>, layout: DraftLayout, slots: Vec<ItemSlot>) -> Self {
        let mut table = Self {
            assets,
            layout,
            slots,
            candidates: Vec::new(),
        };
        table.refresh();
        table
    }

    pub fn assets(&self) -> &Arc<DraftAssets> {
        &self.assets
    }

    pub fn layout(&self) -> &DraftLayout {
        &self.layout
    }

    pub fn slots(&self) -> &[ItemSlot] {
        &self.slots
    }

    pub fn slots_mut(&mut self) -> &mut [ItemSlot] {
        &mut self.slots
    }

    /// Place a draft. Returns `false` if the draft is unknown, out of bounds or overlapping.
    pub fn try_add_draft(&mut self, code: AssetCode, position: (i32, i32), rotation: u8) -> bool {
        if !self.layout.try_add(code, position, rotation, &*self.assets) {
            return false;
        }
        self.update_candidates();
        true
    }

    /// [`try_add_draft`](Self::try_add_draft), but only for drafts `player` has unlocked.
    pub fn try_add_unlocked_draft<P: PlayerDrafts + ?Sized>(
        &mut self,
        player: &P,
        code: AssetCode,
        position: (i32, i32),
        rotation: u8,
    ) -> bool {
        player.contains(&code) && self.try_add_draft(code, position, rotation)
    }

    /// Remove the draft anchored at `position`.
    pub fn try_remove_draft(&mut self, position: (i32, i32)) -> bool {
        if !self.layout.try_remove(position, &*self.assets) {
            return false;
        }
        self.update_candidates();
        true
    }

    pub fn clear_drafts(&mut self) {
        self.layout.clear();
        self.candidates.clear();
    }

    /// Switch to a newly published snapshot and [`refresh`](Self::refresh).
    pub fn set_assets(&mut self, assets: Arc<DraftAssets>) -> usize {
        self.assets = assets;
        self.refresh()
    }

    /// Drop drafts the assets no longer know, rebuild occupancy and
    /// candidates. Returns how many drafts were dropped.
    pub fn refresh(&mut self) -> usize {
        let removed = self.layout.retain_known(&*self.assets);
        if removed > 0 {
            debug!("[drafts] dropped {} unknown drafts from layout {}", removed, self.layout.id);
        }
        self.update_candidates();
        removed
    }

    fn update_candidates(&mut self) {
        self.candidates = self
            .assets
            .find_layout_recipes(&self.layout)
            .into_iter()
            .map(|recipe| recipe.id)
            .collect();
    }

    /// Recipes the layout currently matches, regardless of ingredients.
    pub fn candidates(&self) -> Vec<&SchematicRecipe> {
        self.candidates
            .iter()
            .filter_map(|&id| self.assets.recipes.get(id))
            .collect()
    }

    /// First candidate whose ingredients are all in the slots.
    pub fn current_recipe(&self) -> Option<&SchematicRecipe> {
        self.candidates().into_iter().find(|recipe| recipe.matches(&self.slots))
    }

    /// Craft the current recipe: consume its inputs and return its output.
    pub fn craft(&mut self, sink: &mut dyn DamageSink) -> Option<ItemStack> {
        let assets = Arc::clone(&self.assets);
        let recipe = self
            .candidates
            .iter()
            .filter_map(|&id| assets.recipes.get(id))
            .find(|recipe| recipe.matches(&self.slots))?;
        if !recipe.consume(&mut self.slots, sink) {
            return None;
        }
        debug!("[drafts] crafted {} from recipe {}", recipe.output.code, recipe.name);
        Some(recipe.output.clone())
    }

    /// Pattern of the current layout, for authoring new recipes.
    pub fn pattern(&self) -> SchematicPattern {
        SchematicPattern::from_layout(self.layout.drafts(), &*self.assets)
    }
}
