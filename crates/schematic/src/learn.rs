//! Drafts a player has unlocked.

use schematic_assets::DraftCatalog;
use schematic_core::AssetCode;
use std::collections::HashSet;

/// A player's collection of unlocked drafts. Storage is up to the host.
pub trait PlayerDrafts {
    fn contains(&self, code: &AssetCode) -> bool;

    /// Add `code`. Returns `false` if the collection refused it.
    fn add(&mut self, code: AssetCode) -> bool;
}

impl PlayerDrafts for HashSet<AssetCode> {
    fn contains(&self, code: &AssetCode) -> bool {
        HashSet::contains(self, code)
    }

    fn add(&mut self, code: AssetCode) -> bool {
        self.insert(code);
        true
    }
}

/// Outcome of [`try_learn_draft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LearnResult {
    /// The player already had the draft.
    None,
    /// The draft is unknown or could not be added.
    Failed,
    /// The draft was added.
    Learned,
}

/// Unlock `code` for a player if the catalog knows it.
pub fn try_learn_draft<P: PlayerDrafts + ?Sized>(
    catalog: &DraftCatalog,
    drafts: &mut P,
    code: &AssetCode,
) -> LearnResult {
    if !catalog.contains(code) {
        return LearnResult::Failed;
    }
    if drafts.contains(code) {
        return LearnResult::None;
    }
    if drafts.add(code.clone()) {
        LearnResult::Learned
    } else {
        LearnResult::Failed
    }
}
