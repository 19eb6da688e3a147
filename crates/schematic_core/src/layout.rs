//! Placed drafts and the bounded surface they are placed on.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

use crate::{build_signature, AssetCode, CanonicalSignature, DraftShape, ShapeLookup};

/// A draft placed on a layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedDraft {
    pub code: AssetCode,
    /// Board cell of the rotated shape's top-left corner.
    pub position: (i32, i32),
    /// Clockwise quarter turns, always in `0..4`.
    pub rotation: u8,
}

impl PlacedDraft {
    /// Create a placed draft. `rotation` is normalized mod 4.
    pub fn new(code: AssetCode, position: (i32, i32), rotation: u8) -> Self {
        Self {
            code,
            position,
            rotation: rotation & 3,
        }
    }

    /// Same draft moved by `(dx, dy)`.
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: (self.position.0 + dx, self.position.1 + dy),
            ..self.clone()
        }
    }
}

/// A bounded crafting surface holding non-overlapping placed drafts.
///
/// Drafts keep their insertion order, which is also the order connectors are
/// written in when the layout's signature is built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftLayout {
    pub id: Uuid,
    pub width: i32,
    pub height: i32,
    drafts: Vec<PlacedDraft>,
    /// Board cells covered by placed drafts. Rebuilt by [`DraftLayout::rebuild_occupancy`].
    #[serde(skip)]
    occupied: HashSet<(i32, i32)>,
}

impl DraftLayout {
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            id: Uuid::new_v4(),
            width,
            height,
            drafts: Vec::new(),
            occupied: HashSet::new(),
        }
    }

    pub fn drafts(&self) -> &[PlacedDraft] {
        &self.drafts
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }

    /// Draft anchored at `position`, if any.
    pub fn get(&self, position: (i32, i32)) -> Option<&PlacedDraft> {
        self.drafts.iter().find(|d| d.position == position)
    }

    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.occupied.contains(&(x, y))
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    /// `true` if `shape` turned by `rotation` fits at `position` without leaving
    /// the surface or overlapping a placed draft.
    pub fn fits(&self, shape: &DraftShape, position: (i32, i32), rotation: u8) -> bool {
        if !self.in_bounds(position.0, position.1) {
            return false;
        }
        let (w, h) = shape.rotated_size(rotation);
        if position.0 + w > self.width || position.1 + h > self.height {
            return false;
        }
        shape
            .covered_cells(position, rotation)
            .all(|cell| !self.occupied.contains(&cell))
    }

    /// Place `code` at `position`. Returns `false` if the draft is unknown, does
    /// not fit, or another draft is already anchored at `position`.
    pub fn try_add<S: ShapeLookup + ?Sized>(
        &mut self,
        code: AssetCode,
        position: (i32, i32),
        rotation: u8,
        shapes: &S,
    ) -> bool {
        let rotation = rotation & 3;
        let Some(shape) = shapes.draft_shape(&code) else {
            return false;
        };
        if !self.fits(shape, position, rotation) || self.get(position).is_some() {
            return false;
        }
        self.occupied.extend(shape.covered_cells(position, rotation));
        self.drafts.push(PlacedDraft::new(code, position, rotation));
        true
    }

    /// Remove the draft anchored at `position`. Returns `false` if there is none.
    pub fn try_remove<S: ShapeLookup + ?Sized>(&mut self, position: (i32, i32), shapes: &S) -> bool {
        let Some(index) = self.drafts.iter().position(|d| d.position == position) else {
            return false;
        };
        let removed = self.drafts.remove(index);
        match shapes.draft_shape(&removed.code) {
            Some(shape) => {
                for cell in shape.covered_cells(removed.position, removed.rotation) {
                    self.occupied.remove(&cell);
                }
            }
            None => self.rebuild_occupancy(shapes),
        }
        true
    }

    /// Drop drafts whose code `shapes` no longer knows. Returns how many were removed.
    pub fn retain_known<S: ShapeLookup + ?Sized>(&mut self, shapes: &S) -> usize {
        let before = self.drafts.len();
        self.drafts.retain(|d| shapes.has_draft(&d.code));
        let removed = before - self.drafts.len();
        self.rebuild_occupancy(shapes);
        removed
    }

    /// Recompute covered cells from the placed drafts, e.g. after deserializing.
    pub fn rebuild_occupancy<S: ShapeLookup + ?Sized>(&mut self, shapes: &S) {
        self.occupied.clear();
        for draft in &self.drafts {
            if let Some(shape) = shapes.draft_shape(&draft.code) {
                self.occupied
                    .extend(shape.covered_cells(draft.position, draft.rotation));
            }
        }
    }

    pub fn clear(&mut self) {
        self.drafts.clear();
        self.occupied.clear();
    }

    /// Canonical signature of the current placement.
    pub fn signature<S: ShapeLookup + ?Sized>(&self, shapes: &S) -> CanonicalSignature {
        build_signature(&self.drafts, shapes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ShapeCell;
    use std::collections::HashMap;

    fn code(path: &str) -> AssetCode {
        AssetCode::new("drafts", path)
    }

    fn shapes() -> HashMap<AssetCode, DraftShape> {
        let mut map = HashMap::new();
        // 3×1 bar
        map.insert(
            code("bar"),
            DraftShape::new(
                vec![ShapeCell::plain(0, 0), ShapeCell::plain(1, 0), ShapeCell::plain(2, 0)],
                3,
                1,
                code("bar"),
                u32::MAX,
            )
            .unwrap(),
        );
        map.insert(
            code("dot"),
            DraftShape::new(vec![ShapeCell::plain(0, 0)], 1, 1, code("dot"), u32::MAX).unwrap(),
        );
        map
    }

    #[test]
    fn placed_draft_normalizes_rotation() {
        assert_eq!(PlacedDraft::new(code("dot"), (0, 0), 7).rotation, 3);
    }

    #[test]
    fn try_add_respects_bounds() {
        let shapes = shapes();
        let mut layout = DraftLayout::new(4, 4);
        assert!(!layout.try_add(code("bar"), (2, 0), 0, &shapes), "bar would stick out");
        assert!(!layout.try_add(code("bar"), (-1, 0), 0, &shapes));
        assert!(layout.try_add(code("bar"), (3, 0), 1, &shapes), "vertical bar fits");
        assert!(!layout.try_add(code("bar"), (0, 2), 1, &shapes), "vertical bar too tall");
    }

    #[test]
    fn try_add_rejects_overlap_and_unknown() {
        let shapes = shapes();
        let mut layout = DraftLayout::new(4, 4);
        assert!(layout.try_add(code("bar"), (0, 0), 0, &shapes));
        assert!(layout.is_occupied(2, 0));
        assert!(!layout.try_add(code("dot"), (1, 0), 0, &shapes));
        assert!(!layout.try_add(code("ghost"), (0, 3), 0, &shapes));
        assert!(layout.try_add(code("dot"), (3, 0), 0, &shapes));
        assert_eq!(layout.len(), 2);
    }

    #[test]
    fn anchor_inside_a_hole_is_still_taken() {
        let mut shapes = shapes();
        // 2x2 block missing its top-left cell.
        shapes.insert(
            code("notch"),
            DraftShape::new(
                vec![ShapeCell::plain(1, 0), ShapeCell::plain(0, 1), ShapeCell::plain(1, 1)],
                2,
                2,
                code("notch"),
                u32::MAX,
            )
            .unwrap(),
        );
        let mut layout = DraftLayout::new(4, 4);
        assert!(layout.try_add(code("notch"), (1, 0), 0, &shapes));
        assert!(!layout.is_occupied(1, 0), "anchor cell is a hole");
        assert!(!layout.try_add(code("dot"), (1, 0), 0, &shapes), "anchor already used");
        assert!(layout.try_add(code("dot"), (0, 0), 0, &shapes));
    }

    #[test]
    fn try_remove_frees_cells() {
        let shapes = shapes();
        let mut layout = DraftLayout::new(4, 4);
        assert!(layout.try_add(code("bar"), (0, 1), 2, &shapes));
        assert!(layout.try_remove((0, 1), &shapes));
        assert!(!layout.is_occupied(1, 1));
        assert!(!layout.try_remove((0, 1), &shapes));
        assert!(layout.try_add(code("dot"), (1, 1), 0, &shapes));
    }

    #[test]
    fn retain_known_drops_vanished_drafts() {
        let mut shapes = shapes();
        let mut layout = DraftLayout::new(4, 4);
        assert!(layout.try_add(code("bar"), (0, 0), 0, &shapes));
        assert!(layout.try_add(code("dot"), (0, 1), 0, &shapes));
        shapes.remove(&code("bar"));
        assert_eq!(layout.retain_known(&shapes), 1);
        assert!(!layout.is_occupied(0, 0));
        assert!(layout.is_occupied(0, 1));
    }

    #[test]
    fn serde_round_trip_rebuilds_occupancy() {
        let shapes = shapes();
        let mut layout = DraftLayout::new(4, 4);
        assert!(layout.try_add(code("bar"), (0, 0), 0, &shapes));
        let json = serde_json::to_string(&layout).unwrap();
        let mut back: DraftLayout = serde_json::from_str(&json).unwrap();
        assert!(!back.is_occupied(0, 0), "occupancy is not serialized");
        back.rebuild_occupancy(&shapes);
        assert!(back.is_occupied(2, 0));
        assert_eq!(back.drafts(), layout.drafts());
    }
}
