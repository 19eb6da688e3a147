//! Connector graph of a placed layout.
//!
//! Every connector of every placed draft is written into a slot map keyed by
//! the midpoint of the cell side it sits on, at double resolution, plus the
//! side it faces. Two cells that touch share the midpoint of their common side,
//! so the partner of a slot is found at the same coordinates with the opposite
//! side. An output slot whose partner is an input of the same type forms a
//! directed edge.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    rotate_offset, AssetCode, CanonicalSignature, ConnectionInfo, ConnectionSide, NodeInfo,
    PlacedDraft, ShapeLookup,
};

/// Slot position: side midpoint at double resolution plus the facing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotKey {
    pub x2: i32,
    pub y2: i32,
    pub side: ConnectionSide,
}

impl SlotKey {
    /// Slot on `side` of the board cell `(x, y)`.
    ///
    /// `None` when the doubled coordinates do not fit in an `i32`.
    pub fn new(x: i32, y: i32, side: ConnectionSide) -> Option<Self> {
        let (dx, dy) = side.offset();
        Some(Self {
            x2: x.checked_mul(2)?.checked_add(dx)?,
            y2: y.checked_mul(2)?.checked_add(dy)?,
            side,
        })
    }

    /// The slot on the neighbouring cell that faces this one.
    pub fn facing(self) -> Self {
        Self {
            side: self.side.opposite(),
            ..self
        }
    }
}

/// A connector written into the slot map.
#[derive(Debug, Clone)]
pub struct ConnectionSlot<'a> {
    pub connection_type: &'a AssetCode,
    /// Index of the owning draft in the builder's input.
    pub draft: usize,
    pub is_output: bool,
}

/// A matched output → input pair between two placed drafts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphEdge {
    pub from: usize,
    pub to: usize,
    pub connection_type: AssetCode,
}

/// Directed connector graph over a list of placed drafts.
///
/// Node `i` is the `i`-th draft passed to [`ConnectionGraph::build`].
#[derive(Debug, Clone)]
pub struct ConnectionGraph<'a> {
    drafts: Vec<&'a PlacedDraft>,
    edges: Vec<GraphEdge>,
}

impl<'a> ConnectionGraph<'a> {
    /// Compute the graph for `drafts`, resolving shapes through `shapes`.
    ///
    /// Drafts are processed in iteration order; when two connectors land on the
    /// same slot the later one wins. A draft whose shape is unknown stays a
    /// node but contributes no connectors.
    pub fn build<I, S>(drafts: I, shapes: &'a S) -> Self
    where
        I: IntoIterator<Item = &'a PlacedDraft>,
        S: ShapeLookup + ?Sized,
    {
        let drafts: Vec<&'a PlacedDraft> = drafts.into_iter().collect();
        let mut slots: HashMap<SlotKey, ConnectionSlot<'a>> = HashMap::new();

        for (index, draft) in drafts.iter().enumerate() {
            let Some(shape) = shapes.draft_shape(&draft.code) else {
                debug!("[drafts] no shape for placed draft {}, skipping connectors", draft.code);
                continue;
            };
            let x_max = shape.width() - 1;
            let y_max = shape.height() - 1;
            let (px, py) = draft.position;

            for cell in shape.cells() {
                if cell.connections.is_none() {
                    continue;
                }
                let (x, y) = rotate_offset(cell.x, cell.y, x_max, y_max, draft.rotation);
                for (side, conn) in cell.iter_connections() {
                    let key = x
                        .checked_add(px)
                        .zip(y.checked_add(py))
                        .and_then(|(bx, by)| SlotKey::new(bx, by, side.rotated(draft.rotation)));
                    let Some(key) = key else {
                        debug!("[drafts] connector of {} is off the slot grid, skipping", draft.code);
                        continue;
                    };
                    slots.insert(
                        key,
                        ConnectionSlot {
                            connection_type: &conn.connection_type,
                            draft: index,
                            is_output: conn.is_output,
                        },
                    );
                }
            }
        }

        let edges = slots
            .iter()
            .filter(|(_, slot)| slot.is_output)
            .filter_map(|(key, slot)| {
                let target = slots.get(&key.facing())?;
                if target.is_output || target.connection_type != slot.connection_type {
                    return None;
                }
                Some(GraphEdge {
                    from: slot.draft,
                    to: target.draft,
                    connection_type: target.connection_type.clone(),
                })
            })
            .collect();

        Self { drafts, edges }
    }

    pub fn drafts(&self) -> &[&'a PlacedDraft] {
        &self.drafts
    }

    /// Edges in unspecified order.
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Number of edges leaving each draft, indexed like [`drafts`](Self::drafts).
    pub fn output_counts(&self) -> Vec<u32> {
        let mut counts = vec![0u32; self.drafts.len()];
        for edge in &self.edges {
            counts[edge.from] += 1;
        }
        counts
    }

    /// Reduce to a canonical signature keyed by draft codes.
    pub fn signature(&self) -> CanonicalSignature {
        let nodes = self
            .drafts
            .iter()
            .zip(self.output_counts())
            .map(|(draft, count)| NodeInfo::new(draft.code.clone(), count))
            .collect();
        let connections = self
            .edges
            .iter()
            .map(|edge| {
                ConnectionInfo::new(
                    self.drafts[edge.from].code.clone(),
                    self.drafts[edge.to].code.clone(),
                    edge.connection_type.clone(),
                )
            })
            .collect();
        CanonicalSignature::from_parts(nodes, connections)
    }
}

/// Build the canonical signature of `drafts` in one call.
pub fn build_signature<'a, I, S>(drafts: I, shapes: &'a S) -> CanonicalSignature
where
    I: IntoIterator<Item = &'a PlacedDraft>,
    S: ShapeLookup + ?Sized,
{
    ConnectionGraph::build(drafts, shapes).signature()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Connection, DraftShape, ShapeCell};
    use std::collections::HashMap;

    fn code(path: &str) -> AssetCode {
        AssetCode::new("drafts", path)
    }

    fn single_cell(conns: [Option<Connection>; 4], name: &str) -> DraftShape {
        DraftShape::new(
            vec![ShapeCell::with_connections(0, 0, conns)],
            1,
            1,
            code(name),
            u32::MAX,
        )
        .unwrap()
    }

    /// pump: water output on Right. tank: water input on Left.
    /// pipe: water input on Left, water output on Right.
    fn shapes() -> HashMap<AssetCode, DraftShape> {
        let water = || code("water");
        let mut map = HashMap::new();
        map.insert(
            code("pump"),
            single_cell([None, Some(Connection::output(water())), None, None], "pump"),
        );
        map.insert(
            code("tank"),
            single_cell([None, None, None, Some(Connection::input(water()))], "tank"),
        );
        map.insert(
            code("pipe"),
            single_cell(
                [
                    None,
                    Some(Connection::output(water())),
                    None,
                    Some(Connection::input(water())),
                ],
                "pipe",
            ),
        );
        map.insert(
            code("power-tank"),
            single_cell([None, None, None, Some(Connection::input(code("power")))], "power-tank"),
        );
        map
    }

    #[test]
    fn slot_key_facing_lands_on_neighbour() {
        let right = SlotKey::new(0, 0, ConnectionSide::Right).unwrap();
        let left_of_next = SlotKey::new(1, 0, ConnectionSide::Left).unwrap();
        assert_eq!(right.facing(), left_of_next);
        let up = SlotKey::new(3, 3, ConnectionSide::Up).unwrap();
        assert_eq!(Some(up.facing()), SlotKey::new(3, 2, ConnectionSide::Down));
    }

    #[test]
    fn far_off_drafts_keep_their_node_but_lose_connectors() {
        assert_eq!(SlotKey::new(i32::MAX, 0, ConnectionSide::Right), None);
        assert_eq!(SlotKey::new(0, i32::MIN, ConnectionSide::Up), None);

        let shapes = shapes();
        let edge = vec![
            PlacedDraft::new(code("pump"), (i32::MAX - 1, 0), 0),
            PlacedDraft::new(code("tank"), (i32::MAX, 0), 0),
        ];
        let graph = ConnectionGraph::build(&edge, &shapes);
        assert!(graph.edges().is_empty());
        assert_eq!(graph.signature().nodes().len(), 2);

        let far = vec![
            PlacedDraft::new(code("pump"), (1 << 29, -(1 << 29)), 0),
            PlacedDraft::new(code("tank"), ((1 << 29) + 1, -(1 << 29)), 0),
        ];
        assert_eq!(ConnectionGraph::build(&far, &shapes).edges().len(), 1);
    }

    #[test]
    fn adjacent_output_and_input_form_edge() {
        let shapes = shapes();
        let drafts = vec![
            PlacedDraft::new(code("pump"), (0, 0), 0),
            PlacedDraft::new(code("tank"), (1, 0), 0),
        ];
        let graph = ConnectionGraph::build(&drafts, &shapes);
        assert_eq!(
            graph.edges(),
            &[GraphEdge {
                from: 0,
                to: 1,
                connection_type: code("water")
            }]
        );
        assert_eq!(graph.output_counts(), vec![1, 0]);
    }

    #[test]
    fn mismatched_types_and_gaps_form_no_edge() {
        let shapes = shapes();
        let wrong_type = vec![
            PlacedDraft::new(code("pump"), (0, 0), 0),
            PlacedDraft::new(code("power-tank"), (1, 0), 0),
        ];
        assert!(ConnectionGraph::build(&wrong_type, &shapes).edges().is_empty());

        let gap = vec![
            PlacedDraft::new(code("pump"), (0, 0), 0),
            PlacedDraft::new(code("tank"), (2, 0), 0),
        ];
        assert!(ConnectionGraph::build(&gap, &shapes).edges().is_empty());
    }

    #[test]
    fn output_facing_output_forms_no_edge() {
        let shapes = shapes();
        // Pump rotated twice has its output on the Left, facing the first pump's output.
        let drafts = vec![
            PlacedDraft::new(code("pump"), (0, 0), 0),
            PlacedDraft::new(code("pump"), (1, 0), 2),
        ];
        assert!(ConnectionGraph::build(&drafts, &shapes).edges().is_empty());
    }

    #[test]
    fn rotation_turns_connectors() {
        let shapes = shapes();
        // Pump turned once: output faces Down. Tank turned once: input faces Up.
        let drafts = vec![
            PlacedDraft::new(code("pump"), (4, 4), 1),
            PlacedDraft::new(code("tank"), (4, 5), 1),
        ];
        let sig = build_signature(&drafts, &shapes);
        assert_eq!(
            sig.connections(),
            &[ConnectionInfo::new(code("pump"), code("tank"), code("water"))]
        );
    }

    #[test]
    fn chain_signature_counts_outputs_per_node() {
        let shapes = shapes();
        let drafts = vec![
            PlacedDraft::new(code("pump"), (0, 0), 0),
            PlacedDraft::new(code("pipe"), (1, 0), 0),
            PlacedDraft::new(code("tank"), (2, 0), 0),
        ];
        let sig = build_signature(&drafts, &shapes);
        assert_eq!(
            sig.nodes(),
            &[
                NodeInfo::new(code("pipe"), 1),
                NodeInfo::new(code("pump"), 1),
                NodeInfo::new(code("tank"), 0),
            ]
        );
        assert_eq!(sig.connections().len(), 2);
    }

    #[test]
    fn later_draft_overwrites_shared_slot() {
        let shapes = shapes();
        // Both tanks claim the same cell; only the later one's input remains.
        let drafts = vec![
            PlacedDraft::new(code("pump"), (0, 0), 0),
            PlacedDraft::new(code("tank"), (1, 0), 0),
            PlacedDraft::new(code("power-tank"), (1, 0), 0),
        ];
        let graph = ConnectionGraph::build(&drafts, &shapes);
        assert!(graph.edges().is_empty());
    }

    #[test]
    fn unknown_shape_is_a_node_without_connectors() {
        let shapes = shapes();
        let drafts = vec![
            PlacedDraft::new(code("pump"), (0, 0), 0),
            PlacedDraft::new(code("mystery"), (1, 0), 0),
        ];
        let sig = build_signature(&drafts, &shapes);
        assert_eq!(sig.nodes().len(), 2);
        assert!(sig.connections().is_empty());
    }
}
