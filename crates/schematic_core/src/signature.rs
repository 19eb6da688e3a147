//! Canonical signatures: the position-independent lookup key of a layout.
//!
//! A signature is a sorted multiset of [`NodeInfo`] plus a sorted list of
//! [`ConnectionInfo`]. Nodes are identified by draft code, not by instance, so
//! two drafts of the same code are only told apart through their edges.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

use crate::{AssetCode, FormError};

/// One placed draft, reduced to its code and out-degree.
///
/// Ordered by code (domain, then path), then by output count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeInfo {
    pub draft_code: AssetCode,
    pub output_count: u32,
}

impl NodeInfo {
    pub fn new(draft_code: AssetCode, output_count: u32) -> Self {
        Self {
            draft_code,
            output_count,
        }
    }
}

/// A directed, typed edge between two draft codes.
///
/// Ordered by `from`, then `to`, then `connection_type`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ConnectionInfo {
    pub from: AssetCode,
    pub to: AssetCode,
    pub connection_type: AssetCode,
}

impl ConnectionInfo {
    pub fn new(from: AssetCode, to: AssetCode, connection_type: AssetCode) -> Self {
        Self {
            from,
            to,
            connection_type,
        }
    }
}

/// Order two node sequences: shorter first, then element-wise.
pub fn compare_nodes(a: &[NodeInfo], b: &[NodeInfo]) -> Ordering {
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Sorted `(nodes, connections)` pair used to look up recipes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanonicalSignature {
    nodes: Vec<NodeInfo>,
    connections: Vec<ConnectionInfo>,
}

impl CanonicalSignature {
    /// Build a signature from unsorted parts.
    pub fn from_parts(mut nodes: Vec<NodeInfo>, mut connections: Vec<ConnectionInfo>) -> Self {
        nodes.sort();
        connections.sort();
        Self { nodes, connections }
    }

    pub fn nodes(&self) -> &[NodeInfo] {
        &self.nodes
    }

    pub fn connections(&self) -> &[ConnectionInfo] {
        &self.connections
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn into_parts(self) -> (Vec<NodeInfo>, Vec<ConnectionInfo>) {
        (self.nodes, self.connections)
    }

    /// Compact form with edges pointing at node indices.
    ///
    /// When several nodes share a code, edges reference the last of them.
    pub fn to_form(&self) -> CanonicalForm {
        let mut code_to_index: HashMap<&AssetCode, u32> = HashMap::with_capacity(self.nodes.len());
        let nodes = self
            .nodes
            .iter()
            .enumerate()
            .map(|(i, node)| {
                code_to_index.insert(&node.draft_code, i as u32);
                FormNode {
                    code: node.draft_code.clone(),
                    outputs: node.output_count,
                }
            })
            .collect();
        let connections = self
            .connections
            .iter()
            .filter_map(|conn| {
                Some(FormEdge {
                    from: *code_to_index.get(&conn.from)?,
                    to: *code_to_index.get(&conn.to)?,
                    connection_type: conn.connection_type.clone(),
                })
            })
            .collect();
        CanonicalForm { nodes, connections }
    }
}

// ─── Compact form ────────────────────────────────────────────────────────────

/// Serializable form of a [`CanonicalSignature`] that stores each draft code once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalForm {
    pub nodes: Vec<FormNode>,
    #[serde(default)]
    pub connections: Vec<FormEdge>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormNode {
    pub code: AssetCode,
    pub outputs: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormEdge {
    pub from: u32,
    pub to: u32,
    #[serde(rename = "type")]
    pub connection_type: AssetCode,
}

impl CanonicalForm {
    /// Expand back into a signature. Fails on an edge index past the node list.
    pub fn into_signature(self) -> Result<CanonicalSignature, FormError> {
        let node_count = self.nodes.len();
        let code_at = |index: u32| {
            self.nodes
                .get(index as usize)
                .map(|n| n.code.clone())
                .ok_or(FormError::NodeIndexOutOfRange { index, node_count })
        };
        let connections = self
            .connections
            .iter()
            .map(|edge| {
                Ok(ConnectionInfo::new(
                    code_at(edge.from)?,
                    code_at(edge.to)?,
                    edge.connection_type.clone(),
                ))
            })
            .collect::<Result<Vec<_>, FormError>>()?;
        let nodes = self
            .nodes
            .into_iter()
            .map(|n| NodeInfo::new(n.code, n.outputs))
            .collect();
        Ok(CanonicalSignature::from_parts(nodes, connections))
    }
}
