//! Core data structures for schematic drafts
//!
//! This crate provides the position-independent half of the recipe engine:
//! - `AssetCode` - `domain:path` identifiers for drafts, connection types and items
//! - `DraftShape` - Cell footprint with typed, directional connectors, plus rotation
//! - `DraftLayout` - A bounded surface of non-overlapping `PlacedDraft`s
//! - `ConnectionGraph` - Matched output → input pairs between placed drafts
//! - `CanonicalSignature` - Sorted node multiset + edge list used as a recipe key
//!
//! Everything here is plain data and pure functions; nothing touches storage,
//! rendering or networking.

mod code;
mod graph;
mod layout;
mod lookup;
mod shape;
mod signature;

pub use code::{AssetCode, DEFAULT_DOMAIN};
pub use graph::{build_signature, ConnectionGraph, ConnectionSlot, GraphEdge, SlotKey};
pub use layout::{DraftLayout, PlacedDraft};
pub use lookup::{ConnectionTypeLookup, ShapeLookup};
pub use shape::{
    rotate_offset, CellConnections, Connection, ConnectionSide, DraftShape, ShapeCell,
};
pub use signature::{
    compare_nodes, CanonicalForm, CanonicalSignature, ConnectionInfo, FormEdge, FormNode,
    NodeInfo,
};

use thiserror::Error;

/// Errors raised while building shapes or parsing codes
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("shape has no cells")]
    Empty,
    #[error("cell ({x}, {y}) lies outside the {width}x{height} shape box")]
    CellOutOfBounds {
        x: i32,
        y: i32,
        width: i32,
        height: i32,
    },
    #[error("cell ({x}, {y}) declares both an input and an output on side {side:?}")]
    InputOutputCollision { x: i32, y: i32, side: ConnectionSide },
    #[error("unknown connection type '{0}'")]
    UnknownConnectionType(AssetCode),
    #[error("invalid asset code '{0}'")]
    InvalidCode(String),
}

/// Errors raised while expanding a [`CanonicalForm`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("edge references node {index} but only {node_count} nodes exist")]
    NodeIndexOutOfRange { index: u32, node_count: usize },
}
