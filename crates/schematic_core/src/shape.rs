//! Draft shapes: cell sets with directional connectors, and quarter-turn rotation.
//!
//! Coordinates are y-down: side [`ConnectionSide::Up`] faces `y - 1`.
//! Rotation is clockwise in 90° steps. A [`DraftShape`] is an immutable value;
//! [`DraftShape::rotate`] always returns a new shape and never touches `self`.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{AssetCode, ShapeError};

// ─── Sides ───────────────────────────────────────────────────────────────────

/// One of the four sides of a shape cell. The discriminant is the side index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionSide {
    #[serde(alias = "u", alias = "t", alias = "top")]
    Up = 0,
    #[serde(alias = "r")]
    Right = 1,
    #[serde(alias = "d", alias = "b", alias = "bottom")]
    Down = 2,
    #[serde(alias = "l")]
    Left = 3,
}

impl ConnectionSide {
    /// All sides in index order.
    pub const ALL: [ConnectionSide; 4] = [
        ConnectionSide::Up,
        ConnectionSide::Right,
        ConnectionSide::Down,
        ConnectionSide::Left,
    ];

    /// Side for an index, taken modulo 4.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index & 3]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// The side this one faces after `steps` clockwise quarter turns.
    pub fn rotated(self, steps: u8) -> Self {
        Self::from_index(self.index() + steps as usize)
    }

    pub fn opposite(self) -> Self {
        self.rotated(2)
    }

    /// Unit grid step in the direction this side faces.
    pub fn offset(self) -> (i32, i32) {
        match self {
            ConnectionSide::Up => (0, -1),
            ConnectionSide::Right => (1, 0),
            ConnectionSide::Down => (0, 1),
            ConnectionSide::Left => (-1, 0),
        }
    }

    /// Parse a side name as written in draft descriptors (`up`, `u`, `t`, `top`, ...).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "up" | "u" | "t" | "top" => Some(ConnectionSide::Up),
            "right" | "r" => Some(ConnectionSide::Right),
            "down" | "d" | "b" | "bottom" => Some(ConnectionSide::Down),
            "left" | "l" => Some(ConnectionSide::Left),
            _ => None,
        }
    }
}

// ─── Connectors ──────────────────────────────────────────────────────────────

/// A typed connector on one side of a cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Connection {
    pub connection_type: AssetCode,
    /// `true` for an output, `false` for an input.
    pub is_output: bool,
}

impl Connection {
    pub fn input(connection_type: AssetCode) -> Self {
        Self {
            connection_type,
            is_output: false,
        }
    }

    pub fn output(connection_type: AssetCode) -> Self {
        Self {
            connection_type,
            is_output: true,
        }
    }
}

/// Connectors of one cell, indexed by [`ConnectionSide::index`].
pub type CellConnections = [Option<Connection>; 4];

/// A cell of a shape, local to the shape's bounding box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeCell {
    pub x: i32,
    pub y: i32,
    /// `None` when the cell has no connectors at all.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connections: Option<CellConnections>,
}

impl ShapeCell {
    /// A cell without connectors.
    pub fn plain(x: i32, y: i32) -> Self {
        Self {
            x,
            y,
            connections: None,
        }
    }

    pub fn with_connections(x: i32, y: i32, connections: CellConnections) -> Self {
        Self {
            x,
            y,
            connections: Some(connections),
        }
    }

    /// Connector on `side`, if any.
    pub fn connection(&self, side: ConnectionSide) -> Option<&Connection> {
        self.connections
            .as_ref()
            .and_then(|conns| conns[side.index()].as_ref())
    }

    /// Iterate `(side, connector)` pairs that are present.
    pub fn iter_connections(&self) -> impl Iterator<Item = (ConnectionSide, &Connection)> {
        self.connections
            .iter()
            .flat_map(|conns| conns.iter().enumerate())
            .filter_map(|(i, conn)| conn.as_ref().map(|c| (ConnectionSide::from_index(i), c)))
    }

    /// Half turn inside a `(x_max + 1) × (y_max + 1)` box.
    pub fn turn_180(&self, x_max: i32, y_max: i32) -> Self {
        Self {
            x: x_max - self.x,
            y: y_max - self.y,
            connections: self.connections.as_ref().map(|c| permute(c, 2)),
        }
    }

    /// Clockwise quarter turn. The box's width and height swap.
    pub fn turn_90(&self, y_max: i32) -> Self {
        Self {
            x: y_max - self.y,
            y: self.x,
            connections: self.connections.as_ref().map(|c| permute(c, 1)),
        }
    }
}

/// Move the connector on side `i` to side `(i + steps) & 3`.
fn permute(conns: &CellConnections, steps: usize) -> CellConnections {
    std::array::from_fn(|i| conns[(i + 4 - steps) & 3].clone())
}

/// Map local cell coordinates through `rotation` clockwise quarter turns of a
/// `(x_max + 1) × (y_max + 1)` box. Same algebra as [`DraftShape::rotate`].
pub fn rotate_offset(x: i32, y: i32, x_max: i32, y_max: i32, rotation: u8) -> (i32, i32) {
    match rotation & 3 {
        1 => (y_max - y, x),
        2 => (x_max - x, y_max - y),
        3 => (y, x_max - x),
        _ => (x, y),
    }
}

// ─── Shape ───────────────────────────────────────────────────────────────────

/// Immutable description of a draft's footprint and connectors.
///
/// Cells are shared behind an [`Arc`], so cloning a shape is cheap and a
/// zero-step rotation hands back the same cell storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ShapeData")]
pub struct DraftShape {
    width: i32,
    height: i32,
    cells: Arc<[ShapeCell]>,
    /// Texture drawn over the shape area.
    pub texture: AssetCode,
    /// Packed ARGB tint. `u32::MAX` means untinted.
    pub color: u32,
}

/// Unchecked serde form of [`DraftShape`].
#[derive(Deserialize)]
struct ShapeData {
    width: i32,
    height: i32,
    cells: Vec<ShapeCell>,
    texture: AssetCode,
    color: u32,
}

impl TryFrom<ShapeData> for DraftShape {
    type Error = ShapeError;

    fn try_from(data: ShapeData) -> Result<Self, Self::Error> {
        Self::new(data.cells, data.width, data.height, data.texture, data.color)
    }
}

impl DraftShape {
    /// Build a shape, checking that it has cells and that all cells lie inside the box.
    pub fn new(
        cells: Vec<ShapeCell>,
        width: i32,
        height: i32,
        texture: AssetCode,
        color: u32,
    ) -> Result<Self, ShapeError> {
        if cells.is_empty() {
            return Err(ShapeError::Empty);
        }
        if let Some(cell) = cells
            .iter()
            .find(|c| c.x < 0 || c.y < 0 || c.x >= width || c.y >= height)
        {
            return Err(ShapeError::CellOutOfBounds {
                x: cell.x,
                y: cell.y,
                width,
                height,
            });
        }
        Ok(Self {
            width,
            height,
            cells: cells.into(),
            texture,
            color,
        })
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn cells(&self) -> &[ShapeCell] {
        &self.cells
    }

    /// Number of connectors over all cells.
    pub fn connection_count(&self) -> usize {
        self.cells.iter().map(|c| c.iter_connections().count()).sum()
    }

    /// Return this shape turned clockwise by `steps` quarter turns (taken mod 4).
    ///
    /// Odd step counts swap width and height.
    pub fn rotate(&self, steps: u8) -> DraftShape {
        let steps = steps & 3;
        if steps == 0 {
            return self.clone();
        }
        let x_max = self.width - 1;
        let y_max = self.height - 1;
        let cells: Arc<[ShapeCell]> = match steps {
            1 => self.cells.iter().map(|c| c.turn_90(y_max)).collect(),
            2 => self.cells.iter().map(|c| c.turn_180(x_max, y_max)).collect(),
            _ => self
                .cells
                .iter()
                .map(|c| c.turn_180(x_max, y_max).turn_90(y_max))
                .collect(),
        };
        let (width, height) = if steps & 1 == 0 {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        };
        DraftShape {
            width,
            height,
            cells,
            texture: self.texture.clone(),
            color: self.color,
        }
    }

    /// Board cells covered when this shape is placed at `position` with `rotation`.
    pub fn covered_cells(
        &self,
        position: (i32, i32),
        rotation: u8,
    ) -> impl Iterator<Item = (i32, i32)> + '_ {
        let x_max = self.width - 1;
        let y_max = self.height - 1;
        self.cells.iter().map(move |cell| {
            let (x, y) = rotate_offset(cell.x, cell.y, x_max, y_max, rotation);
            (x + position.0, y + position.1)
        })
    }

    /// Footprint `(width, height)` after `rotation` quarter turns.
    pub fn rotated_size(&self, rotation: u8) -> (i32, i32) {
        if rotation & 1 == 0 {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        }
    }
}
