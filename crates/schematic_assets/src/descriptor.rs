//! Draft descriptors: where draft shapes come from.

use schematic_core::{AssetCode, CellConnections, Connection, ConnectionSide, DraftShape, ShapeCell, ShapeError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::{AssetDocument, AssetError, ConnectionTypeRegistry, LoadSettings};

/// Describes one or more drafts.
///
/// [`init`](Self::init) runs once, possibly on a worker thread, before any
/// other method is called. A descriptor whose `init` failed contributes no drafts.
pub trait DraftDescriptor: Send + Sync + fmt::Debug {
    /// Build shapes, checking connector types against `connection_types` when given.
    fn init(&mut self, connection_types: Option<&ConnectionTypeRegistry>) -> Result<(), AssetError>;

    /// Codes served by this descriptor.
    fn draft_codes(&self) -> Vec<AssetCode>;

    /// Lower-case group names the draft is listed under.
    fn draft_groups(&self, code: &AssetCode) -> &[String];

    fn draft_shape(&self, code: &AssetCode) -> Option<&DraftShape>;

    /// Interactive drafts can be used directly from a player's draft collection.
    fn is_interactive(&self, code: &AssetCode) -> bool;

    /// Name used in log messages.
    fn label(&self) -> String {
        format!("{self:?}")
    }
}

// ─── JSON descriptor ─────────────────────────────────────────────────────────

/// Connectors of one shape character, by side name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellDocument {
    #[serde(default)]
    pub inputs: BTreeMap<String, AssetCode>,
    #[serde(default)]
    pub outputs: BTreeMap<String, AssetCode>,
}

/// A draft as written in a descriptor file.
///
/// `shape` rows run top to bottom, characters left to right. Characters
/// missing from `cells` are holes; a character mapped to `null` is a cell
/// without connectors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftDocument {
    pub code: AssetCode,
    pub shape: Vec<String>,
    pub cells: BTreeMap<char, Option<CellDocument>>,
    pub texture: AssetCode,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub groups: Vec<Option<String>>,
    #[serde(default)]
    pub interactive: bool,
}

impl DraftDocument {
    fn qualify(&mut self, domain: &str) {
        self.code.qualify(domain);
        self.texture.qualify(domain);
        for cell in self.cells.values_mut().flatten() {
            for code in cell.inputs.values_mut().chain(cell.outputs.values_mut()) {
                code.qualify(domain);
            }
        }
    }
}

/// Descriptor for a single draft read from JSON.
#[derive(Debug, Clone)]
pub struct ItemDraftDescriptor {
    document: DraftDocument,
    shape: Option<DraftShape>,
    groups: Vec<String>,
}

impl ItemDraftDescriptor {
    pub fn new(document: DraftDocument) -> Self {
        Self {
            document,
            shape: None,
            groups: Vec::new(),
        }
    }

    /// Parse a descriptor file, qualifying bare codes with [`AssetDocument::code_domain`].
    pub fn from_document(document: &AssetDocument, settings: &LoadSettings) -> Result<Self, AssetError> {
        let mut draft: DraftDocument = serde_json::from_str(&document.content)?;
        draft.qualify(document.code_domain(settings));
        Ok(Self::new(draft))
    }

    pub fn code(&self) -> &AssetCode {
        &self.document.code
    }

    fn build_shape(&self, connection_types: Option<&ConnectionTypeRegistry>) -> Result<DraftShape, AssetError> {
        let doc = &self.document;
        let mut cells = Vec::new();
        let mut width = 0usize;
        for (y, row) in doc.shape.iter().enumerate() {
            width = width.max(row.chars().count());
            for (x, ch) in row.chars().enumerate() {
                let Some(cell) = doc.cells.get(&ch) else {
                    continue;
                };
                let (x, y) = (x as i32, y as i32);
                let cell = match cell {
                    Some(cell) if !(cell.inputs.is_empty() && cell.outputs.is_empty()) => {
                        ShapeCell::with_connections(x, y, self.cell_connections(x, y, cell, connection_types)?)
                    }
                    _ => ShapeCell::plain(x, y),
                };
                cells.push(cell);
            }
        }
        if cells.is_empty() {
            return Err(ShapeError::Empty.into());
        }
        Ok(DraftShape::new(
            cells,
            width as i32,
            doc.shape.len() as i32,
            doc.texture.clone(),
            parse_color(doc.color.as_deref()),
        )?)
    }

    fn cell_connections(
        &self,
        x: i32,
        y: i32,
        cell: &CellDocument,
        connection_types: Option<&ConnectionTypeRegistry>,
    ) -> Result<CellConnections, AssetError> {
        let mut connections: CellConnections = Default::default();
        let mut has_input = [false; 4];
        let sides = cell
            .inputs
            .iter()
            .map(|entry| (entry, false))
            .chain(cell.outputs.iter().map(|entry| (entry, true)));
        for ((side_name, connection_type), is_output) in sides {
            let side = ConnectionSide::parse(side_name).ok_or_else(|| AssetError::UnknownSide {
                draft: self.document.code.clone(),
                side: side_name.clone(),
            })?;
            if let Some(types) = connection_types {
                if !types.contains(connection_type) {
                    return Err(ShapeError::UnknownConnectionType(connection_type.clone()).into());
                }
            }
            if is_output {
                if has_input[side.index()] {
                    return Err(ShapeError::InputOutputCollision { x, y, side }.into());
                }
                connections[side.index()] = Some(Connection::output(connection_type.clone()));
            } else {
                has_input[side.index()] = true;
                connections[side.index()] = Some(Connection::input(connection_type.clone()));
            }
        }
        Ok(connections)
    }
}

impl DraftDescriptor for ItemDraftDescriptor {
    fn init(&mut self, connection_types: Option<&ConnectionTypeRegistry>) -> Result<(), AssetError> {
        self.shape = None;
        let shape = self.build_shape(connection_types)?;
        self.groups = self
            .document
            .groups
            .iter()
            .flatten()
            .filter(|group| !group.trim().is_empty())
            .map(|group| group.to_lowercase())
            .collect();
        self.shape = Some(shape);
        Ok(())
    }

    fn draft_codes(&self) -> Vec<AssetCode> {
        match self.shape {
            Some(_) => vec![self.document.code.clone()],
            None => Vec::new(),
        }
    }

    fn draft_groups(&self, _code: &AssetCode) -> &[String] {
        &self.groups
    }

    fn draft_shape(&self, code: &AssetCode) -> Option<&DraftShape> {
        if *code != self.document.code {
            return None;
        }
        self.shape.as_ref()
    }

    fn is_interactive(&self, _code: &AssetCode) -> bool {
        self.document.interactive
    }

    fn label(&self) -> String {
        self.document.code.to_string()
    }
}

/// Parse `#RRGGBB` or `#AARRGGBB` into packed ARGB. Anything else is `u32::MAX`.
pub fn parse_color(text: Option<&str>) -> u32 {
    let Some(hex) = text.map(str::trim).and_then(|t| t.strip_prefix('#')) else {
        return u32::MAX;
    };
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return u32::MAX;
    }
    match (hex.len(), u32::from_str_radix(hex, 16)) {
        (6, Ok(rgb)) => 0xFF00_0000 | rgb,
        (8, Ok(argb)) => argb,
        _ => u32::MAX,
    }
}
