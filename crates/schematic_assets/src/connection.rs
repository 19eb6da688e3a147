//! Connection types: the vocabulary connectors are typed with.

use schematic_core::{AssetCode, ConnectionTypeLookup};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::error;

use crate::{AssetDocument, AssetError, LoadSettings};

/// Textures a connector of this type is drawn with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionTextures {
    pub input: AssetCode,
    pub output: AssetCode,
    pub connected: AssetCode,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionType {
    pub code: AssetCode,
    pub textures: ConnectionTextures,
}

impl ConnectionType {
    fn qualify(&mut self, domain: &str) {
        self.code.qualify(domain);
        self.textures.input.qualify(domain);
        self.textures.output.qualify(domain);
        self.textures.connected.qualify(domain);
    }
}

/// Registered connection types by code.
#[derive(Debug, Clone, Default)]
pub struct ConnectionTypeRegistry {
    types: HashMap<AssetCode, ConnectionType>,
}

impl ConnectionTypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `connection_type`. The first registration of a code wins.
    pub fn insert(&mut self, connection_type: ConnectionType) -> Result<(), AssetError> {
        if self.types.contains_key(&connection_type.code) {
            return Err(AssetError::DuplicateConnectionType(connection_type.code));
        }
        self.types.insert(connection_type.code.clone(), connection_type);
        Ok(())
    }

    /// Parse one document holding a JSON array of connection types.
    pub fn parse_document(
        document: &AssetDocument,
        settings: &LoadSettings,
    ) -> Result<Vec<ConnectionType>, AssetError> {
        let mut types: Vec<ConnectionType> = serde_json::from_str(&document.content)?;
        for connection_type in &mut types {
            connection_type.qualify(document.code_domain(settings));
        }
        Ok(types)
    }

    /// Build a registry from documents.
    ///
    /// A document that fails to parse is logged and skipped; a duplicate code
    /// is logged and the earlier registration kept.
    pub fn load(documents: &[AssetDocument], settings: &LoadSettings) -> Self {
        let mut registry = Self::new();
        for document in documents {
            let types = match Self::parse_document(document, settings) {
                Ok(types) => types,
                Err(e) => {
                    error!(
                        "[drafts] unable to load connection types from '{}': {}",
                        document.source, e
                    );
                    continue;
                }
            };
            for connection_type in types {
                if let Err(e) = registry.insert(connection_type) {
                    error!("[drafts] {} (file '{}')", e, document.source);
                }
            }
        }
        registry
    }

    pub fn get(&self, code: &AssetCode) -> Option<&ConnectionType> {
        self.types.get(code)
    }

    pub fn contains(&self, code: &AssetCode) -> bool {
        self.types.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConnectionType> {
        self.types.values()
    }
}

impl ConnectionTypeLookup for ConnectionTypeRegistry {
    fn has_connection_type(&self, code: &AssetCode) -> bool {
        self.contains(code)
    }
}
