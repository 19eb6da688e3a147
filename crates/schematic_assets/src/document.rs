//! Raw asset documents and where to find them.

use std::path::{Path, PathBuf};

use crate::{AssetError, LoadSettings};

/// One JSON document and the domain its unqualified codes belong to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDocument {
    /// File name or other label used in log messages.
    pub source: String,
    pub domain: String,
    pub content: String,
}

impl AssetDocument {
    pub fn new(source: impl Into<String>, domain: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            domain: domain.into(),
            content: content.into(),
        }
    }

    /// Domain for this document's bare codes: its own, else `settings.default_domain`.
    pub fn code_domain<'a>(&'a self, settings: &'a LoadSettings) -> &'a str {
        if self.domain.is_empty() {
            &settings.default_domain
        } else {
            &self.domain
        }
    }

    pub fn from_file(path: &Path, domain: &str) -> Result<Self, AssetError> {
        let content = std::fs::read_to_string(path).map_err(|e| AssetError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Ok(Self::new(path.display().to_string(), domain, content))
    }
}

/// All documents one load pass reads.
#[derive(Debug, Clone, Default)]
pub struct AssetSources {
    pub connection_types: Vec<AssetDocument>,
    pub drafts: Vec<AssetDocument>,
    pub recipes: Vec<AssetDocument>,
}

impl AssetSources {
    /// Collect `connections/`, `drafts/` and `recipes/` `*.json` files under `root`.
    ///
    /// Files are read in path order. Missing subdirectories are skipped.
    pub fn from_dir(root: &Path, domain: &str) -> Result<Self, AssetError> {
        Ok(Self {
            connection_types: read_dir_documents(&root.join("connections"), domain)?,
            drafts: read_dir_documents(&root.join("drafts"), domain)?,
            recipes: read_dir_documents(&root.join("recipes"), domain)?,
        })
    }
}

fn read_dir_documents(dir: &Path, domain: &str) -> Result<Vec<AssetDocument>, AssetError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let io_err = |e: std::io::Error| AssetError::Io {
        path: dir.display().to_string(),
        message: e.to_string(),
    };
    let mut paths: Vec<PathBuf> = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if path.extension().is_some_and(|ext| ext == "json") {
            paths.push(path);
        }
    }
    paths.sort();
    paths
        .iter()
        .map(|path| AssetDocument::from_file(path, domain))
        .collect()
}
