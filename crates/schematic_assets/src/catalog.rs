//! The immutable draft catalog built from initialized descriptors.

use rayon::prelude::*;
use schematic_core::{AssetCode, DraftShape, ShapeLookup};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info};

use crate::{AssetDocument, AssetError, ConnectionTypeRegistry, DraftDescriptor, ItemDraftDescriptor, LoadSettings};

/// Per-worker results: `(input index, code, descriptor)` entries and init errors.
#[derive(Default)]
struct InitBatch {
    entries: Vec<(usize, AssetCode, Arc<dyn DraftDescriptor>)>,
    errors: Vec<String>,
}

impl InitBatch {
    fn push(
        mut self,
        index: usize,
        mut descriptor: Box<dyn DraftDescriptor>,
        connection_types: Option<&ConnectionTypeRegistry>,
    ) -> Self {
        if let Err(e) = descriptor.init(connection_types) {
            self.errors.push(format!("{}: {}", descriptor.label(), e));
            return self;
        }
        let descriptor: Arc<dyn DraftDescriptor> = Arc::from(descriptor);
        for code in descriptor.draft_codes() {
            self.entries.push((index, code, Arc::clone(&descriptor)));
        }
        self
    }

    fn merge(&mut self, other: InitBatch) {
        self.entries.extend(other.entries);
        self.errors.extend(other.errors);
    }
}

/// Draft code → descriptor, fixed once loading completes.
#[derive(Debug, Clone, Default)]
pub struct DraftCatalog {
    descriptors: HashMap<AssetCode, Arc<dyn DraftDescriptor>>,
}

impl DraftCatalog {
    /// Initialize `descriptors` and register every code they serve.
    ///
    /// Descriptors are initialized on the rayon pool when `settings.parallel`
    /// is set. Failing descriptors are logged and left out. When two
    /// descriptors serve the same code, the one listed first wins.
    pub fn load(
        descriptors: Vec<Box<dyn DraftDescriptor>>,
        connection_types: Option<&ConnectionTypeRegistry>,
        settings: &LoadSettings,
    ) -> Self {
        let merged = Mutex::new(InitBatch::default());
        if settings.parallel {
            descriptors
                .into_par_iter()
                .enumerate()
                .fold(InitBatch::default, |batch, (index, descriptor)| {
                    batch.push(index, descriptor, connection_types)
                })
                .for_each(|batch| {
                    merged
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .merge(batch);
                });
        } else {
            let batch = descriptors
                .into_iter()
                .enumerate()
                .fold(InitBatch::default(), |batch, (index, descriptor)| {
                    batch.push(index, descriptor, connection_types)
                });
            merged
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .merge(batch);
        }
        let mut batch = merged.into_inner().unwrap_or_else(PoisonError::into_inner);

        for message in &batch.errors {
            error!("[drafts] draft descriptor failed to initialize: {}", message);
        }

        // Workers finish in any order; registration follows input order.
        batch.entries.sort_by_key(|(index, _, _)| *index);
        let mut catalog = Self::default();
        for (_, code, descriptor) in batch.entries {
            if let Err(e) = catalog.register(code, descriptor) {
                error!("[drafts] {}", e);
            }
        }
        info!("[drafts] registered {} drafts", catalog.len());
        catalog
    }

    /// Parse every document as an [`ItemDraftDescriptor`] and [`load`](Self::load) them.
    ///
    /// Documents that fail to parse are logged and skipped.
    pub fn load_documents(
        documents: &[AssetDocument],
        connection_types: Option<&ConnectionTypeRegistry>,
        settings: &LoadSettings,
    ) -> Self {
        let descriptors = documents
            .iter()
            .filter_map(|document| match ItemDraftDescriptor::from_document(document, settings) {
                Ok(descriptor) => Some(Box::new(descriptor) as Box<dyn DraftDescriptor>),
                Err(e) => {
                    error!("[drafts] unable to read draft '{}': {}", document.source, e);
                    None
                }
            })
            .collect();
        Self::load(descriptors, connection_types, settings)
    }

    fn register(&mut self, code: AssetCode, descriptor: Arc<dyn DraftDescriptor>) -> Result<(), AssetError> {
        if self.descriptors.contains_key(&code) {
            return Err(AssetError::DuplicateDraft(code));
        }
        self.descriptors.insert(code, descriptor);
        Ok(())
    }

    pub fn get(&self, code: &AssetCode) -> Option<&Arc<dyn DraftDescriptor>> {
        self.descriptors.get(code)
    }

    pub fn contains(&self, code: &AssetCode) -> bool {
        self.descriptors.contains_key(code)
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Registered codes in sorted order.
    pub fn codes(&self) -> Vec<&AssetCode> {
        let mut codes: Vec<&AssetCode> = self.descriptors.keys().collect();
        codes.sort();
        codes
    }

    pub fn groups(&self, code: &AssetCode) -> &[String] {
        match self.get(code) {
            Some(descriptor) => descriptor.draft_groups(code),
            None => &[],
        }
    }

    pub fn is_interactive(&self, code: &AssetCode) -> bool {
        self.get(code).is_some_and(|d| d.is_interactive(code))
    }
}

impl ShapeLookup for DraftCatalog {
    fn draft_shape(&self, code: &AssetCode) -> Option<&DraftShape> {
        self.descriptors.get(code)?.draft_shape(code)
    }

    fn has_draft(&self, code: &AssetCode) -> bool {
        self.contains(code)
    }
}
