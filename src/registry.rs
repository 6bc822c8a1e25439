//! Caller-owned cache of one catalog manager per locale.
//!
//! The engine itself is stateless with respect to other instances; this
//! registry is the piece a transport layer holds to map a locale onto its
//! manager, bootstrapping `<translations-root>/<locale>/translation.json`
//! on first use. It adds no locking: serializing concurrent editors of one
//! locale remains the caller's job.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::PathBuf;

use crate::catalog::{
    CatalogManager,
    DEFAULT_SCHEMA_PATH,
};
use crate::error::CatalogError;

/// File name of the catalog inside each locale directory.
const CATALOG_FILE_NAME: &str = "translation.json";

/// Source language written into freshly bootstrapped catalogs.
const DEFAULT_SOURCE_LANGUAGE: &str = "en";

/// Per-locale [`CatalogManager`] cache rooted at a translations directory.
#[derive(Debug)]
pub struct CatalogRegistry {
    /// Directory holding one subdirectory per locale.
    translations_root: PathBuf,
    /// Schema resource handed to every manager.
    schema_path: PathBuf,
    /// Managers by locale, created on first request.
    managers: HashMap<String, CatalogManager>,
}

impl CatalogRegistry {
    /// Create a registry rooted at `translations_root`, using the default
    /// schema location.
    #[must_use]
    pub fn new(translations_root: impl Into<PathBuf>) -> Self {
        Self {
            translations_root: translations_root.into(),
            schema_path: PathBuf::from(DEFAULT_SCHEMA_PATH),
            managers: HashMap::new(),
        }
    }

    /// Override the schema resource handed to newly created managers.
    #[must_use]
    pub fn with_schema_path(mut self, schema_path: impl Into<PathBuf>) -> Self {
        self.schema_path = schema_path.into();
        self
    }

    /// The manager for `locale`, binding and bootstrapping its catalog file
    /// on first request and reusing the same instance afterwards.
    ///
    /// # Errors
    /// Any [`CatalogError`] from binding or from the file bootstrap.
    pub fn manager_for(&mut self, locale: &str) -> Result<&mut CatalogManager, CatalogError> {
        match self.managers.entry(locale.to_string()) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let path = self.translations_root.join(locale).join(CATALOG_FILE_NAME);
                tracing::debug!(locale, path = %path.display(), "binding catalog manager");

                let mut manager = CatalogManager::bind(path)?;
                manager.set_schema_path(self.schema_path.clone());
                manager.create_file(locale, DEFAULT_SOURCE_LANGUAGE)?;

                Ok(entry.insert(manager))
            }
        }
    }
}
