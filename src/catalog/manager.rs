//! The catalog engine: one stateful manager bound to one catalog file.
//!
//! The manager owns the document-store lifecycle (lazy load, validate,
//! whole-file save) and the structural CRUD on contexts and messages. It is
//! synchronous and single-threaded; two managers bound to the same path do
//! not coordinate, so concurrent saves are last-writer-wins. Callers that
//! need stronger guarantees must serialize access themselves.

use std::fs;
use std::fs::OpenOptions;
use std::path::{
    Path,
    PathBuf,
};

use serde_json::Value;

use crate::catalog::document::{
    Catalog,
    Context,
    Message,
};
use crate::catalog::schema;
use crate::error::CatalogError;

/// Required file extension for catalog files, without the leading dot.
pub const CATALOG_EXTENSION: &str = "json";

/// Loads, validates, queries, mutates and persists one translation catalog.
///
/// Construction is cheap and does no I/O; the document is read and
/// schema-validated on first access and cached for the lifetime of the
/// instance. Every failing low-level call leaves its raw diagnostic both in
/// the returned error and in a last-diagnostic slot readable via
/// [`CatalogManager::take_diagnostic`].
#[derive(Debug)]
pub struct CatalogManager {
    /// Path of the bound catalog file.
    path: PathBuf,
    /// Path of the schema resource used by validation.
    schema_path: PathBuf,
    /// Lazily materialized document; `None` until first access.
    document: Option<Catalog>,
    /// Most recent low-level diagnostic; reading it consumes it.
    last_diagnostic: Option<String>,
}

impl CatalogManager {
    /// Bind a manager to a catalog file path. No I/O happens here.
    ///
    /// # Errors
    /// [`CatalogError::InvalidPath`] if the path does not end in
    /// `.{`[`CATALOG_EXTENSION`]`}`.
    pub fn bind(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        if path.extension().and_then(|ext| ext.to_str()) != Some(CATALOG_EXTENSION) {
            return Err(CatalogError::InvalidPath {
                expected: CATALOG_EXTENSION,
                path: path.display().to_string(),
            });
        }

        Ok(Self {
            path,
            schema_path: PathBuf::from(schema::DEFAULT_SCHEMA_PATH),
            document: None,
            last_diagnostic: None,
        })
    }

    /// Path of the bound catalog file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Path of the schema resource.
    #[must_use]
    pub fn schema_path(&self) -> &Path {
        &self.schema_path
    }

    /// Override the schema resource location.
    pub fn set_schema_path(&mut self, path: impl Into<PathBuf>) {
        self.schema_path = path.into();
    }

    /// Consume and clear the most recent captured diagnostic.
    pub fn take_diagnostic(&mut self) -> Option<String> {
        self.last_diagnostic.take()
    }

    /// Record a low-level diagnostic, keeping only the most recent one.
    fn capture(&mut self, message: String) -> String {
        self.last_diagnostic = Some(message.clone());
        message
    }

    // --- document store -----------------------------------------------

    /// Read, parse and schema-validate the bound file.
    fn load(&mut self) -> Result<Catalog, CatalogError> {
        tracing::debug!(path = %self.path.display(), "loading catalog");

        let text = fs::read_to_string(&self.path)
            .map_err(|err| CatalogError::Load(self.capture(err.to_string())))?;
        let value: Value = serde_json::from_str(&text)
            .map_err(|err| CatalogError::Load(self.capture(err.to_string())))?;

        self.validate_value(&value)?;

        // Conversion after a clean schema pass; a failure here still means
        // the document does not match the catalog shape.
        serde_json::from_value(value)
            .map_err(|err| CatalogError::Validation(self.capture(err.to_string())))
    }

    /// The in-memory document, loading it from disk on first access.
    fn document(&mut self) -> Result<&mut Catalog, CatalogError> {
        if self.document.is_none() {
            let loaded = self.load()?;
            self.document = Some(loaded);
        }

        self.document
            .as_mut()
            .ok_or_else(|| CatalogError::Load("catalog document missing after load".to_string()))
    }

    /// Validate a serialized document, mirroring the diagnostic into the
    /// last-diagnostic slot.
    fn validate_value(&mut self, value: &Value) -> Result<(), CatalogError> {
        match schema::validate_document(value, &self.schema_path) {
            Ok(()) => Ok(()),
            Err(CatalogError::Validation(diagnostic)) => {
                Err(CatalogError::Validation(self.capture(diagnostic)))
            }
            Err(other) => Err(other),
        }
    }

    /// Validate the in-memory document (loading it first if needed) against
    /// the schema resource.
    ///
    /// # Errors
    /// [`CatalogError::SchemaMissing`] if the schema resource is absent;
    /// [`CatalogError::Validation`] on non-conformance.
    pub fn validate(&mut self) -> Result<(), CatalogError> {
        let value = {
            let document = self.document()?;
            serde_json::to_value(&*document)
                .map_err(|err| CatalogError::Validation(err.to_string()))?
        };

        self.validate_value(&value)
    }

    /// Persist the in-memory document as a whole-file rewrite.
    ///
    /// With `validate` set, the document is re-validated first and nothing
    /// is written on failure, so an invalid document never reaches disk.
    /// `path` overrides the bound path for this write only.
    ///
    /// # Errors
    /// [`CatalogError::Validation`] if re-validation fails;
    /// [`CatalogError::Write`] if the write itself fails.
    pub fn save(&mut self, path: Option<&Path>, validate: bool) -> Result<(), CatalogError> {
        if validate {
            self.validate()?;
        }

        let target = path.unwrap_or(&self.path).to_path_buf();
        let mut text = {
            let document = self.document()?;
            serde_json::to_string_pretty(&*document)
                .map_err(|err| CatalogError::Write(err.to_string()))?
        };
        text.push('\n');

        fs::write(&target, text)
            .map_err(|err| CatalogError::Write(self.capture(err.to_string())))?;

        tracing::debug!(path = %target.display(), "saved catalog");
        Ok(())
    }

    // --- context operations -------------------------------------------

    /// Number of contexts in the catalog.
    pub fn context_count(&mut self) -> Result<usize, CatalogError> {
        Ok(self.document()?.contexts.len())
    }

    /// Whether exactly one context has the given name.
    pub fn has_context(&mut self, name: &str) -> Result<bool, CatalogError> {
        Ok(self.document()?.context_position(name)?.is_some())
    }

    /// The context with the given name, if any.
    ///
    /// # Errors
    /// [`CatalogError::DuplicateContext`] if the document carries more than
    /// one context with this name (a hand-edited file).
    pub fn context(&mut self, name: &str) -> Result<Option<&Context>, CatalogError> {
        let document = self.document()?;
        let position = document.context_position(name)?;
        Ok(position.and_then(|index| document.contexts.get(index)))
    }

    /// The context with the given name, creating and appending an empty one
    /// if absent. Calling this twice with the same name yields the same
    /// single context.
    pub fn create_context(&mut self, name: &str) -> Result<&mut Context, CatalogError> {
        self.document()?.ensure_context(name)
    }

    /// Remove the context with the given name together with all of its
    /// messages. Returns whether a removal occurred.
    pub fn remove_context(&mut self, name: &str) -> Result<bool, CatalogError> {
        let document = self.document()?;
        match document.context_position(name)? {
            Some(index) => {
                document.contexts.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    // --- message operations -------------------------------------------

    /// Number of messages in the named context (0 if it does not exist), or
    /// across the whole catalog when `context_name` is `None`.
    pub fn message_count(&mut self, context_name: Option<&str>) -> Result<usize, CatalogError> {
        let document = self.document()?;
        match context_name {
            Some(name) => {
                Ok(document.context(name)?.map_or(0, |context| context.messages.len()))
            }
            None => Ok(document.total_message_count()),
        }
    }

    /// Whether exactly one message with the given source exists in the
    /// named context.
    pub fn has_message(&mut self, context_name: &str, source: &str) -> Result<bool, CatalogError> {
        Ok(self.message(context_name, source)?.is_some())
    }

    /// The message for the (context, source) pair, if both resolve.
    ///
    /// # Errors
    /// [`CatalogError::DuplicateMessage`] if the context carries more than
    /// one message with this source (a hand-edited file).
    pub fn message(
        &mut self,
        context_name: &str,
        source: &str,
    ) -> Result<Option<&Message>, CatalogError> {
        let document = self.document()?;
        match document.context(context_name)? {
            Some(context) => context.message(source),
            None => Ok(None),
        }
    }

    /// Create a message under the named context, creating the context on
    /// the fly if needed. If the (context, source) pair already exists this
    /// is an update of the existing translation, identical to
    /// [`CatalogManager::set_translation`].
    pub fn create_message(
        &mut self,
        context_name: &str,
        source: &str,
        translation: &str,
    ) -> Result<&Message, CatalogError> {
        self.set_translation(context_name, source, translation)
    }

    /// Remove the message for the (context, source) pair. With `cleanup`
    /// set, a context left without messages is removed as well. Returns
    /// whether a removal occurred.
    pub fn remove_message(
        &mut self,
        context_name: &str,
        source: &str,
        cleanup: bool,
    ) -> Result<bool, CatalogError> {
        let document = self.document()?;
        let Some(context_index) = document.context_position(context_name)? else {
            return Ok(false);
        };
        let Some(context) = document.contexts.get_mut(context_index) else {
            return Ok(false);
        };
        let Some(message_index) = context.message_position(source)? else {
            return Ok(false);
        };

        context.messages.remove(message_index);
        if cleanup && context.messages.is_empty() {
            document.contexts.remove(context_index);
            tracing::debug!(context = context_name, "removed context emptied by cleanup");
        }

        Ok(true)
    }

    /// The translation string for the (context, source) pair, if it
    /// resolves to a message.
    pub fn translation(
        &mut self,
        context_name: &str,
        source: &str,
    ) -> Result<Option<&str>, CatalogError> {
        Ok(self.message(context_name, source)?.map(|message| message.translation.as_str()))
    }

    /// Set the translation for the (context, source) pair, creating the
    /// context and the message on demand. This is the single canonical
    /// write path; the in-memory document changes immediately, the file
    /// only on [`CatalogManager::save`].
    pub fn set_translation(
        &mut self,
        context_name: &str,
        source: &str,
        translation: &str,
    ) -> Result<&Message, CatalogError> {
        tracing::debug!(context = context_name, source, "setting translation");
        let document = self.document()?;
        let context = document.ensure_context(context_name)?;
        context.upsert_message(source, translation)
    }

    // --- bootstrap ----------------------------------------------------

    /// Whether the bound path exists and is a regular file.
    #[must_use]
    pub fn file_exists(&self) -> bool {
        self.path.is_file()
    }

    /// Whether the bound file can be opened for reading. A probe failure is
    /// captured in the diagnostic slot instead of propagated.
    pub fn is_readable(&mut self) -> bool {
        match fs::File::open(&self.path) {
            Ok(_) => true,
            Err(err) => {
                self.capture(err.to_string());
                false
            }
        }
    }

    /// Whether the bound file can be opened for writing. A probe failure is
    /// captured in the diagnostic slot instead of propagated.
    pub fn is_writable(&mut self) -> bool {
        match OpenOptions::new().append(true).open(&self.path) {
            Ok(_) => true,
            Err(err) => {
                self.capture(err.to_string());
                false
            }
        }
    }

    /// Create a minimal empty catalog at the bound path. A no-op when the
    /// file already exists. Missing parent directories are created
    /// recursively. The new file is neither loaded nor validated.
    ///
    /// # Errors
    /// [`CatalogError::DirectoryCreate`] / [`CatalogError::FileCreate`] on
    /// the respective filesystem failure.
    pub fn create_file(
        &mut self,
        language: &str,
        source_language: &str,
    ) -> Result<(), CatalogError> {
        if self.file_exists() {
            return Ok(());
        }

        let parent = self.path.parent().map(Path::to_path_buf);
        if let Some(parent) = parent {
            if !parent.as_os_str().is_empty() && !parent.is_dir() {
                fs::create_dir_all(&parent)
                    .map_err(|err| CatalogError::DirectoryCreate(self.capture(err.to_string())))?;
            }
        }

        let catalog = Catalog::empty(language, source_language);
        let mut text = serde_json::to_string_pretty(&catalog)
            .map_err(|err| CatalogError::FileCreate(err.to_string()))?;
        text.push('\n');

        fs::write(&self.path, text)
            .map_err(|err| CatalogError::FileCreate(self.capture(err.to_string())))?;

        tracing::debug!(path = %self.path.display(), language = %catalog.language, "created catalog file");
        Ok(())
    }
}
