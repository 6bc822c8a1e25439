//! In-memory representation of one translation catalog document.
//!
//! A catalog owns an ordered list of contexts; each context owns an ordered
//! list of messages. Order is insertion order and is preserved on save, so
//! both collections are vectors rather than maps. Lookup helpers enforce the
//! structural invariants (context names unique per catalog, message sources
//! unique per context); a violation can only come from a hand-edited file
//! and is always surfaced, never silently resolved.

use serde::{
    Deserialize,
    Serialize,
};

use crate::error::CatalogError;

/// Document version written into newly bootstrapped catalogs.
pub const CATALOG_VERSION: &str = "2.0";

/// One translatable unit: an original source text and its translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Original text, used as the lookup key within the owning context.
    pub source: String,
    /// Translated text; may be empty.
    pub translation: String,
}

/// A named grouping of messages, typically a UI or module area.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// Context name, unique within the catalog.
    pub name: String,
    /// Messages in insertion order.
    #[serde(default)]
    pub messages: Vec<Message>,
}

impl Context {
    /// Create an empty context.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), messages: Vec::new() }
    }

    /// Position of the message with the given source.
    ///
    /// # Errors
    /// [`CatalogError::DuplicateMessage`] if more than one message shares
    /// the source.
    pub fn message_position(&self, source: &str) -> Result<Option<usize>, CatalogError> {
        let mut found = None;
        for (index, message) in self.messages.iter().enumerate() {
            if message.source == source {
                if found.is_some() {
                    return Err(CatalogError::DuplicateMessage(source.to_string()));
                }
                found = Some(index);
            }
        }
        Ok(found)
    }

    /// The message with the given source, if any.
    ///
    /// # Errors
    /// [`CatalogError::DuplicateMessage`] if more than one message shares
    /// the source.
    pub fn message(&self, source: &str) -> Result<Option<&Message>, CatalogError> {
        Ok(self.message_position(source)?.and_then(|index| self.messages.get(index)))
    }

    /// Create the message for `source` if absent, otherwise overwrite its
    /// translation in place. Returns the resulting message.
    ///
    /// # Errors
    /// [`CatalogError::DuplicateMessage`] if more than one message shares
    /// the source.
    pub fn upsert_message(
        &mut self,
        source: &str,
        translation: &str,
    ) -> Result<&Message, CatalogError> {
        match self.message_position(source)? {
            Some(index) => {
                if let Some(message) = self.messages.get_mut(index) {
                    message.translation = translation.to_string();
                }
            }
            None => self
                .messages
                .push(Message { source: source.to_string(), translation: translation.to_string() }),
        }

        self.message(source)?
            .ok_or_else(|| CatalogError::DuplicateMessage(source.to_string()))
    }
}

/// The root entity: the full set of localized strings for one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Catalog format version, e.g. `"2.0"`.
    pub version: String,
    /// Target locale code, e.g. `"de_DE"`.
    pub language: String,
    /// Locale code of the original text, e.g. `"en"`.
    #[serde(rename = "sourcelanguage")]
    pub source_language: String,
    /// Contexts in insertion order.
    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl Catalog {
    /// Build the minimal well-formed catalog written by file bootstrap:
    /// attributes only, zero contexts. Locale codes are normalized to the
    /// underscore form (`de-DE` becomes `de_DE`).
    #[must_use]
    pub fn empty(language: &str, source_language: &str) -> Self {
        Self {
            version: CATALOG_VERSION.to_string(),
            language: normalize_locale(language),
            source_language: normalize_locale(source_language),
            contexts: Vec::new(),
        }
    }

    /// Position of the context with the given name.
    ///
    /// # Errors
    /// [`CatalogError::DuplicateContext`] if more than one context shares
    /// the name.
    pub fn context_position(&self, name: &str) -> Result<Option<usize>, CatalogError> {
        let mut found = None;
        for (index, context) in self.contexts.iter().enumerate() {
            if context.name == name {
                if found.is_some() {
                    return Err(CatalogError::DuplicateContext(name.to_string()));
                }
                found = Some(index);
            }
        }
        Ok(found)
    }

    /// The context with the given name, if any.
    ///
    /// # Errors
    /// [`CatalogError::DuplicateContext`] if more than one context shares
    /// the name.
    pub fn context(&self, name: &str) -> Result<Option<&Context>, CatalogError> {
        Ok(self.context_position(name)?.and_then(|index| self.contexts.get(index)))
    }

    /// The context with the given name, created and appended if absent.
    ///
    /// # Errors
    /// [`CatalogError::DuplicateContext`] if more than one context shares
    /// the name.
    pub fn ensure_context(&mut self, name: &str) -> Result<&mut Context, CatalogError> {
        if self.context_position(name)?.is_none() {
            self.contexts.push(Context::new(name));
        }

        self.contexts
            .iter_mut()
            .find(|context| context.name == name)
            .ok_or_else(|| CatalogError::DuplicateContext(name.to_string()))
    }

    /// Total number of messages across all contexts.
    #[must_use]
    pub fn total_message_count(&self) -> usize {
        self.contexts.iter().map(|context| context.messages.len()).sum()
    }
}

/// Normalize a locale code to the underscore form used in catalog
/// attributes (`de-DE` → `de_DE`).
#[must_use]
pub fn normalize_locale(code: &str) -> String {
    code.replace('-', "_")
}
