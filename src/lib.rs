//! translation-catalog
//!
//! Engine for per-locale translation catalog files: loading, schema
//! validation, context/message editing and whole-file persistence. One
//! [`CatalogManager`] is bound to one catalog file; [`CatalogRegistry`]
//! caches one manager per locale for a transport layer to hold.

pub mod catalog;
pub mod error;
pub mod registry;

pub use catalog::{
    Catalog,
    CatalogManager,
    Context,
    Message,
};
pub use error::CatalogError;
pub use registry::CatalogRegistry;
