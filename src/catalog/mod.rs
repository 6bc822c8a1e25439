//! Translation catalog engine: document model, schema validation and the
//! file-bound manager.

mod document;
mod manager;
mod schema;

pub use document::{
    CATALOG_VERSION,
    Catalog,
    Context,
    Message,
    normalize_locale,
};
pub use manager::{
    CATALOG_EXTENSION,
    CatalogManager,
};
pub use schema::DEFAULT_SCHEMA_PATH;
