//! Catalog Read Model
//!
//! The search pipeline only reads the catalog: items and their categories are
//! created and updated elsewhere and handed over as a snapshot.

mod models;
mod source;

pub use models::{Category, Item};
pub use source::{CatalogSource, InMemoryCatalog, JsonFileCatalog};
