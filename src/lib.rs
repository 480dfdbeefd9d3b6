//! Pharmacy Search - natural-language product search for pharmacy catalogs
//!
//! Typo-tolerant, synonym-aware search: spelling correction, lemmatization,
//! medical synonym expansion, candidate filtering and semantic re-ranking.

pub mod config;
pub mod core;
pub mod server;

#[cfg(test)]
mod tests;

pub use crate::core::catalog::{CatalogSource, Category, InMemoryCatalog, Item, JsonFileCatalog};
pub use crate::core::error::{Result, SearchError};
pub use crate::core::search::{ProductSearch, ScoredCandidate, SearchResources};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const NAME: &str = env!("CARGO_PKG_NAME");
