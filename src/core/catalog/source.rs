//! Catalog Sources
//!
//! A [`CatalogSource`] hands the search pipeline a snapshot of every current
//! item. Snapshots are shared (`Arc`) so concurrent searches never copy the
//! catalog.

use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use super::models::Item;
use crate::core::error::{Result, SearchError};

/// Read-only enumeration of the current catalog.
pub trait CatalogSource: Send + Sync {
    /// All current items, in catalog order.
    fn snapshot(&self) -> Result<Arc<Vec<Item>>>;
}

/// Catalog held in memory, replaced wholesale by its owner.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    items: RwLock<Arc<Vec<Item>>>,
}

impl InMemoryCatalog {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: RwLock::new(Arc::new(items)),
        }
    }

    /// Swap in a new snapshot. In-flight searches keep the old one.
    pub fn replace(&self, items: Vec<Item>) {
        let mut guard = match self.items.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        *guard = Arc::new(items);
    }

    pub fn len(&self) -> usize {
        self.current().len()
    }

    pub fn is_empty(&self) -> bool {
        self.current().is_empty()
    }

    fn current(&self) -> Arc<Vec<Item>> {
        match self.items.read() {
            Ok(guard) => Arc::clone(&guard),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }
}

impl CatalogSource for InMemoryCatalog {
    fn snapshot(&self) -> Result<Arc<Vec<Item>>> {
        Ok(self.current())
    }
}

/// Catalog exported as a JSON array of items.
///
/// The file is read once on [`JsonFileCatalog::load`]; call
/// [`JsonFileCatalog::reload`] after the export changes.
#[derive(Debug)]
pub struct JsonFileCatalog {
    path: PathBuf,
    inner: InMemoryCatalog,
}

impl JsonFileCatalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let items = Self::read_items(&path)?;
        log::info!("Loaded {} catalog items from {}", items.len(), path.display());
        Ok(Self {
            path,
            inner: InMemoryCatalog::new(items),
        })
    }

    pub fn reload(&self) -> Result<usize> {
        let items = Self::read_items(&self.path)?;
        let count = items.len();
        self.inner.replace(items);
        log::info!("Reloaded {} catalog items from {}", count, self.path.display());
        Ok(count)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_items(path: &Path) -> Result<Vec<Item>> {
        let contents = std::fs::read_to_string(path)?;
        let items: Vec<Item> = serde_json::from_str(&contents)?;
        for item in &items {
            item.validate().map_err(|e| {
                SearchError::InvalidInput(format!("item {} in {}: {e}", item.id, path.display()))
            })?;
        }
        Ok(items)
    }
}

impl CatalogSource for JsonFileCatalog {
    fn snapshot(&self) -> Result<Arc<Vec<Item>>> {
        self.inner.snapshot()
    }
}
