use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use csv::{ReaderBuilder, Trim};
use dashmap::DashMap;
use serde::Deserialize;
use tracing::{error, info};

use crate::catalog::{Catalog, CatalogError};

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    sku: String,
    name: String
}

/// A catalog held in memory, optionally loaded from a `sku,name` CSV export.
#[derive(Default)]
pub struct InMemoryCatalog {
    names: DashMap<String, String>,
    lookups: AtomicUsize
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a catalog export. Rows that cannot be read are logged and skipped.
    pub fn from_csv_path(path: &Path) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        let catalog = Self::new();

        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(BufReader::new(file));

        for result in reader.deserialize::<CatalogEntry>() {
            match result {
                Ok(entry) => catalog.add(entry.sku, entry.name),
                Err(error) => error!("Catalog deserialization error: {error}")
            }
        }

        info!("Loaded {} catalog entries from {}", catalog.names.len(), path.display());

        Ok(catalog)
    }

    pub fn add(&self, sku: impl Into<String>, name: impl Into<String>) {
        self.names.insert(sku.into(), name.into());
    }

    /// How many times the catalog has been asked to resolve a SKU.
    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn resolve_sku_name(&self, sku: &str) -> Result<Option<String>, CatalogError> {
        self.lookups.fetch_add(1, Ordering::Relaxed);

        Ok(self.names.get(sku).map(|name| name.value().clone()))
    }
}
