use std::sync::Arc;

use tracing::{debug, warn};

use crate::batch::OrderBatch;
use crate::catalog::{Catalog, SkuNameCache};

/// Fills in the display name of every line item from the catalog.
///
/// A failed or empty lookup leaves the display name absent; enrichment never blocks an upload.
pub struct CatalogEnricher<C: Catalog> {
    catalog: Arc<C>,
    cache: SkuNameCache
}

impl<C: Catalog> CatalogEnricher<C> {
    pub fn new(catalog: Arc<C>, cache: SkuNameCache) -> Self {
        Self {
            catalog,
            cache
        }
    }

    pub fn with_cache(mut self, cache: SkuNameCache) -> Self {
        self.cache = cache;
        self
    }

    /// Resolves a SKU through the cache, falling back to the catalog.
    pub async fn lookup(&self, sku: &str) -> Option<String> {
        if let Some(name) = self.cache.get(sku).await {
            return Some(name)
        }

        match self.catalog.resolve_sku_name(sku).await {
            Ok(Some(name)) => {
                self.cache.insert(sku, &name).await;
                Some(name)
            }
            Ok(None) => {
                debug!("Sku [{sku}] was not found in the catalog");
                None
            }
            Err(error) => {
                warn!("{error}");
                None
            }
        }
    }

    /// Resolves every unresolved line item in the batch and returns how many were resolved.
    pub async fn enrich(&self, batch: &mut OrderBatch) -> usize {
        let mut resolved = 0;

        for order in batch.iter_mut() {
            for item in order.line_items_mut() {
                if item.display_name().is_some() {
                    continue;
                }

                let Some(name) = self.lookup(item.sku()).await else {
                    continue;
                };

                match item.resolve_display_name(name) {
                    Ok(()) => resolved += 1,
                    Err(error) => warn!("{error}")
                }
            }
        }

        resolved
    }
}
