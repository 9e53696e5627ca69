mod cache;
mod enricher;
mod errors;
mod in_memory;
#[cfg(test)]
mod tests;

use async_trait::async_trait;

pub use cache::SkuNameCache;
pub use enricher::CatalogEnricher;
pub use errors::CatalogError;
pub use in_memory::InMemoryCatalog;

/// Resolves a SKU to the display name the catalog knows it by.
#[async_trait]
pub trait Catalog: Send + Sync + 'static {
    /// Returns `Ok(None)` when the catalog has no product for the SKU.
    async fn resolve_sku_name(&self, sku: &str) -> Result<Option<String>, CatalogError>;
}
