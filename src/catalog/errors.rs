use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Catalog lookup for sku [{sku}] failed: {reason}")]
    Unavailable {
        sku: String,
        reason: String
    },
    #[error("Catalog file could not be read: {0}")]
    Io(#[from] std::io::Error),
    #[error("Catalog file is not valid CSV: {0}")]
    Csv(#[from] csv::Error)
}
