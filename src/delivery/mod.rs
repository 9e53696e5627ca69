mod errors;
mod local_directory;

use async_trait::async_trait;
use chrono::NaiveDateTime;

pub use errors::DeliveryError;
pub use local_directory::LocalDirectoryDelivery;

/// File name prefix the partner watches for in its inbound directory.
pub const REMOTE_FILE_PREFIX: &str = "PT_WSI";
pub const REMOTE_TIMESTAMP_FORMAT: &str = "%m_%d_%Y_%H_%M_%S";

/// Hands a finished pick ticket document to the fulfillment partner.
#[async_trait]
pub trait FileDelivery: Send + Sync + 'static {
    async fn deliver(&self, contents: &[u8], remote_path: &str) -> Result<(), DeliveryError>;
}

/// Builds the remote path for a document, e.g. `/orders/PT_WSI_03_05_2024_14_30_00.csv`.
pub fn remote_path(target: &str, timestamp: NaiveDateTime) -> String {
    format!(
        "/{}/{}_{}.csv",
        target.trim_matches('/'),
        REMOTE_FILE_PREFIX,
        timestamp.format(REMOTE_TIMESTAMP_FORMAT)
    )
}
