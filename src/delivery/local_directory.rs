use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tracing::info;

use crate::delivery::{DeliveryError, FileDelivery};

/// Delivers documents into a local directory that mirrors the partner's remote layout.
///
/// Remote paths are resolved below `root`; a leading `/` is treated as the root itself.
pub struct LocalDirectoryDelivery {
    root: PathBuf
}

impl LocalDirectoryDelivery {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into()
        }
    }

    pub fn resolve(&self, remote_path: &str) -> Result<PathBuf, DeliveryError> {
        let relative = Path::new(remote_path.trim_start_matches('/'));
        let is_plain = relative.components().all(|component| matches!(component, Component::Normal(_)));

        if remote_path.trim_matches('/').is_empty() || !is_plain {
            return Err(DeliveryError::InvalidPath(remote_path.to_string()))
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileDelivery for LocalDirectoryDelivery {
    async fn deliver(&self, contents: &[u8], remote_path: &str) -> Result<(), DeliveryError> {
        let destination = self.resolve(remote_path)?;
        let to_error = |source| DeliveryError::Io { remote_path: remote_path.to_string(), source };

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent).await.map_err(to_error)?;
        }

        fs::write(&destination, contents).await.map_err(to_error)?;

        info!("Delivered {} bytes to {}", contents.len(), destination.display());

        Ok(())
    }
}
