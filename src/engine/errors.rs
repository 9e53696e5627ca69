use thiserror::Error;

use crate::codec::CodecError;
use crate::delivery::DeliveryError;
use crate::models::ValidationError;
use crate::storage::StoreError;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Order payload rejected: {0}")]
    Validation(#[from] ValidationError),
    #[error("Pick ticket file rejected: {0}")]
    Codec(#[from] CodecError),
    #[error("Upload rolled back: {0}")]
    Store(#[from] StoreError),
    #[error("Pick tickets were stored but not delivered: {0}")]
    Delivery(#[from] DeliveryError)
}

impl PipelineError {
    /// Whether the failure was caused by the input rather than a collaborator.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Codec(_))
    }
}
