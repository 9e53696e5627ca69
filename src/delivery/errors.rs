use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("Remote path [{0}] is not a valid delivery path")]
    InvalidPath(String),
    #[error("Delivery to [{remote_path}] failed: {source}")]
    Io {
        remote_path: String,
        source: std::io::Error
    }
}
