use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid pipeline settings: {0}")]
    InvalidSettings(#[from] ::config::ConfigError)
}
