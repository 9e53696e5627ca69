mod errors;
mod pipeline_config;

pub use errors::ConfigError;
pub use pipeline_config::PipelineConfig;

/// Every setting is read from a `PICK_TICKET_`-prefixed environment variable, e.g.
/// `PICK_TICKET_CACHE_CAPACITY` for `cache_capacity`.
pub const ENVIRONMENT_PREFIX: &str = "PICK_TICKET";

pub const DEFAULT_TARGET: &str = "orders";
pub const DEFAULT_OUTBOX: &str = "outbox";
pub const DEFAULT_CACHE_CAPACITY: u64 = 10_000;
