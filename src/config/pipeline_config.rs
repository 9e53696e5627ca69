use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use ::config::{Config, Environment};
use serde::{Deserialize, Deserializer};

use crate::codec::DecodeMode;
use crate::config::{ConfigError, DEFAULT_CACHE_CAPACITY, DEFAULT_OUTBOX, DEFAULT_TARGET, ENVIRONMENT_PREFIX};

/// Settings for one run of the order pipeline.
///
/// | Variable | Setting |
/// |---|---|
/// | `PICK_TICKET_TARGET` | `target` |
/// | `PICK_TICKET_OUTBOX` | `outbox` |
/// | `PICK_TICKET_CATALOG` | `catalog_path` |
/// | `PICK_TICKET_STRICT` | `decode_mode` (`true` selects `DecodeMode::Strict`) |
/// | `PICK_TICKET_CACHE_CAPACITY` | `cache_capacity` |
/// | `PICK_TICKET_CACHE_TTL_SECS` | `cache_time_to_live` |
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Remote directory the partner reads pick tickets from.
    pub target: String,
    /// Local directory standing in for the partner's file server.
    pub outbox: PathBuf,
    /// Optional `sku,name` CSV the catalog is loaded from.
    #[serde(rename = "catalog")]
    pub catalog_path: Option<PathBuf>,
    #[serde(rename = "strict", deserialize_with = "decode_mode_from_flag")]
    pub decode_mode: DecodeMode,
    pub cache_capacity: u64,
    /// `None` keeps resolved names for the lifetime of the process.
    #[serde(rename = "cache_ttl_secs", deserialize_with = "duration_from_seconds")]
    pub cache_time_to_live: Option<Duration>
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target: DEFAULT_TARGET.to_string(),
            outbox: PathBuf::from(DEFAULT_OUTBOX),
            catalog_path: None,
            decode_mode: DecodeMode::default(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_time_to_live: None
        }
    }
}

impl PipelineConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix(ENVIRONMENT_PREFIX))
    }

    /// Reads the configuration from a given set of variables instead of the process environment.
    pub fn from_variables(variables: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix(ENVIRONMENT_PREFIX).source(Some(variables)))
    }

    /// Unset or empty variables keep their defaults.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidSettings` when a numeric or boolean setting cannot be parsed.
    fn load(environment: Environment) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(environment.ignore_empty(true))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

fn decode_mode_from_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DecodeMode, D::Error> {
    let strict = bool::deserialize(deserializer)?;

    Ok(if strict { DecodeMode::Strict } else { DecodeMode::Permissive })
}

fn duration_from_seconds<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
    u64::deserialize(deserializer).map(|seconds| Some(Duration::from_secs(seconds)))
}
