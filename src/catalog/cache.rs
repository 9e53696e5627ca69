use std::time::Duration;

use moka::future::Cache;

/// Resolved SKU names, shared by every lookup made through one enricher.
///
/// Entries are evicted once `capacity` is reached or, when configured, after `time_to_live`.
/// Without a time to live a name stays cached for the lifetime of the process.
/// Only successful lookups are cached so a SKU missing from the catalog is retried next time.
#[derive(Clone)]
pub struct SkuNameCache {
    names: Cache<String, String>
}

impl SkuNameCache {
    pub fn new(capacity: u64, time_to_live: Option<Duration>) -> Self {
        let mut builder = Cache::<String, String>::builder().max_capacity(capacity);

        if let Some(time_to_live) = time_to_live {
            builder = builder.time_to_live(time_to_live);
        }

        Self {
            names: builder.build()
        }
    }

    pub async fn get(&self, sku: &str) -> Option<String> {
        self.names.get(sku).await
    }

    pub async fn insert(&self, sku: &str, name: &str) {
        self.names.insert(sku.to_string(), name.to_string()).await;
    }
}
