use super::{Catalog, CatalogEnricher, CatalogError, InMemoryCatalog, SkuNameCache};

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;
use tempfile::NamedTempFile;
use tokio::time::sleep;

use crate::batch::OrderBatch;
use crate::models::{LineItem, Order, PostalAddress};

struct UnavailableCatalog;

#[async_trait]
impl Catalog for UnavailableCatalog {
    async fn resolve_sku_name(&self, sku: &str) -> Result<Option<String>, CatalogError> {
        Err(CatalogError::Unavailable { sku: sku.to_string(), reason: "connection refused".to_string() })
    }
}

fn create_batch(skus: &[&str]) -> OrderBatch {
    let products = skus.iter()
        .map(|sku| LineItem::new(*sku, Decimal::ONE, Decimal::ONE))
        .collect();

    vec![Order::new("1001", "2024-03-05", "UPS", PostalAddress::default(), PostalAddress::default(), products)]
        .into_iter()
        .collect()
}

fn display_names(batch: &OrderBatch) -> Vec<Option<String>> {
    batch.iter()
        .flat_map(|order| order.products())
        .map(|item| item.display_name().map(str::to_string))
        .collect()
}

#[tokio::test]
async fn test_enrichment_resolves_known_skus_and_skips_unknown_ones() {
    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.add("MUG-RED", "Red Mug");

    let enricher = CatalogEnricher::new(catalog, SkuNameCache::new(100, None));
    let mut batch = create_batch(&["MUG-RED", "UNKNOWN"]);

    let resolved = enricher.enrich(&mut batch).await;

    assert_eq!(resolved, 1);
    assert_eq!(display_names(&batch), vec![Some("Red Mug".to_string()), None]);
}

#[tokio::test]
async fn test_cache_prevents_repeated_catalog_lookups() {
    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.add("MUG-RED", "Red Mug");

    let enricher = CatalogEnricher::new(catalog.clone(), SkuNameCache::new(100, None));
    let mut batch = create_batch(&["MUG-RED", "MUG-RED", "MUG-RED"]);

    enricher.enrich(&mut batch).await;

    assert_eq!(catalog.lookup_count(), 1);
    assert_eq!(display_names(&batch), vec![Some("Red Mug".to_string()); 3]);
}

#[tokio::test]
async fn test_missing_skus_are_not_cached() {
    let catalog = Arc::new(InMemoryCatalog::new());
    let enricher = CatalogEnricher::new(catalog.clone(), SkuNameCache::new(100, None));

    assert_eq!(enricher.lookup("NEW-SKU").await, None);

    catalog.add("NEW-SKU", "Brand New");

    assert_eq!(enricher.lookup("NEW-SKU").await, Some("Brand New".to_string()));
    assert_eq!(catalog.lookup_count(), 2);
}

#[tokio::test]
async fn test_cached_names_expire_after_time_to_live() {
    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.add("MUG-RED", "Red Mug");

    let enricher = CatalogEnricher::new(catalog.clone(), SkuNameCache::new(100, Some(Duration::from_millis(100))));

    enricher.lookup("MUG-RED").await;
    enricher.lookup("MUG-RED").await;
    assert_eq!(catalog.lookup_count(), 1);

    sleep(Duration::from_millis(200)).await;

    enricher.lookup("MUG-RED").await;
    assert_eq!(catalog.lookup_count(), 2);
}

#[tokio::test]
async fn test_catalog_failures_leave_display_names_absent() {
    let enricher = CatalogEnricher::new(Arc::new(UnavailableCatalog), SkuNameCache::new(100, None));
    let mut batch = create_batch(&["MUG-RED"]);

    let resolved = enricher.enrich(&mut batch).await;

    assert_eq!(resolved, 0);
    assert_eq!(display_names(&batch), vec![None]);
}

#[tokio::test]
async fn test_already_resolved_items_are_not_looked_up_again() -> Result<()> {
    let catalog = Arc::new(InMemoryCatalog::new());
    catalog.add("MUG-RED", "Red Mug");

    let enricher = CatalogEnricher::new(catalog.clone(), SkuNameCache::new(100, None));
    let mut batch = create_batch(&["MUG-RED"]);

    for order in batch.iter_mut() {
        for item in order.line_items_mut() {
            item.resolve_display_name("Set Upstream")?;
        }
    }

    assert_eq!(enricher.enrich(&mut batch).await, 0);
    assert_eq!(catalog.lookup_count(), 0);
    assert_eq!(display_names(&batch), vec![Some("Set Upstream".to_string())]);

    Ok(())
}

#[tokio::test]
async fn test_catalog_loads_from_csv_export_and_skips_bad_rows() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "sku,name")?;
    writeln!(file, "MUG-RED, Red Mug")?;
    writeln!(file, "TEA-001,Green Tea")?;
    writeln!(file, "BROKEN")?;

    let catalog = InMemoryCatalog::from_csv_path(file.path())?;

    assert_eq!(catalog.resolve_sku_name("MUG-RED").await?, Some("Red Mug".to_string()));
    assert_eq!(catalog.resolve_sku_name("TEA-001").await?, Some("Green Tea".to_string()));
    assert_eq!(catalog.resolve_sku_name("BROKEN").await?, None);

    Ok(())
}

#[test]
fn test_missing_catalog_file_is_an_error() {
    let result = InMemoryCatalog::from_csv_path(std::path::Path::new("does-not-exist.csv"));

    assert!(matches!(result, Err(CatalogError::Io(_))));
}
