use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use serde::Serialize;
use tracing::{error, info};

use crate::batch::OrderBatch;
use crate::catalog::{Catalog, CatalogEnricher, SkuNameCache};
use crate::codec::{DecodeMode, PickTicketCodec};
use crate::config::PipelineConfig;
use crate::delivery::{remote_path, FileDelivery};
use crate::engine::PipelineError;
use crate::models::Order;
use crate::storage::{LineItemRow, OrderRow, OrderStore, StoreError};
use crate::types::{normalize_order_date, PickTicketNumber};

/// Outcome of one pipeline run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PipelineReport {
    pub orders: usize,
    pub line_items: usize,
    pub resolved_names: usize,
    /// Pick tickets left out of the upload because they could not be rebuilt from the file.
    pub rejected: Vec<PickTicketNumber>,
    /// Where the document was delivered; `None` when there was nothing to deliver.
    pub remote_path: Option<String>
}

/// Moves orders from an inbound payload to the fulfillment partner.
///
/// A run decodes (or validates) the input, resolves display names from the catalog, encodes the
/// pick ticket document, uploads every order to the store in one unit of work and finally delivers
/// the document. Nothing is delivered unless the upload committed.
pub struct OrderPipeline<S: OrderStore, C: Catalog, D: FileDelivery> {
    store: Arc<S>,
    catalog: Arc<C>,
    enricher: CatalogEnricher<C>,
    delivery: Arc<D>,
    codec: PickTicketCodec,
    config: PipelineConfig
}

impl<S: OrderStore, C: Catalog, D: FileDelivery> OrderPipeline<S, C, D> {
    pub fn new(store: Arc<S>, catalog: Arc<C>, delivery: Arc<D>, config: PipelineConfig) -> Self {
        let cache = SkuNameCache::new(config.cache_capacity, config.cache_time_to_live);

        Self {
            store,
            enricher: CatalogEnricher::new(catalog.clone(), cache),
            catalog,
            delivery,
            codec: PickTicketCodec::new(config.decode_mode),
            config
        }
    }

    pub fn with_cache_capacity(mut self, capacity: u64) -> Self {
        self.config.cache_capacity = capacity;
        self.rebuild_cache()
    }

    pub fn with_cache_timeout(mut self, time_to_live: Duration) -> Self {
        self.config.cache_time_to_live = Some(time_to_live);
        self.rebuild_cache()
    }

    pub fn with_decode_mode(mut self, mode: DecodeMode) -> Self {
        self.config.decode_mode = mode;
        self.codec = PickTicketCodec::new(mode);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<C> {
        &self.catalog
    }

    /// Runs a pick ticket file through the pipeline.
    pub async fn import_csv(&self, input: &[u8]) -> Result<PipelineReport, PipelineError> {
        let decoded = self.codec.decode_with_rejections(input)?;

        info!(
            "Decoded {} order(s) from pick ticket file in {:?} mode, {} rejected",
            decoded.batch.size(),
            self.codec.mode(),
            decoded.rejected.len()
        );

        let mut report = self.process(decoded.batch).await?;
        report.rejected = decoded.rejected.into_iter().map(|ticket| ticket.pick_ticket_number).collect();

        Ok(report)
    }

    /// Runs a single JSON order payload through the pipeline.
    ///
    /// The payload is validated in full before any collaborator is called.
    pub async fn submit_json(&self, payload: &[u8]) -> Result<PipelineReport, PipelineError> {
        let order = Order::from_json_slice(payload)?;

        self.process(OrderBatch::from_iter([order])).await
    }

    pub async fn process(&self, mut batch: OrderBatch) -> Result<PipelineReport, PipelineError> {
        let mut report = PipelineReport {
            orders: batch.size(),
            line_items: batch.line_item_count(),
            ..PipelineReport::default()
        };

        if batch.is_empty() {
            info!("Nothing to upload, the batch is empty");
            return Ok(report)
        }

        report.resolved_names = self.enricher.enrich(&mut batch).await;

        let document = batch.serialize_all()?;

        self.upload(&batch)?;

        let path = remote_path(&self.config.target, Local::now().naive_local());
        self.delivery.deliver(document.as_bytes(), &path).await?;

        info!("Delivered {} order(s) with {} line item(s) to {path}", report.orders, report.line_items);

        report.remote_path = Some(path);

        Ok(report)
    }

    /// Uploads the batch as a single unit of work, rolling every staged write back on failure.
    fn upload(&self, batch: &OrderBatch) -> Result<(), StoreError> {
        let result = batch.iter()
            .try_for_each(|order| self.stage(order))
            .and_then(|()| self.store.commit());

        if let Err(error) = &result {
            error!("Upload failed, rolling back: {error}");
            self.store.rollback();
        }

        result
    }

    fn stage(&self, order: &Order) -> Result<(), StoreError> {
        let pick_ticket_number = order.pick_ticket_number();
        let customer_id = self.store.upsert_customer(order.customer())?;
        let recipient_id = self.store.upsert_recipient(order.recipient())?;

        self.store.upsert_order(&OrderRow {
            pick_ticket_number: pick_ticket_number.clone(),
            order_number: order.order_number().to_string(),
            customer_id,
            recipient_id,
            shipping_method: order.shipping_method().to_string(),
            order_date: normalize_order_date(order.order_date())
        })?;

        for (line_number, item) in (1..).zip(order.products()) {
            self.store.upsert_product(item.sku(), item.display_name(), item.unit_price())?;
            self.store.upsert_line_item(&LineItemRow {
                pick_ticket_number: pick_ticket_number.clone(),
                line_number,
                sku: item.sku().to_string(),
                quantity: item.quantity(),
                units_to_ship: item.units_to_ship()
            })?;
        }

        Ok(())
    }

    fn rebuild_cache(mut self) -> Self {
        let cache = SkuNameCache::new(self.config.cache_capacity, self.config.cache_time_to_live);
        self.enricher = self.enricher.with_cache(cache);
        self
    }
}
