mod order_batch;

pub use order_batch::OrderBatch;
