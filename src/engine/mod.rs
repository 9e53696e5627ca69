mod errors;
mod order_pipeline;

pub use errors::PipelineError;
pub use order_pipeline::{OrderPipeline, PipelineReport};
