pub use crate::app::pipelines::batch_pipeline::{BatchPipeline, RESULTS_FILENAME};
