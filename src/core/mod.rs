pub mod batch;
pub mod engine;
pub mod evaluator;

pub use crate::domain::model::{BatchRecord, BatchReport, BmiRequest, BmiResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
