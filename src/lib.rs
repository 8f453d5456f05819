pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use app::pipelines::batch_pipeline::BatchPipeline;
pub use app::render::OutputFormat;
pub use config::{cli::LocalStorage, toml_config::TomlConfig, Settings};
pub use core::engine::BatchEngine;
pub use core::evaluator::{classify, compute, evaluate, format_bmi, BmiEvaluator};
pub use domain::model::{
    BmiCategory, BmiRequest, BmiResult, ImperialInput, MeasurementSystem, MetricInput,
    RawInputs, ValidatedInputs,
};
pub use domain::ranges::{Bounds, ValidationRanges};
pub use utils::error::{BmiError, Result};
