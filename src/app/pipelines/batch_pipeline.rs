use crate::core::evaluator::BmiEvaluator;
use crate::core::{BatchRecord, BatchReport, ConfigProvider, Pipeline, Storage};
use crate::domain::model::{MeasurementSystem, RowOutcome};
use crate::utils::error::{Result, CHECK_INPUTS_MESSAGE};
use serde::Serialize;

pub const RESULTS_FILENAME: &str = "bmi_results.csv";
pub const RESULT_HEADER: [&str; 5] = ["row", "system", "bmi", "category", "error"];

pub struct BatchPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
    evaluator: BmiEvaluator,
}

impl<S: Storage, C: ConfigProvider> BatchPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        let evaluator = BmiEvaluator::new(*config.ranges());
        Self {
            storage,
            config,
            evaluator,
        }
    }
}

#[derive(Debug, Serialize)]
struct ResultRow<'a> {
    row: usize,
    system: &'a str,
    bmi: Option<f64>,
    category: &'a str,
    error: &'a str,
}

impl<S: Storage, C: ConfigProvider> Pipeline for BatchPipeline<S, C> {
    fn extract(&self, input_path: &str) -> Result<Vec<BatchRecord>> {
        tracing::debug!("Reading batch file: {}", input_path);
        let data = self.storage.read_file(input_path)?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(data.as_slice());

        let mut records = Vec::new();
        for record in reader.deserialize::<BatchRecord>() {
            records.push(record?);
        }

        Ok(records)
    }

    fn transform(&self, records: Vec<BatchRecord>) -> Result<BatchReport> {
        let outcomes = records
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let row = index + 1;
                let system = record.system.parse::<MeasurementSystem>().ok();
                let result = record
                    .to_request()
                    .and_then(|request| self.evaluator.evaluate(&request))
                    .ok();

                if result.is_none() {
                    tracing::warn!("Row {} rejected: {}", row, CHECK_INPUTS_MESSAGE);
                }

                RowOutcome {
                    row,
                    system,
                    result,
                }
            })
            .collect();

        Ok(BatchReport::from_outcomes(outcomes))
    }

    fn load(&self, report: &BatchReport) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        writer.write_record(RESULT_HEADER)?;

        for outcome in &report.outcomes {
            writer.serialize(ResultRow {
                row: outcome.row,
                system: outcome.system.map(|s| s.as_str()).unwrap_or(""),
                bmi: outcome.result.map(|r| r.value),
                category: outcome.result.map(|r| r.category.slug()).unwrap_or(""),
                error: if outcome.is_success() {
                    ""
                } else {
                    CHECK_INPUTS_MESSAGE
                },
            })?;
        }

        let data = writer
            .into_inner()
            .map_err(|e| std::io::Error::other(e.to_string()))?;
        self.storage.write_file(RESULTS_FILENAME, &data)?;

        let output_path = std::path::Path::new(self.config.output_path())
            .join(RESULTS_FILENAME)
            .to_string_lossy()
            .into_owned();

        Ok(output_path)
    }
}
