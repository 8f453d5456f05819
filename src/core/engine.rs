use crate::core::Pipeline;
use crate::domain::model::BatchReport;
use crate::utils::error::Result;

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// 執行 extract → transform → load，回傳輸出路徑與報告
    pub fn run(&self, input_path: &str) -> Result<(String, BatchReport)> {
        tracing::info!("Starting batch evaluation of {}", input_path);

        let records = self.pipeline.extract(input_path)?;
        tracing::info!("Read {} rows", records.len());

        let report = self.pipeline.transform(records)?;
        tracing::info!(
            "Evaluated {} rows: {} succeeded, {} failed",
            report.summary.total,
            report.summary.succeeded,
            report.summary.failed
        );

        let output_path = self.pipeline.load(&report)?;
        tracing::info!("Results saved to: {}", output_path);

        Ok((output_path, report))
    }
}
