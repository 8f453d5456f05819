use crate::domain::model::{BatchRecord, BatchReport};
use crate::domain::ranges::ValidationRanges;
use crate::utils::error::Result;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn ranges(&self) -> &ValidationRanges;
    fn output_path(&self) -> &str;
}

/// 批次處理的三個階段：讀入、計算、輸出
pub trait Pipeline {
    fn extract(&self, input_path: &str) -> Result<Vec<BatchRecord>>;
    fn transform(&self, records: Vec<BatchRecord>) -> Result<BatchReport>;
    fn load(&self, report: &BatchReport) -> Result<String>;
}
