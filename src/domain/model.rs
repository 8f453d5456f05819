use crate::utils::error::BmiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 量測單位系統，決定驗證範圍與計算公式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum MeasurementSystem {
    #[default]
    Metric,
    Imperial,
}

impl MeasurementSystem {
    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementSystem::Metric => "metric",
            MeasurementSystem::Imperial => "imperial",
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementSystem {
    type Err = BmiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(MeasurementSystem::Metric),
            "imperial" => Ok(MeasurementSystem::Imperial),
            _ => Err(BmiError::ValidationError),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricInput {
    pub height_cm: f64,
    pub weight_kg: f64,
}

pub const INCHES_PER_FOOT: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImperialInput {
    pub feet: f64,
    pub inches: f64,
    pub pounds: f64,
}

impl ImperialInput {
    pub fn total_inches(&self) -> f64 {
        self.feet * INCHES_PER_FOOT + self.inches
    }
}

/// 使用者輸入的原始字串，尚未解析
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "system", rename_all = "lowercase")]
pub enum RawInputs {
    Metric {
        height: String,
        weight: String,
    },
    Imperial {
        feet: String,
        inches: String,
        pounds: String,
    },
}

impl RawInputs {
    pub fn system(&self) -> MeasurementSystem {
        match self {
            RawInputs::Metric { .. } => MeasurementSystem::Metric,
            RawInputs::Imperial { .. } => MeasurementSystem::Imperial,
        }
    }
}

/// 單次計算請求，建立後不再變動
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BmiRequest {
    pub inputs: RawInputs,
}

impl BmiRequest {
    pub fn metric(height: impl Into<String>, weight: impl Into<String>) -> Self {
        Self {
            inputs: RawInputs::Metric {
                height: height.into(),
                weight: weight.into(),
            },
        }
    }

    pub fn imperial(
        feet: impl Into<String>,
        inches: impl Into<String>,
        pounds: impl Into<String>,
    ) -> Self {
        Self {
            inputs: RawInputs::Imperial {
                feet: feet.into(),
                inches: inches.into(),
                pounds: pounds.into(),
            },
        }
    }

    pub fn system(&self) -> MeasurementSystem {
        self.inputs.system()
    }
}

/// 通過驗證的量測值
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValidatedInputs {
    Metric(MetricInput),
    Imperial(ImperialInput),
}

impl ValidatedInputs {
    pub fn system(&self) -> MeasurementSystem {
        match self {
            ValidatedInputs::Metric(_) => MeasurementSystem::Metric,
            ValidatedInputs::Imperial(_) => MeasurementSystem::Imperial,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "normal")]
    NormalWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub const ALL: [BmiCategory; 4] = [
        BmiCategory::Underweight,
        BmiCategory::NormalWeight,
        BmiCategory::Overweight,
        BmiCategory::Obese,
    ];

    /// 顯示用名稱
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::NormalWeight => "Normal Weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }

    /// JSON / CSV 輸出用的固定代號
    pub fn slug(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "underweight",
            BmiCategory::NormalWeight => "normal",
            BmiCategory::Overweight => "overweight",
            BmiCategory::Obese => "obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BmiResult {
    /// 已四捨五入至小數一位
    pub value: f64,
    pub category: BmiCategory,
}

/// 批次 CSV 的一列；依單位系統只會用到部分欄位
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchRecord {
    #[serde(default)]
    pub system: String,
    #[serde(default)]
    pub height_cm: String,
    #[serde(default)]
    pub weight_kg: String,
    #[serde(default)]
    pub feet: String,
    #[serde(default)]
    pub inches: String,
    #[serde(default)]
    pub pounds: String,
}

impl BatchRecord {
    /// 未知的單位系統視為輸入錯誤
    pub fn to_request(&self) -> crate::utils::error::Result<BmiRequest> {
        let request = match self.system.parse::<MeasurementSystem>()? {
            MeasurementSystem::Metric => BmiRequest::metric(&self.height_cm, &self.weight_kg),
            MeasurementSystem::Imperial => {
                BmiRequest::imperial(&self.feet, &self.inches, &self.pounds)
            }
        };
        Ok(request)
    }
}

/// 批次中單一列的結果；失敗列不帶任何欄位細節
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowOutcome {
    pub row: usize,
    pub system: Option<MeasurementSystem>,
    pub result: Option<BmiResult>,
}

impl RowOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_some()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub underweight: usize,
    pub normal: usize,
    pub overweight: usize,
    pub obese: usize,
}

impl BatchSummary {
    pub fn record(&mut self, outcome: &RowOutcome) {
        self.total += 1;
        match outcome.result {
            Some(result) => {
                self.succeeded += 1;
                match result.category {
                    BmiCategory::Underweight => self.underweight += 1,
                    BmiCategory::NormalWeight => self.normal += 1,
                    BmiCategory::Overweight => self.overweight += 1,
                    BmiCategory::Obese => self.obese += 1,
                }
            }
            None => self.failed += 1,
        }
    }

    pub fn count(&self, category: BmiCategory) -> usize {
        match category {
            BmiCategory::Underweight => self.underweight,
            BmiCategory::NormalWeight => self.normal,
            BmiCategory::Overweight => self.overweight,
            BmiCategory::Obese => self.obese,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchReport {
    pub outcomes: Vec<RowOutcome>,
    pub summary: BatchSummary,
}

impl BatchReport {
    pub fn from_outcomes(outcomes: Vec<RowOutcome>) -> Self {
        let mut summary = BatchSummary::default();
        for outcome in &outcomes {
            summary.record(outcome);
        }
        Self { outcomes, summary }
    }
}
