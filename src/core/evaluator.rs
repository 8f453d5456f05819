use crate::domain::model::{
    BmiCategory, BmiRequest, BmiResult, ImperialInput, MetricInput, RawInputs, ValidatedInputs,
};
use crate::domain::ranges::ValidationRanges;
use crate::utils::error::Result;
use crate::utils::validation::check_measurement;

/// 英制 BMI 換算係數
pub const IMPERIAL_FACTOR: f64 = 703.0;
pub const CM_PER_METER: f64 = 100.0;

pub const UNDERWEIGHT_BELOW: f64 = 18.5;
pub const OVERWEIGHT_FROM: f64 = 25.0;
pub const OBESE_FROM: f64 = 30.0;

/// 無狀態的 BMI 計算器；每次呼叫都是獨立的請求與回應
#[derive(Debug, Clone, Default)]
pub struct BmiEvaluator {
    ranges: ValidationRanges,
}

impl BmiEvaluator {
    pub fn new(ranges: ValidationRanges) -> Self {
        Self { ranges }
    }

    pub fn ranges(&self) -> &ValidationRanges {
        &self.ranges
    }

    pub fn validate(&self, inputs: &RawInputs) -> Result<ValidatedInputs> {
        match inputs {
            RawInputs::Metric { height, weight } => {
                let ranges = &self.ranges.metric;
                let height_cm = check_measurement("height_cm", height, &ranges.height_cm)?;
                let weight_kg = check_measurement("weight_kg", weight, &ranges.weight_kg)?;
                Ok(ValidatedInputs::Metric(MetricInput {
                    height_cm,
                    weight_kg,
                }))
            }
            RawInputs::Imperial {
                feet,
                inches,
                pounds,
            } => {
                let ranges = &self.ranges.imperial;
                let feet = check_measurement("feet", feet, &ranges.feet)?;
                let inches = check_measurement("inches", inches, &ranges.inches)?;
                let pounds = check_measurement("pounds", pounds, &ranges.pounds)?;
                Ok(ValidatedInputs::Imperial(ImperialInput {
                    feet,
                    inches,
                    pounds,
                }))
            }
        }
    }

    /// validate → compute → classify / format
    ///
    /// 分類使用未四捨五入的值，顯示值則是四捨五入後的結果，
    /// 因此 24.96 會顯示為 25.0 但仍屬於 Normal Weight。
    pub fn evaluate(&self, request: &BmiRequest) -> Result<BmiResult> {
        let validated = self.validate(&request.inputs)?;
        let bmi = compute(&validated);
        let result = BmiResult {
            value: format_bmi(bmi),
            category: classify(bmi),
        };

        tracing::debug!(
            "{} BMI computed: raw={:.4}, display={}, category={}",
            validated.system(),
            bmi,
            result.value,
            result.category
        );

        Ok(result)
    }
}

/// 使用預設範圍計算
pub fn evaluate(request: &BmiRequest) -> Result<BmiResult> {
    BmiEvaluator::default().evaluate(request)
}

pub fn compute(inputs: &ValidatedInputs) -> f64 {
    match inputs {
        ValidatedInputs::Metric(metric) => {
            let height_m = metric.height_cm / CM_PER_METER;
            metric.weight_kg / (height_m * height_m)
        }
        ValidatedInputs::Imperial(imperial) => {
            let total_inches = imperial.total_inches();
            (imperial.pounds / (total_inches * total_inches)) * IMPERIAL_FACTOR
        }
    }
}

/// 邊界值歸入較高的類別
pub fn classify(bmi: f64) -> BmiCategory {
    if bmi < UNDERWEIGHT_BELOW {
        BmiCategory::Underweight
    } else if bmi < OVERWEIGHT_FROM {
        BmiCategory::NormalWeight
    } else if bmi < OBESE_FROM {
        BmiCategory::Overweight
    } else {
        BmiCategory::Obese
    }
}

/// 四捨五入至小數一位（.5 一律進位）
pub fn format_bmi(bmi: f64) -> f64 {
    (bmi * 10.0 + 0.5).floor() / 10.0
}
