use crate::utils::error::Result;
use crate::utils::validation::{validate_bounds, Validate};
use serde::{Deserialize, Serialize};

/// 閉區間 [min, max]
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricRanges {
    pub height_cm: Bounds,
    pub weight_kg: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImperialRanges {
    pub feet: Bounds,
    pub inches: Bounds,
    pub pounds: Bounds,
}

/// 各單位系統可接受的生理範圍
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValidationRanges {
    pub metric: MetricRanges,
    pub imperial: ImperialRanges,
}

impl Default for ValidationRanges {
    fn default() -> Self {
        Self {
            metric: MetricRanges {
                height_cm: Bounds::new(50.0, 250.0),
                weight_kg: Bounds::new(20.0, 300.0),
            },
            imperial: ImperialRanges {
                feet: Bounds::new(3.0, 8.0),
                inches: Bounds::new(0.0, 11.0),
                pounds: Bounds::new(50.0, 660.0),
            },
        }
    }
}

impl Validate for ValidationRanges {
    /// 下限需保持正值，避免計算時除以零
    fn validate(&self) -> Result<()> {
        validate_bounds("ranges.metric.height_cm", &self.metric.height_cm, 1.0)?;
        validate_bounds("ranges.metric.weight_kg", &self.metric.weight_kg, 1.0)?;
        validate_bounds("ranges.imperial.feet", &self.imperial.feet, 1.0)?;
        validate_bounds("ranges.imperial.inches", &self.imperial.inches, 0.0)?;
        validate_bounds("ranges.imperial.pounds", &self.imperial.pounds, 1.0)?;
        Ok(())
    }
}
