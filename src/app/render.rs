use crate::domain::model::{BatchSummary, BmiCategory, BmiResult, MeasurementSystem};
use crate::utils::error::{BmiError, Result, CHECK_INPUTS_MESSAGE};
use serde::{Deserialize, Serialize};
use serde_json::json;

/// 未有結果時顯示的佔位符
pub const EMPTY_VALUE: &str = "--";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

pub fn render_result(
    system: MeasurementSystem,
    outcome: &std::result::Result<BmiResult, BmiError>,
    format: OutputFormat,
) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(match outcome {
            Ok(result) => format!("BMI: {:.1}\nCategory: {}", result.value, result.category),
            Err(_) => format!("BMI: {}\n{}", EMPTY_VALUE, CHECK_INPUTS_MESSAGE),
        }),
        OutputFormat::Json => {
            let value = match outcome {
                Ok(result) => json!({
                    "system": system,
                    "bmi": result.value,
                    "category": result.category.slug(),
                    "label": result.category.label(),
                }),
                Err(_) => json!({
                    "system": system,
                    "bmi": null,
                    "error": CHECK_INPUTS_MESSAGE,
                }),
            };
            Ok(serde_json::to_string_pretty(&value)?)
        }
    }
}

pub fn render_summary(summary: &BatchSummary, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => {
            let mut lines = vec![format!(
                "Rows: {}, succeeded: {}, failed: {}",
                summary.total, summary.succeeded, summary.failed
            )];
            for category in BmiCategory::ALL {
                lines.push(format!("  {}: {}", category.label(), summary.count(category)));
            }
            Ok(lines.join("\n"))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(summary)?),
    }
}
