use crate::app::render::OutputFormat;
use crate::domain::model::MeasurementSystem;
use crate::domain::ranges::{Bounds, ValidationRanges};
use crate::utils::error::{BmiError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_OUTPUT_PATH: &str = "./output";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub defaults: Option<DefaultsConfig>,
    pub output: Option<OutputConfig>,
    pub ranges: Option<RangesConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub system: Option<MeasurementSystem>,
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
}

/// 只需填寫要覆寫的欄位，其餘沿用預設範圍
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RangesConfig {
    pub metric: Option<MetricRangesConfig>,
    pub imperial: Option<ImperialRangesConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricRangesConfig {
    pub height_cm: Option<Bounds>,
    pub weight_kg: Option<Bounds>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImperialRangesConfig {
    pub feet: Option<Bounds>,
    pub inches: Option<Bounds>,
    pub pounds: Option<Bounds>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(BmiError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| BmiError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${BMI_OUTPUT_DIR})，找不到的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| BmiError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn system(&self) -> Option<MeasurementSystem> {
        self.defaults.as_ref().and_then(|d| d.system)
    }

    pub fn format(&self) -> Option<OutputFormat> {
        self.defaults.as_ref().and_then(|d| d.format)
    }

    pub fn output_path(&self) -> &str {
        self.output
            .as_ref()
            .and_then(|o| o.path.as_deref())
            .unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    /// 將覆寫套用到預設範圍上
    pub fn ranges(&self) -> ValidationRanges {
        let mut ranges = ValidationRanges::default();
        let Some(overrides) = &self.ranges else {
            return ranges;
        };

        if let Some(metric) = &overrides.metric {
            if let Some(bounds) = metric.height_cm {
                ranges.metric.height_cm = bounds;
            }
            if let Some(bounds) = metric.weight_kg {
                ranges.metric.weight_kg = bounds;
            }
        }

        if let Some(imperial) = &overrides.imperial {
            if let Some(bounds) = imperial.feet {
                ranges.imperial.feet = bounds;
            }
            if let Some(bounds) = imperial.inches {
                ranges.imperial.inches = bounds;
            }
            if let Some(bounds) = imperial.pounds {
                ranges.imperial.pounds = bounds;
            }
        }

        ranges
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        crate::utils::validation::validate_path("output.path", self.output_path())?;
        self.ranges().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[defaults]
system = "imperial"
format = "json"

[output]
path = "./reports"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.system(), Some(MeasurementSystem::Imperial));
        assert_eq!(config.format(), Some(OutputFormat::Json));
        assert_eq!(config.output_path(), "./reports");
        assert_eq!(config.ranges(), ValidationRanges::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = TomlConfig::from_toml_str("").unwrap();
        assert_eq!(config.system(), None);
        assert_eq!(config.output_path(), DEFAULT_OUTPUT_PATH);
        assert_eq!(config.ranges(), ValidationRanges::default());
    }

    #[test]
    fn test_partial_range_override() {
        let toml_content = r#"
[ranges.metric]
height_cm = { min = 100, max = 220 }

[ranges.imperial]
pounds = { min = 60.5, max = 500 }
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        let ranges = config.ranges();

        assert_eq!(ranges.metric.height_cm, Bounds::new(100.0, 220.0));
        assert_eq!(ranges.metric.weight_kg, Bounds::new(20.0, 300.0));
        assert_eq!(ranges.imperial.pounds, Bounds::new(60.5, 500.0));
        assert_eq!(ranges.imperial.feet, Bounds::new(3.0, 8.0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_range_override_rejected() {
        let toml_content = r#"
[ranges.metric]
weight_kg = { min = 300, max = 20 }
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(matches!(
            config.validate(),
            Err(BmiError::InvalidConfigValueError { .. })
        ));
    }

    #[test]
    fn test_unknown_system_is_parse_error() {
        let toml_content = r#"
[defaults]
system = "stone"
"#;

        assert!(matches!(
            TomlConfig::from_toml_str(toml_content),
            Err(BmiError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("BMI_TEST_OUTPUT_DIR", "/tmp/bmi-reports");

        let toml_content = r#"
[output]
path = "${BMI_TEST_OUTPUT_DIR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.output_path(), "/tmp/bmi-reports");

        std::env::remove_var("BMI_TEST_OUTPUT_DIR");
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[defaults]
system = "metric"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.system(), Some(MeasurementSystem::Metric));
    }
}
