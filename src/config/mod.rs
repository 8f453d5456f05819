pub mod cli;
pub mod toml_config;

use crate::app::render::OutputFormat;
use crate::core::ConfigProvider;
use crate::domain::model::{BmiRequest, MeasurementSystem};
use crate::domain::ranges::ValidationRanges;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use toml_config::{TomlConfig, DEFAULT_OUTPUT_PATH};

#[cfg(feature = "cli")]
use clap::Parser;

/// 預設值與原始表單的初始值一致
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "bmi-calc")]
#[command(about = "Body Mass Index calculator for metric and imperial measurements")]
pub struct CliConfig {
    #[arg(long, value_enum, help = "Unit system [default: metric]")]
    pub system: Option<MeasurementSystem>,

    #[arg(long, default_value = "170", allow_hyphen_values = true, help = "Height in cm")]
    pub height: String,

    #[arg(long, default_value = "70", allow_hyphen_values = true, help = "Weight in kg")]
    pub weight: String,

    #[arg(long, default_value = "5", allow_hyphen_values = true, help = "Height, feet part")]
    pub feet: String,

    #[arg(long, default_value = "7", allow_hyphen_values = true, help = "Height, inches part")]
    pub inches: String,

    #[arg(long, default_value = "154", allow_hyphen_values = true, help = "Weight in lb")]
    pub pounds: String,

    #[arg(long, value_enum, help = "Output format [default: text]")]
    pub format: Option<OutputFormat>,

    #[arg(long, help = "CSV file to evaluate in batch")]
    pub batch: Option<String>,

    #[arg(long, help = "Directory for batch results [default: ./output]")]
    pub output_path: Option<String>,

    #[arg(short, long, help = "Path to TOML configuration file")]
    pub config: Option<String>,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 依單位系統取出對應的原始欄位
    pub fn request(&self, system: MeasurementSystem) -> BmiRequest {
        match system {
            MeasurementSystem::Metric => BmiRequest::metric(&self.height, &self.weight),
            MeasurementSystem::Imperial => {
                BmiRequest::imperial(&self.feet, &self.inches, &self.pounds)
            }
        }
    }
}

/// 合併命令列、設定檔與預設值後的最終設定
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub system: MeasurementSystem,
    pub format: OutputFormat,
    pub ranges: ValidationRanges,
    pub output_path: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            system: MeasurementSystem::default(),
            format: OutputFormat::default(),
            ranges: ValidationRanges::default(),
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
        }
    }
}

impl Settings {
    pub fn from_toml(config: &TomlConfig) -> Self {
        Self {
            system: config.system().unwrap_or_default(),
            format: config.format().unwrap_or_default(),
            ranges: config.ranges(),
            output_path: config.output_path().to_string(),
        }
    }

    /// 命令列參數優先於設定檔
    #[cfg(feature = "cli")]
    pub fn resolve(cli: &CliConfig, file: Option<&TomlConfig>) -> Self {
        let mut settings = file.map(Self::from_toml).unwrap_or_default();

        if let Some(system) = cli.system {
            settings.system = system;
        }
        if let Some(format) = cli.format {
            settings.format = format;
        }
        if let Some(output_path) = &cli.output_path {
            settings.output_path = output_path.clone();
        }

        settings
    }
}

impl ConfigProvider for Settings {
    fn ranges(&self) -> &ValidationRanges {
        &self.ranges
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("output_path", &self.output_path)?;
        self.ranges.validate()
    }
}
