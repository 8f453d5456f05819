use bmi_calc::app::render::{render_result, render_summary};
use bmi_calc::utils::error::{exit_code, BmiError};
use bmi_calc::utils::{logger, validation::Validate};
use bmi_calc::{
    BatchEngine, BatchPipeline, BmiEvaluator, CliConfig, LocalStorage, OutputFormat, Settings,
    TomlConfig,
};
use clap::Parser;
use std::io::Write;

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(&config) {
        tracing::error!(
            "❌ bmi-calc failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::debug!("💡 Recovery suggestion: {}", e.recovery_suggestion());

        if !e.is_recoverable() {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
        }

        std::process::exit(exit_code(&e));
    }
}

fn run(config: &CliConfig) -> Result<(), BmiError> {
    let file_config = match &config.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path);
            Some(TomlConfig::from_file(path)?)
        }
        None => None,
    };

    let settings = Settings::resolve(config, file_config.as_ref());
    settings.validate()?;

    match &config.batch {
        Some(input) => run_batch(input, settings),
        None => run_single(config, &settings, &mut std::io::stdout().lock()),
    }
}

/// 驗證失敗時仍先輸出結果區塊，再回傳錯誤
fn run_single(
    config: &CliConfig,
    settings: &Settings,
    out: &mut impl Write,
) -> Result<(), BmiError> {
    let request = config.request(settings.system);
    let evaluator = BmiEvaluator::new(settings.ranges);
    let outcome = evaluator.evaluate(&request);

    writeln!(out, "{}", render_result(settings.system, &outcome, settings.format)?)?;

    outcome.map(|_| ())
}

fn run_batch(input: &str, settings: Settings) -> Result<(), BmiError> {
    // 相對路徑以目前目錄為準，而不是輸出目錄
    let input_path = std::env::current_dir()?.join(input);
    let format = settings.format;

    let storage = LocalStorage::new(settings.output_path.clone());
    let engine = BatchEngine::new(BatchPipeline::new(storage, settings));

    let (output_path, report) = engine.run(&input_path.to_string_lossy())?;

    println!("{}", render_summary(&report.summary, format)?);
    if format == OutputFormat::Text {
        println!("📁 Output saved to: {}", output_path);
    }

    Ok(())
}
