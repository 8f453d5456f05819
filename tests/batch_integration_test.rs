use anyhow::Result;
use bmi_calc::app::pipelines::batch_pipeline::RESULTS_FILENAME;
use bmi_calc::utils::validation::Validate;
use bmi_calc::{
    BatchEngine, BatchPipeline, BmiCategory, LocalStorage, MeasurementSystem, Settings,
    TomlConfig,
};
use tempfile::TempDir;

const BATCH_CSV: &str = "\
system,height_cm,weight_kg,feet,inches,pounds
metric,170,70,,,
imperial,,,5,7,154
metric,190,120,,,
imperial,,,5,7,700
metric,,70,,,
";

#[test]
fn test_end_to_end_batch_with_local_storage() -> Result<()> {
    let input_dir = TempDir::new()?;
    let output_dir = TempDir::new()?;
    let input_path = input_dir.path().join("people.csv");
    std::fs::write(&input_path, BATCH_CSV)?;

    let settings = Settings {
        output_path: output_dir.path().to_string_lossy().into_owned(),
        ..Default::default()
    };
    let storage = LocalStorage::new(settings.output_path.clone());
    let engine = BatchEngine::new(BatchPipeline::new(storage, settings));

    let (output_path, report) = engine.run(input_path.to_str().unwrap())?;

    assert_eq!(report.summary.total, 5);
    assert_eq!(report.summary.succeeded, 3);
    assert_eq!(report.summary.failed, 2);
    assert_eq!(report.summary.count(BmiCategory::NormalWeight), 2);
    assert_eq!(report.summary.count(BmiCategory::Obese), 1);

    let written = std::fs::read_to_string(output_dir.path().join(RESULTS_FILENAME))?;
    assert_eq!(output_path, output_dir.path().join(RESULTS_FILENAME).to_string_lossy());

    let mut reader = csv::Reader::from_reader(written.as_bytes());
    let rows: Vec<csv::StringRecord> = reader.records().collect::<std::result::Result<_, _>>()?;
    assert_eq!(rows.len(), 5);
    assert_eq!(&rows[0][2], "24.2");
    assert_eq!(&rows[1][1], "imperial");
    assert_eq!(&rows[1][2], "24.1");
    assert_eq!(&rows[2][3], "obese");
    assert_eq!(&rows[3][4], "Please check your inputs");
    assert_eq!(&rows[4][2], "");

    Ok(())
}

#[test]
fn test_batch_with_toml_range_override() -> Result<()> {
    let work_dir = TempDir::new()?;
    let input_path = work_dir.path().join("kids.csv");
    std::fs::write(
        &input_path,
        "system,height_cm,weight_kg\nmetric,45,15\nmetric,40,12\n",
    )?;

    let output_dir = work_dir.path().join("out");
    let config_path = work_dir.path().join("bmi.toml");
    std::fs::write(
        &config_path,
        format!(
            r#"
[defaults]
system = "metric"

[output]
path = "{}"

[ranges.metric]
height_cm = {{ min = 40, max = 250 }}
weight_kg = {{ min = 10, max = 300 }}
"#,
            output_dir.to_string_lossy().replace('\\', "/")
        ),
    )?;

    let config = TomlConfig::from_file(&config_path)?;
    config.validate()?;
    let settings = Settings::from_toml(&config);
    assert_eq!(settings.system, MeasurementSystem::Metric);

    let storage = LocalStorage::new(settings.output_path.clone());
    let engine = BatchEngine::new(BatchPipeline::new(storage, settings));
    let (_, report) = engine.run(input_path.to_str().unwrap())?;

    assert_eq!(report.summary.succeeded, 2);
    assert!(output_dir.join(RESULTS_FILENAME).exists());

    Ok(())
}

#[test]
fn test_malformed_csv_aborts_batch() -> Result<()> {
    let work_dir = TempDir::new()?;
    let input_path = work_dir.path().join("broken.csv");
    std::fs::write(&input_path, b"system,height_cm\nmetric,\xff\n")?;

    let settings = Settings {
        output_path: work_dir.path().to_string_lossy().into_owned(),
        ..Default::default()
    };
    let storage = LocalStorage::new(settings.output_path.clone());
    let engine = BatchEngine::new(BatchPipeline::new(storage, settings));

    let err = engine.run(input_path.to_str().unwrap()).unwrap_err();
    assert!(matches!(err, bmi_calc::BmiError::CsvError(_)));
    assert!(!work_dir.path().join(RESULTS_FILENAME).exists());

    Ok(())
}
