use thiserror::Error;

/// 輸入驗證失敗時對使用者顯示的唯一訊息
pub const CHECK_INPUTS_MESSAGE: &str = "Please check your inputs";

#[derive(Error, Debug)]
pub enum BmiError {
    /// 輸入缺漏、非數字或超出生理範圍。刻意不帶欄位細節。
    #[error("Please check your inputs")]
    ValidationError,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Configuration,
    Io,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    High,
    Critical,
}

impl BmiError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            BmiError::ValidationError => ErrorCategory::Input,
            BmiError::IoError(_) => ErrorCategory::Io,
            BmiError::CsvError(_) | BmiError::SerializationError(_) => ErrorCategory::Data,
            BmiError::ConfigValidationError { .. }
            | BmiError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Input => ErrorSeverity::High,
            ErrorCategory::Data => ErrorSeverity::High,
            ErrorCategory::Configuration | ErrorCategory::Io => ErrorSeverity::Critical,
        }
    }

    /// 驗證失敗可由使用者重新輸入修正
    pub fn is_recoverable(&self) -> bool {
        matches!(self, BmiError::ValidationError)
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            BmiError::ValidationError => CHECK_INPUTS_MESSAGE.to_string(),
            BmiError::IoError(e) => format!("Could not read or write a file: {}", e),
            BmiError::CsvError(e) => format!("The batch file is not valid CSV: {}", e),
            BmiError::SerializationError(e) => format!("Could not serialize the result: {}", e),
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Input => {
                "Height must be 50-250 cm and weight 20-300 kg, or 3-8 ft, 0-11 in and 50-660 lb"
            }
            ErrorCategory::Configuration => "Check the TOML config file and command-line flags",
            ErrorCategory::Io => "Make sure the paths exist and are readable/writable",
            ErrorCategory::Data => {
                "Batch files need the header system,height_cm,weight_kg,feet,inches,pounds"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, BmiError>;

/// 依嚴重程度決定 CLI 結束碼；成功時為 0
pub fn exit_code(err: &BmiError) -> i32 {
    match err.severity() {
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_generic() {
        let err = BmiError::ValidationError;
        assert_eq!(err.to_string(), "Please check your inputs");
        assert_eq!(err.user_friendly_message(), CHECK_INPUTS_MESSAGE);
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_io_error_is_critical() {
        let err: BmiError =
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing.csv").into();
        assert_eq!(err.category(), ErrorCategory::Io);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(exit_code(&BmiError::ValidationError), 1);

        let csv_err = csv::Reader::from_reader(&b"a\n\xff\n"[..])
            .records()
            .find_map(|r| r.err())
            .unwrap();
        assert_eq!(exit_code(&BmiError::CsvError(csv_err)), 1);

        let io_err: BmiError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "out").into();
        assert_eq!(exit_code(&io_err), 3);

        let config_err = BmiError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: "expected a table".to_string(),
        };
        assert_eq!(exit_code(&config_err), 3);
    }

    #[test]
    fn test_config_error_message() {
        let err = BmiError::InvalidConfigValueError {
            field: "ranges.metric.height_cm".to_string(),
            value: "300".to_string(),
            reason: "min must not exceed max".to_string(),
        };
        assert!(err.to_string().contains("ranges.metric.height_cm"));
        assert_eq!(err.severity(), ErrorSeverity::Critical);
    }
}
