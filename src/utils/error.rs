use thiserror::Error;

#[derive(Error, Debug)]
pub enum CostError {
    #[error("Zip operation failed: {0}")]
    ZipError(#[from] zip::result::ZipError),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Data processing error: {message}")]
    ProcessingError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

/// 錯誤分類，用於日誌與報告
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Config,
    Data,
    Io,
    System,
}

/// 錯誤嚴重程度，決定 CLI 退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CostError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            CostError::ConfigValidationError { .. }
            | CostError::InvalidConfigValueError { .. }
            | CostError::MissingConfigError { .. } => ErrorCategory::Config,
            CostError::CsvError(_)
            | CostError::SerializationError(_)
            | CostError::ProcessingError { .. }
            | CostError::ValidationError { .. } => ErrorCategory::Data,
            CostError::IoError(_) => ErrorCategory::Io,
            CostError::ZipError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CostError::ValidationError { .. } => ErrorSeverity::Medium,
            CostError::ConfigValidationError { .. }
            | CostError::InvalidConfigValueError { .. }
            | CostError::MissingConfigError { .. }
            | CostError::CsvError(_)
            | CostError::SerializationError(_)
            | CostError::ProcessingError { .. } => ErrorSeverity::High,
            CostError::IoError(_) | CostError::ZipError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CostError::ZipError(_) => "Check free disk space and that the output file is not open elsewhere",
            CostError::CsvError(_) => "Check that the catalog CSV has a 'name,base' header and numeric amounts",
            CostError::IoError(_) => "Check that the paths exist and are readable/writable",
            CostError::SerializationError(_) => "This is likely a bug in the report builder; re-run with --verbose and report it",
            CostError::ConfigValidationError { .. } => "Fix the named config field and re-run",
            CostError::InvalidConfigValueError { .. } => "Replace the rejected value; run with --dry-run to review the full config",
            CostError::MissingConfigError { .. } => "Add the missing field to the config file",
            CostError::ProcessingError { .. } => "Re-run with --verbose to see which stage failed",
            CostError::ValidationError { .. } => "Provide at least one catalog item, or enable the demo catalog fallback",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CostError::ConfigValidationError { field, message } => {
                format!("Configuration problem in '{}': {}", field, message)
            }
            CostError::InvalidConfigValueError { field, value, reason } => {
                format!("'{}' is not a valid value for '{}': {}", value, field, reason)
            }
            CostError::MissingConfigError { field } => {
                format!("The config file is missing '{}'", field)
            }
            CostError::ProcessingError { message } => format!("Costing failed: {}", message),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CostError>;
