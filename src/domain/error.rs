//! Domain error types.
//!
//! Zero standard deviation and zero average loss are not errors: the engines
//! resolve them to closed-form values (equal bands, RSI of 100).

/// Top-level error type for stockta.
#[derive(Debug, thiserror::Error)]
pub enum AnalyzerError {
    #[error("invalid parameter {name}: {value} (must be positive)")]
    InvalidParameter { name: String, value: i64 },

    #[error("insufficient data: have {points} points, need {required}")]
    InsufficientData { points: usize, required: usize },

    #[error("date range out of bounds: {days} days from {start}")]
    DateOutOfRange { start: chrono::NaiveDate, days: usize },

    #[error("failed to load {path}: {reason}")]
    DataLoad { path: String, reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AnalyzerError {
    pub fn invalid_parameter(name: &str, value: usize) -> Self {
        AnalyzerError::InvalidParameter {
            name: name.to_string(),
            value: value as i64,
        }
    }
}

impl From<&AnalyzerError> for std::process::ExitCode {
    fn from(err: &AnalyzerError) -> Self {
        let code: u8 = match err {
            AnalyzerError::Io(_) => 1,
            AnalyzerError::ConfigParse { .. } | AnalyzerError::ConfigInvalid { .. } => 2,
            AnalyzerError::DataLoad { .. } => 3,
            AnalyzerError::InvalidParameter { .. } | AnalyzerError::DateOutOfRange { .. } => 4,
            AnalyzerError::InsufficientData { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
