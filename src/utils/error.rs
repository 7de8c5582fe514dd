use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid form field '{field}': {message}")]
    ValidationError { field: String, message: String },

    #[error("Advisory service returned status {status}: {body}")]
    AdvisoryStatusError { status: u16, body: String },

    #[error("Advisory response unusable: {message}")]
    AdvisoryResponseError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Configuration,
    Validation,
    DataProcessing,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AdvisorError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AdvisorError::ApiError(_)
            | AdvisorError::AdvisoryStatusError { .. }
            | AdvisorError::AdvisoryResponseError { .. } => ErrorCategory::Network,
            AdvisorError::ConfigError { .. }
            | AdvisorError::ConfigValidationError { .. }
            | AdvisorError::InvalidConfigValueError { .. }
            | AdvisorError::MissingConfigError { .. } => ErrorCategory::Configuration,
            AdvisorError::ValidationError { .. } => ErrorCategory::Validation,
            AdvisorError::CsvError(_) | AdvisorError::SerializationError(_) => {
                ErrorCategory::DataProcessing
            }
            AdvisorError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Validation => ErrorSeverity::Low,
            ErrorCategory::Network => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::DataProcessing => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            AdvisorError::ApiError(_) => {
                "Check your network connection and the advisory endpoint, then try again".to_string()
            }
            AdvisorError::AdvisoryStatusError { status, .. } if *status == 401 || *status == 403 => {
                "Check that GEMINI_API_KEY holds a valid API key".to_string()
            }
            AdvisorError::AdvisoryStatusError { .. } | AdvisorError::AdvisoryResponseError { .. } => {
                "The advisory service could not answer; resubmit the form later".to_string()
            }
            AdvisorError::MissingConfigError { field } => {
                format!("Provide '{}' in the config file or the environment", field)
            }
            AdvisorError::ConfigError { .. }
            | AdvisorError::ConfigValidationError { .. }
            | AdvisorError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags".to_string()
            }
            AdvisorError::ValidationError { field, .. } => {
                format!("Correct the '{}' field and resubmit", field)
            }
            AdvisorError::CsvError(_) => {
                "Make sure the CSV has a header row with the expected columns".to_string()
            }
            AdvisorError::SerializationError(_) => {
                "The data could not be encoded or decoded as JSON".to_string()
            }
            AdvisorError::IoError(_) => "Check file paths and permissions".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => "Could not reach the advisory service".to_string(),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Validation => self.to_string(),
            ErrorCategory::DataProcessing => format!("Data could not be processed: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AdvisorError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories_and_severity() {
        let err = AdvisorError::validation("mileage", "must not be negative");
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert_eq!(err.severity(), ErrorSeverity::Low);

        let err = AdvisorError::MissingConfigError {
            field: "advisory.api_key".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.recovery_suggestion().contains("advisory.api_key"));
    }

    #[test]
    fn test_auth_status_suggests_api_key() {
        let err = AdvisorError::AdvisoryStatusError {
            status: 403,
            body: "forbidden".to_string(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("GEMINI_API_KEY"));
    }
}
