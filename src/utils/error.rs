use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Invalid {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Generative service timed out after {timeout:?}")]
    ServiceTimeout { timeout: Duration },

    #[error("Generative service request failed: {0}")]
    ServiceTransport(#[from] reqwest::Error),

    #[error("Generative service returned HTTP {status}: {body}")]
    ServiceStatus { status: u16, body: String },

    #[error("Generative service is not configured: {message}")]
    ServiceNotConfigured { message: String },

    #[error("Malformed generative response: {message}")]
    MalformedResponse { message: String },

    #[error("Audit write failed: {message}")]
    AuditFailure { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Input,
    Service,
    Audit,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlannerError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        PlannerError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::ValidationError { .. } => ErrorCategory::Input,
            PlannerError::ServiceTimeout { .. }
            | PlannerError::ServiceTransport(_)
            | PlannerError::ServiceStatus { .. }
            | PlannerError::ServiceNotConfigured { .. }
            | PlannerError::MalformedResponse { .. } => ErrorCategory::Service,
            PlannerError::AuditFailure { .. } => ErrorCategory::Audit,
            PlannerError::ConfigError { .. }
            | PlannerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PlannerError::IoError(_) | PlannerError::SerializationError(_) => {
                ErrorCategory::System
            }
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Audit => ErrorSeverity::Low,
            ErrorCategory::Service => ErrorSeverity::Medium,
            ErrorCategory::Input | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 可在管道內部吸收並改走備援清單的錯誤
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Service | ErrorCategory::Audit
        )
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            PlannerError::ValidationError { .. } => {
                "Provide a positive whole-number budget and a non-empty cooking goal"
            }
            PlannerError::ServiceTimeout { .. } => {
                "Increase the service timeout or retry later; a fallback list was used"
            }
            PlannerError::ServiceTransport(_) => "Check network connectivity to the service endpoint",
            PlannerError::ServiceStatus { .. } => "Check the API key, model name and service quota",
            PlannerError::ServiceNotConfigured { .. } => {
                "Set GEMINI_API_KEY or pass --api-key to enable generated lists"
            }
            PlannerError::MalformedResponse { .. } => {
                "Retry the request; the service reply could not be read as JSON"
            }
            PlannerError::AuditFailure { .. } => "Check that the audit path is writable",
            PlannerError::ConfigError { .. } | PlannerError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command-line flags"
            }
            PlannerError::IoError(_) => "Check file paths and permissions",
            PlannerError::SerializationError(_) => "Check that the input files contain valid JSON",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            PlannerError::ValidationError { field, message } => {
                format!("Please provide a valid {}: {}", field, message)
            }
            PlannerError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration value '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_is_not_recoverable() {
        let err = PlannerError::validation("budget_inr", "must be greater than zero");
        assert_eq!(err.category(), ErrorCategory::Input);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert!(!err.is_recoverable());
        assert_eq!(
            err.user_friendly_message(),
            "Please provide a valid budget_inr: must be greater than zero"
        );
    }

    #[test]
    fn test_service_errors_are_recoverable() {
        let errors = vec![
            PlannerError::ServiceTimeout {
                timeout: Duration::from_secs(30),
            },
            PlannerError::ServiceStatus {
                status: 503,
                body: "unavailable".to_string(),
            },
            PlannerError::MalformedResponse {
                message: "expected value".to_string(),
            },
            PlannerError::AuditFailure {
                message: "disk full".to_string(),
            },
        ];

        for err in errors {
            assert!(err.is_recoverable(), "{} should be recoverable", err);
            assert!(err.severity() < ErrorSeverity::High);
        }
    }

    #[test]
    fn test_sub_second_timeout_is_reported() {
        let err = PlannerError::ServiceTimeout {
            timeout: Duration::from_millis(200),
        };
        assert_eq!(err.to_string(), "Generative service timed out after 200ms");

        let err = PlannerError::ServiceTimeout {
            timeout: Duration::from_secs(30),
        };
        assert_eq!(err.to_string(), "Generative service timed out after 30s");
    }
}
