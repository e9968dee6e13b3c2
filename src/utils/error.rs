use crate::domain::report::ErrorResponseItem;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsaError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API returned status {status}: {}", format_remote_errors(.errors))]
    Remote {
        status: u16,
        errors: Vec<ErrorResponseItem>,
    },

    #[error("API returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Malformed response body: {0}")]
    MalformedBody(#[from] serde_json::Error),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid amount '{value}': {reason}")]
    InvalidAmount { value: String, reason: String },

    #[error("Response carried no data: {context}")]
    EmptyResponse { context: String },

    #[error("Report {id} is not ready for download (state: {state})")]
    ReportNotReady { id: i64, state: String },

    #[error("Validation error on '{field}': {message}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

fn format_remote_errors(errors: &[ErrorResponseItem]) -> String {
    if errors.is_empty() {
        return "no error details".to_string();
    }
    errors
        .iter()
        .map(|e| match e.field.as_deref().filter(|f| !f.is_empty()) {
            Some(field) => format!("{} ({}): {}", e.message_code, field, e.message),
            None => format!("{}: {}", e.message_code, e.message),
        })
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Remote,
    Data,
    Configuration,
    Validation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AsaError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            AsaError::Network(_) => ErrorCategory::Network,
            AsaError::Remote { .. }
            | AsaError::Status { .. }
            | AsaError::EmptyResponse { .. }
            | AsaError::ReportNotReady { .. } => ErrorCategory::Remote,
            AsaError::MalformedBody(_)
            | AsaError::Csv(_)
            | AsaError::Io(_)
            | AsaError::InvalidAmount { .. } => ErrorCategory::Data,
            AsaError::Config { .. }
            | AsaError::MissingConfig { .. }
            | AsaError::InvalidConfigValue { .. } => ErrorCategory::Configuration,
            AsaError::Validation { .. } => ErrorCategory::Validation,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AsaError::ReportNotReady { .. } => ErrorSeverity::Low,
            AsaError::Network(_) => ErrorSeverity::Medium,
            AsaError::Status { status, .. } | AsaError::Remote { status, .. } => {
                // 429 與 5xx 可由呼叫端自行重試
                if *status == 429 || *status >= 500 {
                    ErrorSeverity::Medium
                } else {
                    ErrorSeverity::High
                }
            }
            AsaError::EmptyResponse { .. }
            | AsaError::MalformedBody(_)
            | AsaError::Csv(_)
            | AsaError::InvalidAmount { .. }
            | AsaError::Validation { .. } => ErrorSeverity::High,
            AsaError::Io(_)
            | AsaError::Config { .. }
            | AsaError::MissingConfig { .. }
            | AsaError::InvalidConfigValue { .. } => ErrorSeverity::Critical,
        }
    }

    /// HTTP status of a failed API call, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            AsaError::Remote { status, .. } | AsaError::Status { status, .. } => Some(*status),
            AsaError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            AsaError::Network(_) => "Check network connectivity and the API base URL, then retry",
            AsaError::Remote { status: 401, .. } | AsaError::Status { status: 401, .. } => {
                "The access token is missing or expired; request a new one"
            }
            AsaError::Remote { status: 403, .. } | AsaError::Status { status: 403, .. } => {
                "Verify the organization id has access to Impression Share reports"
            }
            AsaError::Remote { status: 429, .. } | AsaError::Status { status: 429, .. } => {
                "Rate limit reached; wait before issuing more report requests"
            }
            AsaError::Remote { .. } | AsaError::Status { .. } => {
                "Inspect the API error details and adjust the request"
            }
            AsaError::ReportNotReady { .. } => "Wait for the report to complete and try again",
            AsaError::EmptyResponse { .. } | AsaError::MalformedBody(_) | AsaError::Csv(_) => {
                "The API returned unexpected data; check for API version changes"
            }
            AsaError::InvalidAmount { .. } => "Amounts must look like 123, 123.4 or 123.45",
            AsaError::Io(_) => "Check file permissions and available disk space",
            AsaError::Validation { .. } => "Fix the request parameters and retry",
            AsaError::Config { .. }
            | AsaError::MissingConfig { .. }
            | AsaError::InvalidConfigValue { .. } => {
                "Review the configuration file and command line flags"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Network => format!("Could not reach the Search Ads API: {}", self),
            ErrorCategory::Remote => format!("The Search Ads API rejected the request: {}", self),
            ErrorCategory::Data => format!("Could not read the API data: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::Validation => format!("Invalid request: {}", self),
        }
    }
}

pub type Result<T> = std::result::Result<T, AsaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_error_message_lists_details() {
        let err = AsaError::Remote {
            status: 400,
            errors: vec![ErrorResponseItem {
                message_code: "INVALID_INPUT".to_string(),
                message: "name is too long".to_string(),
                field: Some("name".to_string()),
            }],
        };

        assert_eq!(
            err.to_string(),
            "API returned status 400: INVALID_INPUT (name): name is too long"
        );
        assert_eq!(err.category(), ErrorCategory::Remote);
        assert_eq!(err.severity(), ErrorSeverity::High);
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_server_errors_are_retryable_severity() {
        let err = AsaError::Status {
            status: 503,
            body: String::new(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);

        let err = AsaError::Status {
            status: 429,
            body: String::new(),
        };
        assert_eq!(err.severity(), ErrorSeverity::Medium);
        assert!(err.recovery_suggestion().contains("Rate limit"));
    }

    #[test]
    fn test_config_errors_are_critical() {
        let err = AsaError::MissingConfig {
            field: "api.org_id".to_string(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.severity(), ErrorSeverity::Critical);
        assert!(err.user_friendly_message().starts_with("Invalid configuration"));
    }
}
