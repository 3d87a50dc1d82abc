//! Error types for salesweb-core
//!
//! This module provides error handling for the report and record
//! functionality, including error codes, user-facing messages, and
//! suggestions.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;

use salesweb_sheet::SheetError;

/// Error codes for programmatic error handling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// No spreadsheet uploaded yet
    NotLoaded,
    /// File extension not accepted
    UnsupportedFile,
    /// Workbook could not be decoded
    UnreadableFile,
    /// Header row missing from the sheet
    InvalidFormat,
    /// Start or end of the time window is invalid
    InvalidTimeWindow,
    /// No date chosen for filtering
    DateNotSelected,
    /// Validation error
    ValidationError,
    /// Transaction record not found
    RecordNotFound,
    /// Internal error
    InternalError,
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCode::NotLoaded => write!(f, "NOT_LOADED"),
            ErrorCode::UnsupportedFile => write!(f, "UNSUPPORTED_FILE"),
            ErrorCode::UnreadableFile => write!(f, "UNREADABLE_FILE"),
            ErrorCode::InvalidFormat => write!(f, "INVALID_FORMAT"),
            ErrorCode::InvalidTimeWindow => write!(f, "INVALID_TIME_WINDOW"),
            ErrorCode::DateNotSelected => write!(f, "DATE_NOT_SELECTED"),
            ErrorCode::ValidationError => write!(f, "VALIDATION_ERROR"),
            ErrorCode::RecordNotFound => write!(f, "RECORD_NOT_FOUND"),
            ErrorCode::InternalError => write!(f, "INTERNAL_ERROR"),
        }
    }
}

/// Detailed error information for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorDetails {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable message
    pub message: String,
    /// Additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
    /// Suggestions for resolution
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggestions: Vec<String>,
}

impl ErrorDetails {
    /// Create a new error detail
    pub fn new(code: ErrorCode, message: String) -> Self {
        Self {
            code,
            message,
            details: None,
            suggestions: vec![],
        }
    }

    /// Add detail information
    pub fn with_detail(mut self, detail: serde_json::Value) -> Self {
        self.details = Some(detail);
        self
    }

    /// Add a suggestion
    pub fn with_suggestion(mut self, suggestion: String) -> Self {
        self.suggestions.push(suggestion);
        self
    }
}

impl std::fmt::Display for ErrorDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref details) = self.details {
            write!(f, "\nDetails: {}", details)?;
        }
        if !self.suggestions.is_empty() {
            write!(f, "\nSuggestions:")?;
            for suggestion in &self.suggestions {
                write!(f, "\n  - {}", suggestion)?;
            }
        }
        Ok(())
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorSeverity {
    /// Informational
    Info,
    /// Warning - user input rejected
    Warning,
    /// Error - operation failed
    Error,
    /// Critical - application may be unstable
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "info"),
            ErrorSeverity::Warning => write!(f, "warning"),
            ErrorSeverity::Error => write!(f, "error"),
            ErrorSeverity::Critical => write!(f, "critical"),
        }
    }
}

/// Per-field messages from record form validation, keyed by field name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldErrors(pub BTreeMap<String, String>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for a field; the first message per field is kept
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_string())
            .or_insert_with(|| message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(field, message)| format!("{}: {}", field, message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

/// Main error type for salesweb-core
///
/// Messages are the alerts shown to the station operator.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Chưa có file nào được tải lên")]
    NotLoaded,

    #[error("Vui lòng chỉ chọn file Excel có định dạng .xlsx")]
    UnsupportedFile { file_name: String },

    #[error("Không thể đọc nội dung file. Đảm bảo file là định dạng Excel .xlsx hợp lệ.")]
    UnreadableFile { message: String },

    #[error("Kiểm tra lại file của bạn, có thể nó đã sai định dạng file mẫu cho phép")]
    InvalidFormat { expected: String },

    #[error("Thời gian không hợp lệ!")]
    InvalidTimeWindow,

    #[error("Vui lòng chọn ngày!")]
    DateNotSelected,

    #[error("{message}")]
    ValidationError { field: String, message: String },

    #[error("Dữ liệu giao dịch không hợp lệ: {errors}")]
    InvalidRecord { errors: FieldErrors },

    #[error("Không tìm thấy giao dịch #{id}")]
    RecordNotFound { id: u64 },

    #[error("Internal error: {message}")]
    InternalError { message: String },
}

impl CoreError {
    /// Get the error code
    pub fn code(&self) -> ErrorCode {
        match self {
            CoreError::NotLoaded => ErrorCode::NotLoaded,
            CoreError::UnsupportedFile { .. } => ErrorCode::UnsupportedFile,
            CoreError::UnreadableFile { .. } => ErrorCode::UnreadableFile,
            CoreError::InvalidFormat { .. } => ErrorCode::InvalidFormat,
            CoreError::InvalidTimeWindow => ErrorCode::InvalidTimeWindow,
            CoreError::DateNotSelected => ErrorCode::DateNotSelected,
            CoreError::ValidationError { .. } => ErrorCode::ValidationError,
            CoreError::InvalidRecord { .. } => ErrorCode::ValidationError,
            CoreError::RecordNotFound { .. } => ErrorCode::RecordNotFound,
            CoreError::InternalError { .. } => ErrorCode::InternalError,
        }
    }

    /// Get the severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CoreError::NotLoaded => ErrorSeverity::Info,
            CoreError::UnsupportedFile { .. } => ErrorSeverity::Warning,
            CoreError::UnreadableFile { .. } => ErrorSeverity::Warning,
            CoreError::InvalidFormat { .. } => ErrorSeverity::Warning,
            CoreError::InvalidTimeWindow => ErrorSeverity::Warning,
            CoreError::DateNotSelected => ErrorSeverity::Warning,
            CoreError::ValidationError { .. } => ErrorSeverity::Warning,
            CoreError::InvalidRecord { .. } => ErrorSeverity::Warning,
            CoreError::RecordNotFound { .. } => ErrorSeverity::Info,
            CoreError::InternalError { .. } => ErrorSeverity::Critical,
        }
    }

    /// Whether the error was caused by user input rather than a server fault
    pub fn is_user_error(&self) -> bool {
        matches!(self.severity(), ErrorSeverity::Info | ErrorSeverity::Warning)
    }

    /// Convert to detailed error info
    pub fn to_details(&self) -> ErrorDetails {
        let mut details = ErrorDetails::new(self.code(), self.to_string());

        match self {
            CoreError::NotLoaded => {
                details = details.with_suggestion(
                    "Upload an .xlsx report before filtering.".to_string()
                );
            }
            CoreError::UnsupportedFile { file_name } => {
                details = details.with_detail(serde_json::json!({ "file_name": file_name }));
                details = details.with_suggestion(
                    "Only .xlsx workbooks are accepted.".to_string()
                );
            }
            CoreError::UnreadableFile { message } => {
                details = details.with_detail(serde_json::json!({ "decode_message": message }));
                details = details.with_suggestion(
                    "Re-export the report from the station software as .xlsx.".to_string()
                );
            }
            CoreError::InvalidFormat { expected } => {
                details = details.with_detail(serde_json::json!({ "expected_columns": expected }));
                details = details.with_suggestion(format!(
                    "The first sheet must contain a header row with: {}.", expected
                ));
            }
            CoreError::InvalidTimeWindow => {
                details = details.with_suggestion(
                    "Use a date like 01/01/2024 and times like 08:00.".to_string()
                );
            }
            CoreError::ValidationError { field, .. } => {
                details = details.with_detail(serde_json::json!({ "field": field }));
            }
            CoreError::InvalidRecord { errors } => {
                details = details.with_detail(serde_json::json!({ "fields": errors }));
                details = details.with_suggestion(
                    "Review the message of each field.".to_string()
                );
            }
            CoreError::RecordNotFound { .. } => {
                details = details.with_suggestion(
                    "Use the /api/records endpoint to list all records.".to_string()
                );
            }
            _ => {}
        }

        details
    }
}

/// Result type with CoreError
pub type CoreResult<T> = Result<T, CoreError>;

impl From<SheetError> for CoreError {
    fn from(error: SheetError) -> Self {
        match error {
            SheetError::Unreadable { message } => CoreError::UnreadableFile { message },
            SheetError::NoSheets => CoreError::UnreadableFile {
                message: "workbook contains no sheets".to_string(),
            },
            SheetError::MissingHeader { expected } => CoreError::InvalidFormat { expected },
            SheetError::InternalError => CoreError::InternalError {
                message: "workbook decoding failed".to_string(),
            },
        }
    }
}

impl From<FieldErrors> for CoreError {
    fn from(errors: FieldErrors) -> Self {
        CoreError::InvalidRecord { errors }
    }
}

/// Error context for reporting
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation being performed
    pub operation: String,
    /// Additional context data
    pub data: serde_json::Value,
}

impl ErrorContext {
    /// Create a new error context
    pub fn new(operation: &str) -> Self {
        Self {
            operation: operation.to_string(),
            data: serde_json::json!({}),
        }
    }

    /// Add context data
    pub fn with_data(mut self, key: &str, value: serde_json::Value) -> Self {
        self.data[key] = value;
        self
    }
}

/// Error logger trait
pub trait ErrorLogger {
    /// Log an error
    fn log_error(&self, error: &CoreError, context: &ErrorContext);
}

/// Default error logger using log crate
///
/// User errors go to `warn!`, server faults to `error!`.
#[derive(Default)]
pub struct DefaultErrorLogger;

impl ErrorLogger for DefaultErrorLogger {
    fn log_error(&self, error: &CoreError, context: &ErrorContext) {
        if error.is_user_error() {
            log::warn!(
                target: "salesweb::error",
                "[{}] {} - Operation: {} - Data: {}",
                error.code(),
                error,
                context.operation,
                context.data
            );
        } else {
            log::error!(
                target: "salesweb::error",
                "ERROR [{}] {} - Operation: {} - Data: {}",
                error.code(),
                error.to_details(),
                context.operation,
                context.data
            );
        }
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code_display() {
        assert_eq!(ErrorCode::NotLoaded.to_string(), "NOT_LOADED");
        assert_eq!(ErrorCode::InvalidTimeWindow.to_string(), "INVALID_TIME_WINDOW");
        assert_eq!(ErrorCode::RecordNotFound.to_string(), "RECORD_NOT_FOUND");
    }

    #[test]
    fn test_error_code_serializes_screaming_snake() {
        let json = serde_json::to_value(ErrorCode::DateNotSelected).unwrap();
        assert_eq!(json, "DATE_NOT_SELECTED");
    }

    #[test]
    fn test_user_facing_messages() {
        assert_eq!(CoreError::InvalidTimeWindow.to_string(), "Thời gian không hợp lệ!");
        assert_eq!(CoreError::DateNotSelected.to_string(), "Vui lòng chọn ngày!");
        let error = CoreError::UnsupportedFile { file_name: "a.csv".to_string() };
        assert_eq!(error.to_string(), "Vui lòng chỉ chọn file Excel có định dạng .xlsx");
    }

    #[test]
    fn test_core_error_severity() {
        assert_eq!(CoreError::InvalidTimeWindow.severity(), ErrorSeverity::Warning);
        assert_eq!(CoreError::RecordNotFound { id: 4 }.severity(), ErrorSeverity::Info);
        let error = CoreError::InternalError { message: "test".to_string() };
        assert_eq!(error.severity(), ErrorSeverity::Critical);
        assert!(CoreError::DateNotSelected.is_user_error());
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_sheet_error_conversion() {
        let error: CoreError = SheetError::MissingHeader { expected: "Ngày, Giờ".to_string() }.into();
        assert_eq!(error.code(), ErrorCode::InvalidFormat);

        let error: CoreError = SheetError::Unreadable { message: "zip".to_string() }.into();
        assert_eq!(error.code(), ErrorCode::UnreadableFile);

        let error: CoreError = SheetError::NoSheets.into();
        assert_eq!(error.code(), ErrorCode::UnreadableFile);
    }

    #[test]
    fn test_error_details_invalid_format() {
        let error = CoreError::InvalidFormat { expected: "Date, Time, Amount".to_string() };
        let details = error.to_details();
        assert_eq!(details.code, ErrorCode::InvalidFormat);
        assert!(details.details.is_some());
        assert!(details.suggestions[0].contains("Date, Time, Amount"));
    }

    #[test]
    fn test_field_errors_keep_first_message() {
        let mut errors = FieldErrors::new();
        errors.add("quantity", "Vui lòng nhập số lượng");
        errors.add("quantity", "Số lượng phải là một số dương");
        errors.add("pump", "Vui lòng chọn trụ bơm");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.get("quantity"), Some("Vui lòng nhập số lượng"));

        let error: CoreError = errors.into();
        assert_eq!(error.code(), ErrorCode::ValidationError);
        let details = error.to_details();
        assert_eq!(
            details.details.unwrap()["fields"]["pump"],
            "Vui lòng chọn trụ bơm"
        );
    }

    #[test]
    fn test_error_context() {
        let context = ErrorContext::new("upload")
            .with_data("file_name", serde_json::json!("sales.xlsx"));
        assert_eq!(context.operation, "upload");
        assert_eq!(context.data["file_name"], "sales.xlsx");
    }
}
