//! Error types for salesweb-api

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

use salesweb_core::{CoreError, ErrorCode, ErrorDetails};

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("Bad request: {message}")]
    BadRequest { message: String },

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Internal server error")]
    InternalError,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Core(error) => match error.code() {
                ErrorCode::NotLoaded => StatusCode::CONFLICT,
                ErrorCode::UnsupportedFile => StatusCode::UNSUPPORTED_MEDIA_TYPE,
                ErrorCode::UnreadableFile | ErrorCode::InvalidFormat => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::InvalidTimeWindow
                | ErrorCode::DateNotSelected
                | ErrorCode::ValidationError => StatusCode::BAD_REQUEST,
                ErrorCode::RecordNotFound => StatusCode::NOT_FOUND,
                ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_details(&self) -> ErrorDetails {
        match self {
            ApiError::Core(error) => error.to_details(),
            ApiError::NotFound { .. } => ErrorDetails::new(ErrorCode::RecordNotFound, self.to_string()),
            ApiError::BadRequest { .. } => ErrorDetails::new(ErrorCode::ValidationError, self.to_string()),
            ApiError::InternalError => ErrorDetails::new(ErrorCode::InternalError, self.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            log::error!("API error: {}", self);
        } else {
            log::warn!("API request rejected: {}", self);
        }

        let body = serde_json::json!({
            "success": false,
            "error": self.to_details(),
        });
        (status, Json(body)).into_response()
    }
}

impl From<axum::extract::multipart::MultipartError> for ApiError {
    fn from(error: axum::extract::multipart::MultipartError) -> Self {
        ApiError::BadRequest {
            message: error.body_text(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::from(CoreError::RecordNotFound { id: 3 }).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(CoreError::InvalidTimeWindow).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(CoreError::UnsupportedFile { file_name: "a.csv".to_string() }).status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(ApiError::InternalError.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_details_keep_core_code() {
        let details = ApiError::from(CoreError::DateNotSelected).to_details();
        assert_eq!(details.code, ErrorCode::DateNotSelected);
        assert_eq!(details.message, "Vui lòng chọn ngày!");
    }
}
