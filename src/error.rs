use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{error, warn};
use uuid::Uuid;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Error codes for categorizing errors
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ErrorCode {
    // Authentication errors (1xxx)
    #[serde(rename = "AUTH_1002")]
    TokenExpired,
    #[serde(rename = "AUTH_1003")]
    TokenInvalid,
    #[serde(rename = "AUTH_1004")]
    TokenMissing,

    // Authorization errors (2xxx)
    #[serde(rename = "AUTHZ_2003")]
    RoleNotAuthorized,
    #[serde(rename = "AUTHZ_2004")]
    AccountRequired,

    // Validation errors (3xxx)
    #[serde(rename = "VAL_3001")]
    InvalidInput,
    #[serde(rename = "VAL_3003")]
    InvalidFormat,
    #[serde(rename = "VAL_3009")]
    PathDataMismatch,

    // Resource errors (4xxx)
    #[serde(rename = "RES_4001")]
    NotFound,

    // Business logic errors (5xxx)
    #[serde(rename = "BIZ_5101")]
    RegistrationHistorical,
    #[serde(rename = "BIZ_5102")]
    DebtorNameMismatch,

    // Database errors (7xxx)
    #[serde(rename = "DB_7002")]
    QueryFailed,
    #[serde(rename = "DB_7003")]
    DatabaseTransactionFailed,

    // Internal errors (9xxx)
    #[serde(rename = "INT_9999")]
    InternalServerError,
    #[serde(rename = "INT_9998")]
    ConfigurationError,
}

impl ErrorCode {
    /// Get numeric code
    pub fn code(&self) -> u16 {
        match self {
            ErrorCode::TokenExpired => 1002,
            ErrorCode::TokenInvalid => 1003,
            ErrorCode::TokenMissing => 1004,

            ErrorCode::RoleNotAuthorized => 2003,
            ErrorCode::AccountRequired => 2004,

            ErrorCode::InvalidInput => 3001,
            ErrorCode::InvalidFormat => 3003,
            ErrorCode::PathDataMismatch => 3009,

            ErrorCode::NotFound => 4001,

            ErrorCode::RegistrationHistorical => 5101,
            ErrorCode::DebtorNameMismatch => 5102,

            ErrorCode::QueryFailed => 7002,
            ErrorCode::DatabaseTransactionFailed => 7003,

            ErrorCode::InternalServerError => 9999,
            ErrorCode::ConfigurationError => 9998,
        }
    }

    /// Get user-friendly message
    pub fn message(&self) -> &'static str {
        match self {
            ErrorCode::TokenExpired => "Your session has expired. Please log in again",
            ErrorCode::TokenInvalid => "Invalid authentication token",
            ErrorCode::TokenMissing => "Authentication required. Please log in",

            ErrorCode::RoleNotAuthorized => "Your role is not authorized for this action",
            ErrorCode::AccountRequired => "Account-Id header required",

            ErrorCode::InvalidInput => "Invalid input provided",
            ErrorCode::InvalidFormat => "Invalid format provided",
            ErrorCode::PathDataMismatch => "Request path and payload data do not match",

            ErrorCode::NotFound => "The requested resource was not found",

            ErrorCode::RegistrationHistorical => "The registration is no longer active",
            ErrorCode::DebtorNameMismatch => {
                "The debtor name does not match the base registration"
            }

            ErrorCode::QueryFailed => "Database query failed",
            ErrorCode::DatabaseTransactionFailed => "Database transaction failed",

            ErrorCode::InternalServerError => "An internal server error occurred",
            ErrorCode::ConfigurationError => "Server configuration error",
        }
    }

    /// HTTP status carried by errors built from this code
    pub fn status(&self) -> StatusCode {
        match self {
            ErrorCode::TokenExpired
            | ErrorCode::TokenInvalid
            | ErrorCode::TokenMissing
            | ErrorCode::RoleNotAuthorized => StatusCode::UNAUTHORIZED,

            ErrorCode::AccountRequired
            | ErrorCode::InvalidInput
            | ErrorCode::InvalidFormat
            | ErrorCode::PathDataMismatch
            | ErrorCode::RegistrationHistorical
            | ErrorCode::DebtorNameMismatch => StatusCode::BAD_REQUEST,

            ErrorCode::NotFound => StatusCode::NOT_FOUND,

            ErrorCode::QueryFailed
            | ErrorCode::DatabaseTransactionFailed
            | ErrorCode::InternalServerError
            | ErrorCode::ConfigurationError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Structured error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
    pub request_id: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: ErrorCode,
    pub code_number: u16,
    pub message: String,
    pub details: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),

    // Enhanced error types with codes
    #[error("{1}")]
    WithCode(ErrorCode, String),

    #[error("{1}")]
    WithCodeAndDetails(ErrorCode, String, String),
}

impl ApiError {
    /// Create error with specific error code
    pub fn with_code(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError::WithCode(code, message.into())
    }

    /// Create error with code and additional details
    pub fn with_details(
        code: ErrorCode,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        ApiError::WithCodeAndDetails(code, message.into(), details.into())
    }

    /// Collapse a list of schema failures into one 400 response
    pub fn validation_errors(errors: Vec<String>) -> Self {
        ApiError::with_details(
            ErrorCode::InvalidInput,
            "Request payload failed validation",
            errors.join("; "),
        )
    }

    /// Helper: Registration not found
    pub fn registration_not_found(registration_num: &str) -> Self {
        ApiError::with_code(
            ErrorCode::NotFound,
            format!("No registration found for registration number {}", registration_num),
        )
    }

    /// Helper: Registration already discharged
    pub fn registration_historical(registration_num: &str) -> Self {
        ApiError::with_code(
            ErrorCode::RegistrationHistorical,
            format!(
                "The registration {} has been discharged and is no longer active",
                registration_num
            ),
        )
    }

    /// Helper: Non-staff request without an Account-Id header
    pub fn account_required() -> Self {
        ApiError::with_code(
            ErrorCode::AccountRequired,
            "Account-Id header required for non-staff requests",
        )
    }

    /// Helper: Caller's roles do not grant the requested action
    pub fn role_not_authorized(account_id: Option<&str>) -> Self {
        ApiError::with_code(
            ErrorCode::RoleNotAuthorized,
            format!(
                "Authorization failure submitting a request for account {}",
                account_id.unwrap_or("(none)")
            ),
        )
    }

    /// Get error code
    pub fn error_code(&self) -> ErrorCode {
        match self {
            ApiError::Unauthorized(_) => ErrorCode::TokenMissing,
            ApiError::Database(_) => ErrorCode::QueryFailed,
            ApiError::Internal(_) => ErrorCode::InternalServerError,
            ApiError::WithCode(code, _) => *code,
            ApiError::WithCodeAndDetails(code, _, _) => *code,
        }
    }

    /// Get error details
    fn error_details(&self) -> Option<String> {
        match self {
            ApiError::WithCodeAndDetails(_, _, details) => Some(details.clone()),
            _ => None,
        }
    }

    /// Get status code
    pub fn status_code(&self) -> StatusCode {
        self.error_code().status()
    }

    /// Log error with appropriate level
    fn log_error(&self, request_id: &str) {
        match self.status_code() {
            status if status.is_server_error() => {
                error!(
                    request_id = %request_id,
                    error = %self,
                    "Server error occurred"
                );
            }
            status if status.is_client_error() => {
                warn!(
                    request_id = %request_id,
                    error = %self,
                    "Client error occurred"
                );
            }
            _ => {}
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let status = self.status_code();
        let code = self.error_code();

        self.log_error(&request_id);

        let error_response = ErrorResponse {
            error: ErrorDetail {
                code,
                code_number: code.code(),
                message: match &self {
                    ApiError::WithCode(_, msg) | ApiError::WithCodeAndDetails(_, msg, _) => {
                        msg.clone()
                    }
                    _ => code.message().to_string(),
                },
                details: self.error_details(),
            },
            request_id,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        (status, Json(error_response)).into_response()
    }
}

/// Axum JSON rejections become structured 400 responses
impl From<JsonRejection> for ApiError {
    fn from(err: JsonRejection) -> Self {
        match err {
            JsonRejection::JsonDataError(e) => ApiError::with_details(
                ErrorCode::InvalidInput,
                "Invalid input provided",
                e.body_text(),
            ),
            JsonRejection::JsonSyntaxError(_) => {
                ApiError::with_code(ErrorCode::InvalidFormat, "Invalid JSON format")
            }
            JsonRejection::MissingJsonContentType(_) => {
                ApiError::with_code(ErrorCode::InvalidFormat, "JSON content type required")
            }
            JsonRejection::BytesRejection(_) => {
                ApiError::with_code(ErrorCode::InvalidInput, "Invalid request body format")
            }
            _ => ApiError::with_details(
                ErrorCode::InvalidInput,
                "Invalid input provided",
                format!("{:?}", err),
            ),
        }
    }
}
