use std::collections::BTreeMap;

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use convert_case::{Case, Casing};
use sea_orm::{DbErr, SqlErr, TransactionError};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

/// Field name (as it appears on the wire) to message
pub type FieldErrors = BTreeMap<String, String>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed: {0:?}")]
    Validation(FieldErrors),

    /// A record points at another record that does not exist
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Database error: {0}")]
    Database(DbErr),
}

impl AppError {
    /// Single-field validation failure
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::Validation(BTreeMap::from([(field.into(), message.into())]))
    }
}

/// Error response body
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: &'static str,
    pub message: ErrorMessage,
    /// Filled in by `middleware::error_path_layer`
    pub path: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    Text(String),
    Fields(FieldErrors),
}

const GENERIC_MESSAGE: &str = "An unexpected error occurred";

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::NotFound(msg) => {
                tracing::debug!("Resource not found: {}", msg);
                (StatusCode::NOT_FOUND, "Resource Not Found", ErrorMessage::Text(msg))
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad Request", ErrorMessage::Text(msg))
            }
            AppError::Validation(fields) => {
                (StatusCode::BAD_REQUEST, "Validation Failed", ErrorMessage::Fields(fields))
            }
            AppError::InvalidReference(msg) => {
                (StatusCode::BAD_REQUEST, "Invalid Input", ErrorMessage::Text(msg))
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "Conflict", ErrorMessage::Text(msg)),
            AppError::MethodNotAllowed(msg) => (
                StatusCode::METHOD_NOT_ALLOWED,
                "Method Not Allowed",
                ErrorMessage::Text(msg),
            ),
            AppError::Database(err) => {
                tracing::error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error",
                    ErrorMessage::Text(GENERIC_MESSAGE.to_string()),
                )
            }
        };

        let body = ErrorBody {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error,
            message,
            path: String::new(),
        };

        let mut response = (status, Json(body.clone())).into_response();
        response.extensions_mut().insert(body);
        response
    }
}

/// Result type alias for application
pub type AppResult<T> = Result<T, AppError>;

/// Helper trait for converting Option to AppError::NotFound
pub trait OptionExt<T> {
    fn ok_or_not_found(self, msg: impl Into<String>) -> AppResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self, msg: impl Into<String>) -> AppResult<T> {
        self.ok_or_else(|| AppError::NotFound(msg.into()))
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(violation) => AppError::from_violation(violation, err),
            None => AppError::Database(err),
        }
    }
}

impl AppError {
    /// Unique and foreign key violations become client errors; the constraint
    /// detail is only logged
    fn from_violation(violation: SqlErr, err: DbErr) -> Self {
        match violation {
            SqlErr::UniqueConstraintViolation(detail) => {
                tracing::debug!("Unique constraint violation: {}", detail);
                AppError::Conflict("A record with the same unique value already exists".to_string())
            }
            SqlErr::ForeignKeyConstraintViolation(detail) => {
                tracing::debug!("Foreign key violation: {}", detail);
                AppError::InvalidReference("Referenced department does not exist".to_string())
            }
            #[allow(unreachable_patterns)]
            _ => AppError::Database(err),
        }
    }
}

impl From<TransactionError<AppError>> for AppError {
    fn from(err: TransactionError<AppError>) -> Self {
        match err {
            TransactionError::Connection(db_err) => AppError::from(db_err),
            TransactionError::Transaction(app_err) => app_err,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let message = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                (field.to_case(Case::Camel), message)
            })
            .collect();
        AppError::Validation(fields)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
