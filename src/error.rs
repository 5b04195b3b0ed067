//! Error types for the library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application error codes carried in every error body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    DbFailure = 3,
    NoSuchData = 4,
    BadValue = 5,
    Referenced = 6,
    OutOfCopies = 7,
    AlreadyReturned = 8,
    InvariantViolation = 9,
}

/// Outcomes of the borrow/return rules that prevent a circulation change
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CirculationError {
    #[error("All copies of book {book_id} are currently out")]
    OutOfCopies { book_id: i32 },

    #[error("Borrow {borrow_id} was already returned")]
    AlreadyReturned { borrow_id: i32 },

    #[error("Book {book_id} has a negative copies count ({copies})")]
    NegativeCopies { book_id: i32, copies: i32 },

    #[error("Book {book_id} copies count cannot grow any further")]
    CopiesOverflow { book_id: i32 },
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error(transparent)]
    Circulation(#[from] CirculationError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl AppError {
    /// Translate constraint violations raised by the store into client errors.
    ///
    /// Anything else stays a `Database` error and is reported as a 500.
    pub fn from_store(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db) = err {
            match db.code().as_deref() {
                // foreign_key_violation
                Some("23503") => {
                    return AppError::Conflict(
                        "Record is still referenced by other records".to_string(),
                    )
                }
                // check_violation
                Some("23514") => {
                    return AppError::Validation("Value violates a table constraint".to_string())
                }
                _ => {}
            }
        }
        AppError::Database(err)
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

/// Error response body
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorResponse {
    pub code: u32,
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorCode::NoSuchData, msg.clone()),
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Conflict(msg) => (StatusCode::CONFLICT, ErrorCode::Referenced, msg.clone()),
            AppError::Circulation(err @ CirculationError::OutOfCopies { .. }) => {
                (StatusCode::CONFLICT, ErrorCode::OutOfCopies, err.to_string())
            }
            AppError::Circulation(err @ CirculationError::AlreadyReturned { .. }) => {
                (StatusCode::CONFLICT, ErrorCode::AlreadyReturned, err.to_string())
            }
            AppError::Circulation(
                err @ (CirculationError::NegativeCopies { .. }
                | CirculationError::CopiesOverflow { .. }),
            ) => {
                tracing::error!("Invariant violation: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::InvariantViolation,
                    "Internal server error".to_string(),
                )
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::Migration(e) => {
                tracing::error!("Migration error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            code: code as u32,
            error: format!("{:?}", code),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
