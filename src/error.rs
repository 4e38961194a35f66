//! Error types for the Cabana booking server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::promo::PromoRejection;

/// Application error codes surfaced to API clients
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum ErrorCode {
    Success = 0,
    Failure = 1,
    NotAuthorized = 2,
    DbFailure = 3,
    NoSuchBooking = 4,
    NoSuchCabin = 5,
    BadValue = 6,
    DatesUnavailable = 7,
    PromoRejected = 8,
    ConcurrentUpdate = 9,
    InvalidTransition = 10,
}

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Authorization failed: {0}")]
    Authorization(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Requested nights overlap an existing non-cancelled booking.
    #[error("Dates unavailable for cabin {cabin_id}: {check_in} to {check_out}")]
    DateConflict {
        cabin_id: i32,
        check_in: chrono::NaiveDate,
        check_out: chrono::NaiveDate,
    },

    #[error("Promo code rejected: {0}")]
    Promo(PromoRejection),

    /// Lost a race against a concurrent writer (overlapping booking insert
    /// or promo usage cap). Distinct from Database so the client can say
    /// "someone just booked these dates" instead of "server error".
    #[error("Concurrent update conflict: {0}")]
    ConcurrencyConflict(String),

    /// State-machine transition not allowed from the current state.
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Internal server error: {0}")]
    Internal(String),
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
            AppError::Authentication(msg) => {
                (StatusCode::UNAUTHORIZED, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::Authorization(msg) => {
                (StatusCode::FORBIDDEN, ErrorCode::NotAuthorized, msg.clone())
            }
            AppError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ErrorCode::NoSuchBooking, msg.clone())
            }
            AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, ErrorCode::BadValue, msg.clone())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::DbFailure,
                    "Database error".to_string(),
                )
            }
            AppError::DateConflict { .. } => {
                (StatusCode::CONFLICT, ErrorCode::DatesUnavailable, self.to_string())
            }
            AppError::Promo(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::PromoRejected,
                rejection.to_string(),
            ),
            AppError::ConcurrencyConflict(msg) => {
                (StatusCode::CONFLICT, ErrorCode::ConcurrentUpdate, msg.clone())
            }
            AppError::InvalidTransition(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorCode::InvalidTransition,
                msg.clone(),
            ),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorCode::Failure,
                    "Internal server error".to_string(),
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
