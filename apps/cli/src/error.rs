//! # Application Error Type
//!
//! Unified error type returned by every command.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ValidationError ──► CoreError ──┐                                      │
//! │  DbError ────────────────────────┼──► AppError { code, message }        │
//! │  ConfigError ────────────────────┤          │                           │
//! │  wrong admin password ───────────┘          ▼                           │
//! │                                   stderr: "[UNAUTHORIZED] Incorrect..." │
//! │                                   --json: {"code":"UNAUTHORIZED",...}   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Distance lookup failures never show up here; they are part of a
//! successful quote.

use serde::Serialize;
use std::fmt;

use buildmart_core::{CoreError, ValidationError};
use buildmart_db::DbError;
use buildmart_maps::DistanceError;

use crate::config::ConfigError;

/// Error returned from commands.
///
/// ```json
/// { "code": "NOT_FOUND", "message": "Product not found: cement-9" }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AppError {
    /// Machine-readable error code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,
}

/// Error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Unknown product or vehicle id
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Override store failed
    DatabaseError,

    /// A rule of the quote flow was not met
    BusinessLogic,

    /// Wrong admin password
    Unauthorized,

    /// Configuration could not be loaded
    ConfigError,

    /// Anything else
    Internal,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let code = match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::DatabaseError => "DATABASE_ERROR",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::Unauthorized => "UNAUTHORIZED",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        };
        f.write_str(code)
    }
}

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: &str) -> Self {
        AppError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn unauthorized() -> Self {
        AppError::new(ErrorCode::Unauthorized, "Incorrect password")
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }
}

impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                AppError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            other => {
                tracing::error!("Database error: {}", other);
                AppError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => AppError::not_found("Product", &id),
            CoreError::VehicleNotFound(id) => AppError::not_found("Vehicle", &id),
            CoreError::NoVehicleTiers
            | CoreError::DistanceNotResolved
            | CoreError::AmountOverflow => {
                AppError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::Validation(e) => AppError::validation(e.to_string()),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

/// Only raised when the HTTP client cannot be built at all.
impl From<DistanceError> for AppError {
    fn from(err: DistanceError) -> Self {
        AppError::internal(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::internal(format!("Failed to encode output: {}", err))
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {}
