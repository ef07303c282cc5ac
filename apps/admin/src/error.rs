//! # API Error Type
//!
//! Unified error type for admin commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Stockroom                              │
//! │                                                                         │
//! │  Dashboard                   Rust Backend                               │
//! │  ─────────                   ────────────                               │
//! │                                                                         │
//! │  invoke('register_exit')                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Rule broken? ─── CoreError::InsufficientStock ───┐             │  │
//! │  │         │                                          │             │  │
//! │  │         ▼                                          ▼             │  │
//! │  │  File I/O failed? ─── std::io::Error ────────── ApiError ──────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  catch (e) {                                                            │
//! │    // e.code = "INSUFFICIENT_STOCK"                                     │
//! │    // e.message = "Insufficient stock for AL-001: available 3, ..."     │
//! │  }                                                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use stockroom_core::CoreError;

/// Error returned from admin commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "DUPLICATE_EMAIL",
///   "message": "Email already in use: ana@example.com"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Item, user or supplier not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Quantity not a positive number
    InvalidQuantity,

    /// Exit larger than stock on hand
    InsufficientStock,

    /// Email taken by another user
    DuplicateEmail,

    /// Password change rejected
    PasswordRejected,

    /// Backup document unusable
    InvalidBackup,

    /// Panel or confirmation in the wrong state
    InvalidState,

    /// Backup file could not be read or written
    IoError,

    /// Internal error
    Internal,
}

impl ApiError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{resource} not found: {id}"))
    }

    pub fn invalid_state(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidState, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        let code = match &err {
            CoreError::ItemNotFound(_)
            | CoreError::UserNotFound(_)
            | CoreError::SupplierNotFound(_) => ErrorCode::NotFound,
            CoreError::InvalidQuantity(_) => ErrorCode::InvalidQuantity,
            CoreError::InsufficientStock { .. } => ErrorCode::InsufficientStock,
            CoreError::DuplicateEmail(_) => ErrorCode::DuplicateEmail,
            CoreError::PasswordMismatch | CoreError::PasswordTooShort { .. } => {
                ErrorCode::PasswordRejected
            }
            CoreError::InvalidBackupFormat(_) => ErrorCode::InvalidBackup,
            CoreError::PanelClosed => ErrorCode::InvalidState,
            CoreError::Validation(_) => ErrorCode::ValidationError,
        };
        ApiError::new(code, err.to_string())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("Backup file I/O failed: {}", err);
        ApiError::new(ErrorCode::IoError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}
