//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Draft/input validation failures                │
//! │                                                                         │
//! │  stockroom-admin errors (app crate)                                    │
//! │  └── ApiError         - What the dashboard sees (serialized)           │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → Dashboard              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every failure is recoverable and leaves the store untouched: components
//! check everything first and only then mutate.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The stock item id does not resolve to an item in the store.
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Movement quantity is zero, negative, not a number, or would overflow.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(String),

    /// Exit would drive the system stock below zero.
    ///
    /// ## User Workflow
    /// ```text
    /// Register exit (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// InsufficientStock { code: "AL-001", available: 3, requested: 5 }
    ///      │
    ///      ▼
    /// Dashboard shows: "exit quantity exceeds current stock"
    /// ```
    #[error("Insufficient stock for {code}: available {available}, requested {requested}")]
    InsufficientStock {
        code: String,
        available: i64,
        requested: i64,
    },

    /// Another user already has this email (compared case-insensitively).
    #[error("Email already in use: {0}")]
    DuplicateEmail(String),

    /// New password and confirmation differ.
    #[error("Passwords do not match")]
    PasswordMismatch,

    /// New password is shorter than the minimum length.
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },

    /// A backup document is missing a collection or has the wrong shape.
    #[error("Invalid backup format: {0}")]
    InvalidBackupFormat(String),

    /// Update targeted a user id that is not in the store.
    #[error("User not found: {0}")]
    UserNotFound(i64),

    /// Update targeted a supplier id that is not in the store.
    #[error("Supplier not found: {0}")]
    SupplierNotFound(i64),

    /// Save was requested while no panel is open.
    #[error("No panel is open")]
    PanelClosed,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors raised before any component runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            code: "AL-001".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for AL-001: available 3, requested 5"
        );

        let err = CoreError::PasswordTooShort { min: 6 };
        assert_eq!(err.to_string(), "Password must be at least 6 characters");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "email".to_string(),
        };
        assert_eq!(err.to_string(), "email is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
