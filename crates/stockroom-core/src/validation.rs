//! # Validation Module
//!
//! Input checks shared by the movement processor, the directory manager and
//! the panel drafts.
//!
//! ## Validation Layers
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Layer 1: Dashboard form                                               │
//! │  ├── required inputs, input types                                      │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Panel draft save (panel.rs)                                  │
//! │  └── validate_required on the draft's fields                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Components (THIS MODULE's numeric/password rules)            │
//! │  ├── validate_quantity / parse_quantity                                │
//! │  └── validate_password_change                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::{MAX_SEARCH_QUERY_LEN, MIN_PASSWORD_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Rejects blank values for a required draft field.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_required;
///
/// assert!(validate_required("name", "Ana").is_ok());
/// assert!(validate_required("name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a catalog search query and returns it trimmed.
///
/// Empty is allowed (it matches nothing).
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a movement quantity.
///
/// ## Rules
/// - Must be a positive integer (> 0)
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_quantity;
///
/// assert!(validate_quantity(10).is_ok());
/// assert!(validate_quantity(0).is_err());
/// ```
pub fn validate_quantity(qty: i64) -> CoreResult<()> {
    if qty <= 0 {
        return Err(CoreError::InvalidQuantity(format!(
            "quantity must be positive, got {qty}"
        )));
    }

    Ok(())
}

/// Parses the quantity text typed into a movement form.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::parse_quantity;
///
/// assert_eq!(parse_quantity(" 12 ").unwrap(), 12);
/// assert!(parse_quantity("twelve").is_err());
/// assert!(parse_quantity("-3").is_err());
/// ```
pub fn parse_quantity(input: &str) -> CoreResult<i64> {
    let input = input.trim();
    let qty: i64 = input
        .parse()
        .map_err(|_| CoreError::InvalidQuantity(format!("'{input}' is not a whole number")))?;
    validate_quantity(qty)?;
    Ok(qty)
}

// =============================================================================
// Password Rules
// =============================================================================

/// Checks a password change request.
///
/// Mismatch is reported before length, so a short mistyped confirmation
/// reads as a mismatch.
pub fn validate_password_change(new_password: &str, confirm_password: &str) -> CoreResult<()> {
    if new_password != confirm_password {
        return Err(CoreError::PasswordMismatch);
    }

    if new_password.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
