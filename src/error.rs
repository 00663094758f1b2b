//! Error types for validation, HTTP and session storage failures.

use thiserror::Error;

/// Input rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Ingredient name is required")]
    EmptyName,
    #[error("Quantity must be greater than 0")]
    NonPositiveQuantity,
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("{0} must be a valid number")]
    NotANumber(&'static str),
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: &'static str, min: String },
    #[error("{field} cannot exceed {max}")]
    AboveMaximum { field: &'static str, max: String },
    #[error("Minimum prep time cannot exceed maximum prep time")]
    InvertedPrepTimeRange,
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

/// Failure of a call against the PantryPilot REST API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {message}")]
    Transport { endpoint: String, message: String },
    #[error("{endpoint} returned HTTP {status}")]
    Status { endpoint: String, status: u16 },
    #[error("could not decode response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
    #[error("not signed in")]
    Unauthenticated,
}

impl ApiError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiError::Unauthenticated | ApiError::Status { status: 401 | 403, .. }
        )
    }
}

/// Browser storage could not be read or written.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("session storage unavailable: {0}")]
    Storage(String),
}
