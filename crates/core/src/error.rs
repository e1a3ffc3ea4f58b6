//! Errors raised by the business data service.
//!
//! Validation failures are caught before any record-store call. Store
//! failures propagate unchanged. Both convert into `AppError` at the outer
//! surface.

use bizpulse_shared::AppError;
use bizpulse_shared::types::{CompanyId, PeriodError};
use thiserror::Error;

use crate::store::StoreError;

/// Result type for business operations.
pub type BusinessResult<T> = Result<T, BusinessError>;

/// Input rejected before reaching the record store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Company name is empty after trimming.
    #[error("Company name is required")]
    EmptyCompanyName,

    /// A company-scoped operation ran without a selected company.
    #[error("Select a company before saving data")]
    NoCompanySelected,

    /// Month or year out of range.
    #[error(transparent)]
    InvalidPeriod(#[from] PeriodError),

    /// A monetary field was negative.
    #[error("{field} must not be negative")]
    NegativeAmount {
        /// Offending field.
        field: &'static str,
    },

    /// A monetary field does not fit a stored amount (15 digits, 2 decimals).
    #[error("{field} is too large")]
    AmountOutOfRange {
        /// Offending field.
        field: &'static str,
    },
}

/// Errors returned by business operations.
#[derive(Debug, Error)]
pub enum BusinessError {
    /// Input validation failed.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Record store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// No signed-in user.
    #[error("Not signed in")]
    Unauthenticated,

    /// Company missing or owned by another user.
    #[error("Company not found: {0}")]
    CompanyNotFound(CompanyId),
}

impl BusinessError {
    /// Returns true for failures the user can fix by changing the input.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<BusinessError> for AppError {
    fn from(err: BusinessError) -> Self {
        match err {
            BusinessError::Validation(e) => Self::Validation(e.to_string()),
            BusinessError::Unauthenticated => Self::Unauthorized("Not signed in".to_string()),
            BusinessError::CompanyNotFound(_) => Self::NotFound("Company not found".to_string()),
            BusinessError::Store(StoreError::NotFound { collection, .. }) => {
                Self::NotFound(format!("No matching record in {collection}"))
            }
            BusinessError::Store(StoreError::Conflict { message, .. }) => Self::Conflict(message),
            BusinessError::Store(e) => Self::Store(e.to_string()),
        }
    }
}
