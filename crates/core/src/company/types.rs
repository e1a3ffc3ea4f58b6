//! Company data types.

use bizpulse_shared::types::{AmountInput, CompanyId, UserId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::records::types::required_amount;

/// A company owned by a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    /// Company ID.
    pub id: CompanyId,
    /// Display name.
    pub name: String,
    /// Optional description.
    pub description: Option<String>,
    /// Share capital, never negative.
    pub share_capital: Decimal,
    /// Owning user.
    pub user_id: UserId,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Company fields as submitted by the create/edit form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CompanyInput {
    /// Name, trimmed before use.
    pub name: String,
    /// Optional description; blank means none.
    #[serde(default)]
    pub description: Option<String>,
    /// Share capital; defaults to zero.
    #[serde(default)]
    pub share_capital: Option<AmountInput>,
}

impl CompanyInput {
    /// Creates input with just a name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Validates and normalizes the input.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyCompanyName` when the trimmed name is
    /// empty, `ValidationError::NegativeAmount` for negative share capital
    /// and `ValidationError::AmountOutOfRange` when it is too large to store.
    pub fn validate(&self) -> Result<CompanyChanges, ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyCompanyName);
        }

        let description = self
            .description
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(ToString::to_string);

        let share_capital = required_amount(self.share_capital.as_ref(), "share_capital")?;

        Ok(CompanyChanges {
            name: name.to_string(),
            description,
            share_capital,
        })
    }
}

/// Validated company fields, used for both insert and update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanyChanges {
    /// Trimmed, non-empty name.
    pub name: String,
    /// Trimmed description.
    pub description: Option<String>,
    /// Non-negative share capital.
    pub share_capital: Decimal,
}

/// Insert payload for the companies collection.
#[derive(Debug, Clone)]
pub struct NewCompany {
    /// Owning user.
    pub user_id: UserId,
    /// Validated fields.
    pub fields: CompanyChanges,
}
