//! Target data types.

use bizpulse_shared::types::{AmountInput, CompanyId, Period, TargetId};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::records::types::optional_amount;

/// Per-year thresholds for a company.
///
/// Each threshold is optional; an absent threshold never raises an alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Target {
    /// Target ID.
    pub id: TargetId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Year the thresholds apply to.
    pub year: i32,
    /// Monthly revenue target.
    pub target_revenue: Option<Decimal>,
    /// Monthly margin target.
    pub target_margin: Option<Decimal>,
    /// Monthly net income target.
    pub target_net_income: Option<Decimal>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Targets as submitted by the form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TargetInput {
    /// Four-digit year.
    pub year: i32,
    /// Revenue threshold.
    #[serde(default)]
    pub target_revenue: Option<AmountInput>,
    /// Margin threshold.
    #[serde(default)]
    pub target_margin: Option<AmountInput>,
    /// Net income threshold.
    #[serde(default)]
    pub target_net_income: Option<AmountInput>,
}

impl TargetInput {
    /// Validates the year and thresholds for a company.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPeriod` for a bad year and
    /// `ValidationError::NegativeAmount` for negative thresholds.
    pub fn validate(&self, company_id: CompanyId) -> Result<TargetUpsert, ValidationError> {
        // Any month works; only the year is checked.
        Period::new(1, self.year)?;

        Ok(TargetUpsert {
            company_id,
            year: self.year,
            target_revenue: optional_amount(self.target_revenue.as_ref(), "target_revenue")?,
            target_margin: optional_amount(self.target_margin.as_ref(), "target_margin")?,
            target_net_income: optional_amount(
                self.target_net_income.as_ref(),
                "target_net_income",
            )?,
        })
    }
}

/// Upsert payload keyed on (company, year).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetUpsert {
    /// Owning company.
    pub company_id: CompanyId,
    /// Year key.
    pub year: i32,
    /// Revenue threshold.
    pub target_revenue: Option<Decimal>,
    /// Margin threshold.
    pub target_margin: Option<Decimal>,
    /// Net income threshold.
    pub target_net_income: Option<Decimal>,
}
