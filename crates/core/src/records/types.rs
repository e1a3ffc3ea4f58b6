//! Monthly record data types.

use bizpulse_shared::types::{AmountInput, CompanyId, MonthlyRecordId, Period};
use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::metrics::DerivedMetrics;

/// Decimal places every stored amount keeps.
pub const AMOUNT_SCALE: u32 = 2;

/// Largest amount a `numeric(15, 2)` column holds: 9999999999999.99.
pub const MAX_AMOUNT: Decimal =
    Decimal::from_parts(2_764_472_319, 232_830, 0, false, AMOUNT_SCALE);

/// The four figures a user enters for a month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyFigures {
    /// Revenue.
    pub revenue: Decimal,
    /// Direct costs.
    pub direct_costs: Decimal,
    /// Total costs.
    pub total_costs: Decimal,
    /// Owner compensation.
    pub owner_compensation: Decimal,
}

/// A stored monthly record with its derived metrics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyRecord {
    /// Record ID.
    pub id: MonthlyRecordId,
    /// Owning company.
    pub company_id: CompanyId,
    /// Month and year.
    #[serde(flatten)]
    pub period: Period,
    /// Entered figures.
    #[serde(flatten)]
    pub figures: MonthlyFigures,
    /// Revenue minus direct costs.
    pub margin: Decimal,
    /// Net income under the canonical formula.
    pub net_income: Decimal,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl MonthlyRecord {
    /// Returns the stored derived metrics.
    #[must_use]
    pub const fn metrics(&self) -> DerivedMetrics {
        DerivedMetrics {
            margin: self.margin,
            net_income: self.net_income,
        }
    }
}

/// A month's figures as submitted by the entry form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthlyEntryInput {
    /// Month, 1-12.
    pub month: u32,
    /// Four-digit year.
    pub year: i32,
    /// Revenue.
    #[serde(default)]
    pub revenue: Option<AmountInput>,
    /// Direct costs.
    #[serde(default)]
    pub direct_costs: Option<AmountInput>,
    /// Total costs.
    #[serde(default)]
    pub total_costs: Option<AmountInput>,
    /// Owner compensation.
    #[serde(default)]
    pub owner_compensation: Option<AmountInput>,
}

impl MonthlyEntryInput {
    /// Validates the period and coerces the amounts.
    ///
    /// Missing or non-numeric amounts become zero.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidPeriod` for a bad month or year,
    /// `ValidationError::NegativeAmount` for negative figures and
    /// `ValidationError::AmountOutOfRange` for figures too large to store.
    pub fn validate(&self) -> Result<(Period, MonthlyFigures), ValidationError> {
        let period = Period::new(self.month, self.year)?;
        let figures = MonthlyFigures {
            revenue: required_amount(self.revenue.as_ref(), "revenue")?,
            direct_costs: required_amount(self.direct_costs.as_ref(), "direct_costs")?,
            total_costs: required_amount(self.total_costs.as_ref(), "total_costs")?,
            owner_compensation: required_amount(
                self.owner_compensation.as_ref(),
                "owner_compensation",
            )?,
        };
        Ok((period, figures))
    }
}

/// Partial edit of a record's figures. Absent fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MonthlyRecordPatch {
    /// New revenue.
    #[serde(default)]
    pub revenue: Option<AmountInput>,
    /// New direct costs.
    #[serde(default)]
    pub direct_costs: Option<AmountInput>,
    /// New total costs.
    #[serde(default)]
    pub total_costs: Option<AmountInput>,
    /// New owner compensation.
    #[serde(default)]
    pub owner_compensation: Option<AmountInput>,
}

impl MonthlyRecordPatch {
    /// Merges the patch over the stored figures.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NegativeAmount` for negative figures and
    /// `ValidationError::AmountOutOfRange` for figures too large to store.
    pub fn apply_to(&self, current: MonthlyFigures) -> Result<MonthlyFigures, ValidationError> {
        Ok(MonthlyFigures {
            revenue: patched(self.revenue.as_ref(), current.revenue, "revenue")?,
            direct_costs: patched(
                self.direct_costs.as_ref(),
                current.direct_costs,
                "direct_costs",
            )?,
            total_costs: patched(self.total_costs.as_ref(), current.total_costs, "total_costs")?,
            owner_compensation: patched(
                self.owner_compensation.as_ref(),
                current.owner_compensation,
                "owner_compensation",
            )?,
        })
    }

    /// Returns true if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.revenue.is_none()
            && self.direct_costs.is_none()
            && self.total_costs.is_none()
            && self.owner_compensation.is_none()
    }
}

/// Upsert payload keyed on (company, year, month).
#[derive(Debug, Clone)]
pub struct MonthlyRecordUpsert {
    /// Owning company.
    pub company_id: CompanyId,
    /// Period key.
    pub period: Period,
    /// Figures to store.
    pub figures: MonthlyFigures,
    /// Derived metrics computed from `figures`.
    pub metrics: DerivedMetrics,
}

/// Full replacement of a record's figures and derived metrics.
#[derive(Debug, Clone)]
pub struct MonthlyRecordUpdate {
    /// Figures to store.
    pub figures: MonthlyFigures,
    /// Derived metrics computed from `figures`.
    pub metrics: DerivedMetrics,
}

pub(crate) fn required_amount(
    input: Option<&AmountInput>,
    field: &'static str,
) -> Result<Decimal, ValidationError> {
    let value = input.map_or(Decimal::ZERO, AmountInput::coerce);
    storable_amount(value, field)
}

pub(crate) fn optional_amount(
    input: Option<&AmountInput>,
    field: &'static str,
) -> Result<Option<Decimal>, ValidationError> {
    match input {
        None => Ok(None),
        Some(AmountInput::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(value) => storable_amount(value.coerce(), field).map(Some),
    }
}

fn patched(
    input: Option<&AmountInput>,
    current: Decimal,
    field: &'static str,
) -> Result<Decimal, ValidationError> {
    match input {
        None => Ok(current),
        Some(value) => storable_amount(value.coerce(), field),
    }
}

/// Rejects negatives, rounds to cents the way the column does, and rejects
/// what the column cannot hold.
fn storable_amount(value: Decimal, field: &'static str) -> Result<Decimal, ValidationError> {
    if value < Decimal::ZERO {
        return Err(ValidationError::NegativeAmount { field });
    }
    let rounded = value.round_dp_with_strategy(AMOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero);
    if rounded > MAX_AMOUNT {
        return Err(ValidationError::AmountOutOfRange { field });
    }
    Ok(rounded)
}
