//! Non-blocking warnings raised after a submission.

use rust_decimal::Decimal;
use serde::Serialize;

use super::calc::DerivedMetrics;

/// A warning about suspicious figures. The record is stored regardless.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Advisory {
    /// Direct costs exceed revenue.
    NegativeMargin(Decimal),
    /// Costs exceed revenue.
    NegativeNetIncome(Decimal),
}

impl Advisory {
    /// Message shown to the user.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        match self {
            Self::NegativeMargin(_) => "Il margine è negativo. Verifica i dati inseriti.",
            Self::NegativeNetIncome(_) => "L'utile netto è negativo. Verifica i costi totali.",
        }
    }
}

/// Returns the advisories for freshly computed metrics.
#[must_use]
pub fn advisories_for(metrics: &DerivedMetrics) -> Vec<Advisory> {
    let mut advisories = Vec::new();
    if metrics.margin < Decimal::ZERO {
        advisories.push(Advisory::NegativeMargin(metrics.margin));
    }
    if metrics.net_income < Decimal::ZERO {
        advisories.push(Advisory::NegativeNetIncome(metrics.net_income));
    }
    advisories
}
