//! Margin and net income calculation.

use bizpulse_shared::NetIncomeFormula;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::records::{MAX_AMOUNT, MonthlyFigures};

/// Values derived from a month's figures.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    /// Revenue minus direct costs.
    pub margin: Decimal,
    /// Residual profit.
    pub net_income: Decimal,
}

impl DerivedMetrics {
    /// Checks that both metrics fit a stored amount.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::AmountOutOfRange` naming the first metric
    /// outside the column range.
    pub fn ensure_storable(&self) -> Result<(), ValidationError> {
        if self.margin.abs() > MAX_AMOUNT {
            return Err(ValidationError::AmountOutOfRange { field: "margin" });
        }
        if self.net_income.abs() > MAX_AMOUNT {
            return Err(ValidationError::AmountOutOfRange {
                field: "net_income",
            });
        }
        Ok(())
    }
}

/// Computes margin and net income the way the entry form does.
///
/// margin = revenue - direct costs, net income = revenue - total costs.
/// Negative inputs are accepted; callers enforce non-negative figures.
/// Results saturate at the `Decimal` bounds instead of overflowing.
#[must_use]
pub fn compute_derived_metrics(figures: &MonthlyFigures) -> DerivedMetrics {
    MetricsCalculator::new(NetIncomeFormula::RevenueLessTotalCosts).compute(figures)
}

/// Applies one net income formula to every write path.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsCalculator {
    formula: NetIncomeFormula,
}

impl MetricsCalculator {
    /// Creates a calculator for the given formula.
    #[must_use]
    pub const fn new(formula: NetIncomeFormula) -> Self {
        Self { formula }
    }

    /// Returns the configured formula.
    #[must_use]
    pub const fn formula(&self) -> NetIncomeFormula {
        self.formula
    }

    /// Computes derived metrics for a month.
    #[must_use]
    pub fn compute(&self, figures: &MonthlyFigures) -> DerivedMetrics {
        let margin = figures.revenue.saturating_sub(figures.direct_costs);
        let net_income = match self.formula {
            NetIncomeFormula::RevenueLessTotalCosts => {
                figures.revenue.saturating_sub(figures.total_costs)
            }
            NetIncomeFormula::MarginLessOwnerCompensation => {
                margin.saturating_sub(figures.owner_compensation)
            }
        };

        if tracing::enabled!(tracing::Level::DEBUG) && !formulas_agree(figures) {
            tracing::debug!(
                formula = ?self.formula,
                %net_income,
                "net income formulas disagree: total costs != direct costs + owner compensation"
            );
        }

        DerivedMetrics { margin, net_income }
    }
}

/// The two net income formulas give the same result only when total costs
/// equal direct costs plus owner compensation.
#[must_use]
pub fn formulas_agree(figures: &MonthlyFigures) -> bool {
    figures
        .direct_costs
        .checked_add(figures.owner_compensation)
        .is_some_and(|sum| sum == figures.total_costs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn figures() -> MonthlyFigures {
        MonthlyFigures {
            revenue: dec!(45000),
            direct_costs: dec!(18000),
            total_costs: dec!(30000),
            owner_compensation: dec!(4000),
        }
    }

    #[test]
    fn test_primary_formula() {
        let metrics = compute_derived_metrics(&figures());

        assert_eq!(metrics.margin, dec!(27000));
        assert_eq!(metrics.net_income, dec!(15000));
    }

    #[test]
    fn test_edit_path_formula() {
        let metrics =
            MetricsCalculator::new(NetIncomeFormula::MarginLessOwnerCompensation).compute(&figures());

        assert_eq!(metrics.margin, dec!(27000));
        assert_eq!(metrics.net_income, dec!(23000));
    }

    #[test]
    fn test_negative_inputs_are_computed_not_rejected() {
        let metrics = compute_derived_metrics(&MonthlyFigures {
            revenue: dec!(-100),
            direct_costs: dec!(50),
            total_costs: dec!(-20),
            owner_compensation: Decimal::ZERO,
        });

        assert_eq!(metrics.margin, dec!(-150));
        assert_eq!(metrics.net_income, dec!(-80));
    }

    #[test]
    fn test_formulas_agree_when_total_costs_add_up() {
        let mut f = figures();
        assert!(!formulas_agree(&f));

        f.total_costs = f.direct_costs + f.owner_compensation;
        assert!(formulas_agree(&f));
        assert_eq!(
            MetricsCalculator::new(NetIncomeFormula::RevenueLessTotalCosts).compute(&f),
            MetricsCalculator::new(NetIncomeFormula::MarginLessOwnerCompensation).compute(&f),
        );
    }

    #[test]
    fn test_extreme_inputs_do_not_overflow() {
        let f = MonthlyFigures {
            revenue: Decimal::MAX,
            direct_costs: Decimal::MIN,
            total_costs: Decimal::MIN,
            owner_compensation: Decimal::MAX,
        };

        assert!(!formulas_agree(&f));
        let metrics =
            MetricsCalculator::new(NetIncomeFormula::MarginLessOwnerCompensation).compute(&f);
        assert_eq!(metrics.margin, Decimal::MAX);
        assert_eq!(metrics.net_income, Decimal::ZERO);
    }

    #[test]
    fn test_metrics_beyond_column_are_not_storable() {
        let ok = DerivedMetrics {
            margin: MAX_AMOUNT,
            net_income: -MAX_AMOUNT,
        };
        assert_eq!(ok.ensure_storable(), Ok(()));

        let too_low = DerivedMetrics {
            margin: Decimal::ZERO,
            net_income: -MAX_AMOUNT - dec!(0.01),
        };
        assert_eq!(
            too_low.ensure_storable(),
            Err(ValidationError::AmountOutOfRange {
                field: "net_income"
            })
        );
    }
}
