//! Dashboard data for one company.
//!
//! This module builds what the dashboard page shows:
//! - Metric cards for the latest period with month-over-month change
//! - Target-vs-actual alerts
//! - The chronological trend series
//! - Totals over every recorded month

pub mod types;

pub use types::*;

use bizpulse_shared::types::{CompanyId, format_eur};
use rust_decimal::Decimal;

use crate::alerts::alerts_for_latest;
use crate::records::MonthlyRecord;
use crate::targets::{self, Target};

/// Changes smaller than this, in percent, count as flat.
const FLAT_THRESHOLD: Decimal = Decimal::from_parts(1, 0, 0, false, 1);

/// Builds the dashboard from a company's records and targets.
#[must_use]
pub fn build_dashboard(
    company_id: CompanyId,
    records: &[MonthlyRecord],
    targets: &[Target],
) -> Dashboard {
    let mut ordered: Vec<&MonthlyRecord> = records.iter().collect();
    ordered.sort_by_key(|r| r.period);

    let trend = ordered
        .iter()
        .map(|r| TrendPoint {
            period: r.period,
            label: r.period.short_label(),
            revenue: r.figures.revenue,
            margin: r.margin,
            net_income: r.net_income,
        })
        .collect();

    let latest = ordered.last().copied();
    let previous = ordered.len().checked_sub(2).map(|i| ordered[i]);

    let cards = latest.map_or_else(Vec::new, |latest| {
        let year_targets = targets::for_year(targets, latest.period.year());
        MetricKind::ALL
            .iter()
            .filter_map(|&kind| {
                let value = kind.value_of(latest)?;
                Some(metric_card(
                    kind,
                    value,
                    previous.and_then(|p| kind.value_of(p)),
                    kind.target_of(year_targets),
                ))
            })
            .collect()
    });

    Dashboard {
        company_id,
        latest_period: latest.map(|r| r.period),
        latest_label: latest.map(|r| r.period.long_label()),
        cards,
        alerts: alerts_for_latest(records, targets),
        trend,
        totals: totals(&ordered),
    }
}

/// Sums revenue, margin and net income over the given records.
#[must_use]
pub fn totals(records: &[&MonthlyRecord]) -> DashboardTotals {
    let (revenue, margin, net_income) = records.iter().fold(
        (Decimal::ZERO, Decimal::ZERO, Decimal::ZERO),
        |(revenue, margin, net_income), r| {
            (
                revenue.saturating_add(r.figures.revenue),
                margin.saturating_add(r.margin),
                net_income.saturating_add(r.net_income),
            )
        },
    );

    DashboardTotals {
        revenue,
        margin,
        net_income,
        months_recorded: records.len(),
        revenue_display: format_eur(revenue),
        margin_display: format_eur(margin),
        net_income_display: format_eur(net_income),
    }
}

/// Builds one metric card.
#[must_use]
pub fn metric_card(
    kind: MetricKind,
    value: Decimal,
    previous: Option<Decimal>,
    target: Option<Decimal>,
) -> MetricCard {
    let change_percent = previous.and_then(|p| change_percent(value, p));
    MetricCard {
        kind,
        label: kind.label(),
        value,
        display: kind.format(value),
        previous,
        change_percent,
        trend: change_percent.map(Trend::from_change),
        target,
        target_display: target.map(|t| kind.format(t)),
        under_target: target.is_some_and(|t| value < t),
    }
}

/// Percent change from `previous` to `value`, rounded to one decimal.
///
/// `None` when the previous value is zero or the change overflows.
#[must_use]
pub fn change_percent(value: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    let change = value
        .checked_sub(previous)?
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)?;
    Some(change.round_dp(1))
}

impl Trend {
    /// Classifies a percent change.
    #[must_use]
    pub fn from_change(change: Decimal) -> Self {
        if change.abs() < FLAT_THRESHOLD {
            Self::Flat
        } else if change.is_sign_positive() {
            Self::Up
        } else {
            Self::Down
        }
    }
}
