//! Target-vs-actual alerts for the most recent period with data.
//!
//! Alerts are advisory: they are recomputed on every request and never
//! stored. A threshold that was never set cannot raise an alert.

mod types;


pub use types::{Alert, AlertKind, PeriodMetrics};

use rust_decimal::Decimal;

use crate::records::{self, MonthlyRecord};
use crate::targets::{self, Target};

/// Computes the alerts for one period against that year's targets.
#[must_use]
pub fn compute_alerts(current: &PeriodMetrics, targets: Option<&Target>) -> Vec<Alert> {
    let Some(targets) = targets else {
        return Vec::new();
    };

    let checks = [
        (
            AlertKind::MarginBelowTarget,
            current.metrics.margin,
            targets.target_margin,
        ),
        (
            AlertKind::NetIncomeBelowTarget,
            current.metrics.net_income,
            targets.target_net_income,
        ),
    ];

    checks
        .into_iter()
        .filter_map(|(kind, actual, target)| {
            let target = target?;
            (actual < target).then(|| Alert {
                kind,
                period: current.period,
                actual,
                target,
                shortfall: target.checked_sub(actual).unwrap_or(Decimal::MAX),
            })
        })
        .collect()
}

/// Computes the alerts for the latest record, using the targets of its year.
///
/// Returns no alerts when the company has no records.
#[must_use]
pub fn alerts_for_latest(records: &[MonthlyRecord], targets: &[Target]) -> Vec<Alert> {
    let Some(latest) = records::latest(records) else {
        return Vec::new();
    };
    let current = PeriodMetrics::from(latest);
    compute_alerts(&current, targets::for_year(targets, current.period.year()))
}
