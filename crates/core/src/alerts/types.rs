//! Alert types.

use bizpulse_shared::types::Period;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::metrics::DerivedMetrics;
use crate::records::MonthlyRecord;

/// Which threshold was missed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// Margin below the yearly margin target.
    MarginBelowTarget,
    /// Net income below the yearly net income target.
    NetIncomeBelowTarget,
}

impl AlertKind {
    /// Label shown on the dashboard.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MarginBelowTarget => "Margine sotto target del mese",
            Self::NetIncomeBelowTarget => "Utile netto sotto target del mese",
        }
    }
}

/// Derived metrics of one period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodMetrics {
    /// Period the metrics belong to.
    pub period: Period,
    /// Margin and net income.
    pub metrics: DerivedMetrics,
}

impl From<&MonthlyRecord> for PeriodMetrics {
    fn from(record: &MonthlyRecord) -> Self {
        Self {
            period: record.period,
            metrics: record.metrics(),
        }
    }
}

/// A missed target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alert {
    /// Missed threshold.
    pub kind: AlertKind,
    /// Period evaluated.
    pub period: Period,
    /// Actual value.
    pub actual: Decimal,
    /// Target value.
    pub target: Decimal,
    /// How far below target, always positive.
    pub shortfall: Decimal,
}

impl Alert {
    /// Label shown on the dashboard.
    #[must_use]
    pub const fn message(&self) -> &'static str {
        self.kind.message()
    }
}
