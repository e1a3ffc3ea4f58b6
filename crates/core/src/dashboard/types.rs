//! Dashboard data types.

use bizpulse_shared::types::{CompanyId, Period, format_eur};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::alerts::Alert;
use crate::records::MonthlyRecord;
use crate::targets::Target;

/// Dashboard response.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    /// Company shown.
    pub company_id: CompanyId,
    /// Latest period with data.
    pub latest_period: Option<Period>,
    /// Latest period as "Giugno 2024".
    pub latest_label: Option<String>,
    /// Revenue, margin, net income and margin percent cards.
    pub cards: Vec<MetricCard>,
    /// Missed targets for the latest period.
    pub alerts: Vec<Alert>,
    /// One point per record, oldest first.
    pub trend: Vec<TrendPoint>,
    /// Sums over every recorded month.
    pub totals: DashboardTotals,
}

/// Sums over every recorded month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardTotals {
    /// Total revenue.
    pub revenue: Decimal,
    /// Total margin.
    pub margin: Decimal,
    /// Total net income.
    pub net_income: Decimal,
    /// Number of months with data.
    pub months_recorded: usize,
    /// Total revenue as "320.000 €".
    pub revenue_display: String,
    /// Total margin as "192.000 €".
    pub margin_display: String,
    /// Total net income as "116.000 €".
    pub net_income_display: String,
}

/// Metric shown on a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Revenue.
    Revenue,
    /// Margin.
    Margin,
    /// Net income.
    NetIncome,
    /// Margin as a share of revenue, in percent.
    MarginPercent,
}

/// Fixed margin percent threshold.
pub const MARGIN_PERCENT_TARGET: Decimal = Decimal::from_parts(60, 0, 0, false, 0);

impl MetricKind {
    /// Cards in display order.
    pub const ALL: [Self; 4] = [
        Self::Revenue,
        Self::Margin,
        Self::NetIncome,
        Self::MarginPercent,
    ];

    /// Card title.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Revenue => "Ricavi",
            Self::Margin => "Margine",
            Self::NetIncome => "Utile Netto",
            Self::MarginPercent => "Margine %",
        }
    }

    /// Reads the metric from a record.
    ///
    /// Margin percent is `None` when the record has no revenue.
    #[must_use]
    pub fn value_of(self, record: &MonthlyRecord) -> Option<Decimal> {
        match self {
            Self::Revenue => Some(record.figures.revenue),
            Self::Margin => Some(record.margin),
            Self::NetIncome => Some(record.net_income),
            Self::MarginPercent => margin_percent(record.margin, record.figures.revenue),
        }
    }

    /// Reads the matching threshold from a year's targets.
    ///
    /// Margin percent always has the fixed threshold.
    #[must_use]
    pub fn target_of(self, target: Option<&Target>) -> Option<Decimal> {
        match self {
            Self::Revenue => target.and_then(|t| t.target_revenue),
            Self::Margin => target.and_then(|t| t.target_margin),
            Self::NetIncome => target.and_then(|t| t.target_net_income),
            Self::MarginPercent => Some(MARGIN_PERCENT_TARGET),
        }
    }

    /// Formats a value of this metric for display.
    #[must_use]
    pub fn format(self, value: Decimal) -> String {
        match self {
            Self::MarginPercent => format_percent(value),
            Self::Revenue | Self::Margin | Self::NetIncome => format_eur(value),
        }
    }
}

/// Margin over revenue in percent, two decimals. `None` for zero revenue.
#[must_use]
pub fn margin_percent(margin: Decimal, revenue: Decimal) -> Option<Decimal> {
    if revenue.is_zero() {
        return None;
    }
    let ratio = margin.checked_div(revenue)?;
    Some(ratio.checked_mul(Decimal::ONE_HUNDRED)?.round_dp(2))
}

/// Formats a percentage with one decimal: `60.0%`.
#[must_use]
pub fn format_percent(value: Decimal) -> String {
    let mut rounded = value.round_dp(1);
    rounded.rescale(1);
    format!("{rounded}%")
}

/// Direction of a month-over-month change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    /// Increased.
    Up,
    /// Decreased.
    Down,
    /// Changed by less than 0.1%.
    Flat,
}

/// One metric card.
#[derive(Debug, Clone, Serialize)]
pub struct MetricCard {
    /// Metric shown.
    pub kind: MetricKind,
    /// Card title.
    pub label: &'static str,
    /// Latest value.
    pub value: Decimal,
    /// Latest value as "45.000 €" or "60.0%".
    pub display: String,
    /// Value of the preceding record.
    pub previous: Option<Decimal>,
    /// Percent change from the preceding record.
    pub change_percent: Option<Decimal>,
    /// Direction of the change.
    pub trend: Option<Trend>,
    /// Threshold for the year.
    pub target: Option<Decimal>,
    /// Threshold, formatted like the value.
    pub target_display: Option<String>,
    /// Value below threshold.
    pub under_target: bool,
}

/// One point of the trend chart.
#[derive(Debug, Clone, Serialize)]
pub struct TrendPoint {
    /// Period.
    pub period: Period,
    /// Label as "Gen 2024".
    pub label: String,
    /// Revenue.
    pub revenue: Decimal,
    /// Margin.
    pub margin: Decimal,
    /// Net income.
    pub net_income: Decimal,
}
