//! Derived metrics: margin, net income, and the advisories they trigger.

pub mod advisory;
pub mod calc;


pub use advisory::{Advisory, advisories_for};
pub use calc::{DerivedMetrics, MetricsCalculator, compute_derived_metrics};
