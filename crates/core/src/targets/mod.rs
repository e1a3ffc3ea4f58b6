//! Yearly targets used to raise advisory alerts.

pub mod types;

pub use types::{Target, TargetInput, TargetUpsert};

/// Finds the targets set for a year.
#[must_use]
pub fn for_year(targets: &[Target], year: i32) -> Option<&Target> {
    targets.iter().find(|t| t.year == year)
}
