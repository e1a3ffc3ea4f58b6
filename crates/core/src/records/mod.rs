//! Monthly business records: one set of figures per company and period.

pub mod types;

pub use types::{
    AMOUNT_SCALE, MAX_AMOUNT, MonthlyEntryInput, MonthlyFigures, MonthlyRecord, MonthlyRecordPatch, MonthlyRecordUpdate,
    MonthlyRecordUpsert,
};

use bizpulse_shared::types::Period;

/// Returns the record for the most recent period, if any.
#[must_use]
pub fn latest(records: &[MonthlyRecord]) -> Option<&MonthlyRecord> {
    records.iter().max_by_key(|r| r.period)
}

/// Sorts records chronologically, oldest first.
pub fn sort_chronologically(records: &mut [MonthlyRecord]) {
    records.sort_by_key(|r| r.period);
}

/// Finds the record stored for a period.
#[must_use]
pub fn find_period(records: &[MonthlyRecord], period: Period) -> Option<&MonthlyRecord> {
    records.iter().find(|r| r.period == period)
}
