//! Values returned by mutating operations.

use serde::Serialize;

use crate::company::Company;
use crate::metrics::Advisory;
use crate::records::MonthlyRecord;
use crate::targets::Target;

/// A created or updated company and the reloaded company list.
#[derive(Debug, Clone, Serialize)]
pub struct CompanySaved {
    /// The saved company, to be selected.
    pub company: Company,
    /// The user's companies, newest first.
    pub companies: Vec<Company>,
}

/// A saved monthly record and the company's reloaded records.
#[derive(Debug, Clone, Serialize)]
pub struct RecordSaved {
    /// The stored record.
    pub record: MonthlyRecord,
    /// The company's records, oldest period first.
    pub records: Vec<MonthlyRecord>,
    /// Warnings about the stored figures.
    pub advisories: Vec<Advisory>,
}

/// Saved targets and the company's reloaded target list.
#[derive(Debug, Clone, Serialize)]
pub struct TargetsSaved {
    /// The stored targets.
    pub target: Target,
    /// The company's targets, latest year first.
    pub targets: Vec<Target>,
}
