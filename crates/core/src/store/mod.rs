//! Port to the external record store.
//!
//! One typed method per collection and operation. Filters and ordering are
//! fixed by each method's contract:
//!
//! - companies: owned by a user, newest first
//! - monthly records: by company, `(year asc, month asc)`
//! - targets: by company, `year desc`
//!
//! Upserts are keyed on `(company, year, month)` for monthly records and
//! `(company, year)` for targets.

mod error;
mod memory;

pub use error::{StoreError, StoreResult};
pub use memory::InMemoryStore;

use async_trait::async_trait;
use bizpulse_shared::types::{CompanyId, MonthlyRecordId, UserId};

use crate::company::{Company, CompanyChanges, NewCompany};
use crate::records::{MonthlyRecord, MonthlyRecordUpdate, MonthlyRecordUpsert};
use crate::targets::{Target, TargetUpsert};

/// Collection names used by the hosted store.
pub mod collections {
    /// Companies.
    pub const COMPANIES: &str = "companies";
    /// Monthly figures.
    pub const MONTHLY_BUSINESS_DATA: &str = "monthly_business_data";
    /// Yearly targets.
    pub const BUSINESS_TARGETS: &str = "business_targets";
}

/// Persistence for companies, monthly records and targets.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Lists a user's companies, newest first.
    async fn list_companies(&self, owner: UserId) -> StoreResult<Vec<Company>>;

    /// Finds a company by ID regardless of owner.
    async fn find_company(&self, id: CompanyId) -> StoreResult<Option<Company>>;

    /// Inserts a company.
    async fn insert_company(&self, company: NewCompany) -> StoreResult<Company>;

    /// Replaces a company's editable fields.
    ///
    /// Fails with `StoreError::NotFound` if the company does not exist.
    async fn update_company(&self, id: CompanyId, changes: CompanyChanges) -> StoreResult<Company>;

    /// Lists a company's monthly records, oldest period first.
    async fn list_monthly_records(&self, company: CompanyId) -> StoreResult<Vec<MonthlyRecord>>;

    /// Finds a monthly record by ID.
    async fn find_monthly_record(&self, id: MonthlyRecordId)
    -> StoreResult<Option<MonthlyRecord>>;

    /// Inserts or replaces the record for `(company, year, month)`.
    async fn upsert_monthly_record(&self, record: MonthlyRecordUpsert)
    -> StoreResult<MonthlyRecord>;

    /// Replaces a record's figures and metrics.
    ///
    /// Fails with `StoreError::NotFound` if the record does not exist.
    async fn update_monthly_record(
        &self,
        id: MonthlyRecordId,
        update: MonthlyRecordUpdate,
    ) -> StoreResult<MonthlyRecord>;

    /// Deletes a record.
    ///
    /// Fails with `StoreError::NotFound` if the record does not exist.
    async fn delete_monthly_record(&self, id: MonthlyRecordId) -> StoreResult<()>;

    /// Lists a company's targets, latest year first.
    async fn list_targets(&self, company: CompanyId) -> StoreResult<Vec<Target>>;

    /// Inserts or replaces the targets for `(company, year)`.
    async fn upsert_target(&self, target: TargetUpsert) -> StoreResult<Target>;
}
