//! In-memory record store.
//!
//! Used by tests and dry runs. Each write runs under a single write lock, so
//! upserts are atomic.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use bizpulse_shared::types::{CompanyId, MonthlyRecordId, TargetId, UserId};
use chrono::Utc;
use tokio::sync::RwLock;

use super::{RecordStore, StoreError, StoreResult, collections};
use crate::company::{Company, CompanyChanges, NewCompany};
use crate::records::{MonthlyRecord, MonthlyRecordUpdate, MonthlyRecordUpsert};
use crate::targets::{Target, TargetUpsert};

#[derive(Debug, Default)]
struct Tables {
    companies: HashMap<CompanyId, Company>,
    records: HashMap<MonthlyRecordId, MonthlyRecord>,
    targets: HashMap<TargetId, Target>,
}

/// Record store backed by hash maps.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
    calls: AtomicUsize,
    next_failure: Mutex<Option<StoreError>>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of store calls made so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Makes the next store call fail with `error`.
    pub fn fail_next_call(&self, error: StoreError) {
        if let Ok(mut slot) = self.next_failure.lock() {
            *slot = Some(error);
        }
    }

    fn enter(&self) -> StoreResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let injected = self.next_failure.lock().ok().and_then(|mut slot| slot.take());
        injected.map_or(Ok(()), Err)
    }
}

#[async_trait]
impl RecordStore for InMemoryStore {
    async fn list_companies(&self, owner: UserId) -> StoreResult<Vec<Company>> {
        self.enter()?;
        let tables = self.tables.read().await;
        let mut companies: Vec<Company> = tables
            .companies
            .values()
            .filter(|c| c.user_id == owner)
            .cloned()
            .collect();
        companies.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(companies)
    }

    async fn find_company(&self, id: CompanyId) -> StoreResult<Option<Company>> {
        self.enter()?;
        Ok(self.tables.read().await.companies.get(&id).cloned())
    }

    async fn insert_company(&self, company: NewCompany) -> StoreResult<Company> {
        self.enter()?;
        let now = Utc::now();
        let company = Company {
            id: CompanyId::new(),
            name: company.fields.name,
            description: company.fields.description,
            share_capital: company.fields.share_capital,
            user_id: company.user_id,
            created_at: now,
            updated_at: now,
        };
        self.tables
            .write()
            .await
            .companies
            .insert(company.id, company.clone());
        Ok(company)
    }

    async fn update_company(&self, id: CompanyId, changes: CompanyChanges) -> StoreResult<Company> {
        self.enter()?;
        let mut tables = self.tables.write().await;
        let company = tables
            .companies
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(collections::COMPANIES, id))?;
        company.name = changes.name;
        company.description = changes.description;
        company.share_capital = changes.share_capital;
        company.updated_at = Utc::now();
        Ok(company.clone())
    }

    async fn list_monthly_records(&self, company: CompanyId) -> StoreResult<Vec<MonthlyRecord>> {
        self.enter()?;
        let tables = self.tables.read().await;
        let mut records: Vec<MonthlyRecord> = tables
            .records
            .values()
            .filter(|r| r.company_id == company)
            .cloned()
            .collect();
        records.sort_by_key(|r| r.period);
        Ok(records)
    }

    async fn find_monthly_record(
        &self,
        id: MonthlyRecordId,
    ) -> StoreResult<Option<MonthlyRecord>> {
        self.enter()?;
        Ok(self.tables.read().await.records.get(&id).cloned())
    }

    async fn upsert_monthly_record(
        &self,
        upsert: MonthlyRecordUpsert,
    ) -> StoreResult<MonthlyRecord> {
        self.enter()?;
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        let existing = tables
            .records
            .values_mut()
            .find(|r| r.company_id == upsert.company_id && r.period == upsert.period);
        if let Some(record) = existing {
            record.figures = upsert.figures;
            record.margin = upsert.metrics.margin;
            record.net_income = upsert.metrics.net_income;
            record.updated_at = now;
            return Ok(record.clone());
        }

        let record = MonthlyRecord {
            id: MonthlyRecordId::new(),
            company_id: upsert.company_id,
            period: upsert.period,
            figures: upsert.figures,
            margin: upsert.metrics.margin,
            net_income: upsert.metrics.net_income,
            created_at: now,
            updated_at: now,
        };
        tables.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn update_monthly_record(
        &self,
        id: MonthlyRecordId,
        update: MonthlyRecordUpdate,
    ) -> StoreResult<MonthlyRecord> {
        self.enter()?;
        let mut tables = self.tables.write().await;
        let record = tables
            .records
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(collections::MONTHLY_BUSINESS_DATA, id))?;
        record.figures = update.figures;
        record.margin = update.metrics.margin;
        record.net_income = update.metrics.net_income;
        record.updated_at = Utc::now();
        Ok(record.clone())
    }

    async fn delete_monthly_record(&self, id: MonthlyRecordId) -> StoreResult<()> {
        self.enter()?;
        self.tables
            .write()
            .await
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(collections::MONTHLY_BUSINESS_DATA, id))
    }

    async fn list_targets(&self, company: CompanyId) -> StoreResult<Vec<Target>> {
        self.enter()?;
        let tables = self.tables.read().await;
        let mut targets: Vec<Target> = tables
            .targets
            .values()
            .filter(|t| t.company_id == company)
            .cloned()
            .collect();
        targets.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(targets)
    }

    async fn upsert_target(&self, upsert: TargetUpsert) -> StoreResult<Target> {
        self.enter()?;
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        let existing = tables
            .targets
            .values_mut()
            .find(|t| t.company_id == upsert.company_id && t.year == upsert.year);
        if let Some(target) = existing {
            target.target_revenue = upsert.target_revenue;
            target.target_margin = upsert.target_margin;
            target.target_net_income = upsert.target_net_income;
            target.updated_at = now;
            return Ok(target.clone());
        }

        let target = Target {
            id: TargetId::new(),
            company_id: upsert.company_id,
            year: upsert.year,
            target_revenue: upsert.target_revenue,
            target_margin: upsert.target_margin,
            target_net_income: upsert.target_net_income,
            created_at: now,
            updated_at: now,
        };
        tables.targets.insert(target.id, target.clone());
        Ok(target)
    }
}
