//! Business data service: the operations behind every page.
//!
//! Each mutation returns the changed entity together with the reloaded list
//! it belongs to, so callers never re-fetch on their own. Company-scoped
//! operations first check that the company belongs to the signed-in user.

mod results;

#[cfg(test)]
mod tests;

pub use results::{CompanySaved, RecordSaved, TargetsSaved};

use std::sync::Arc;

use bizpulse_shared::NetIncomeFormula;
use bizpulse_shared::types::{CompanyId, MonthlyRecordId, UserId};
use tracing::{debug, info, warn};

use crate::alerts::{self, Alert};
use crate::company::{Company, CompanyInput, NewCompany};
use crate::dashboard::{self, Dashboard};
use crate::error::{BusinessError, BusinessResult, ValidationError};
use crate::identity::IdentityProvider;
use crate::metrics::{DerivedMetrics, MetricsCalculator, advisories_for};
use crate::records::{
    MonthlyEntryInput, MonthlyFigures, MonthlyRecord, MonthlyRecordPatch, MonthlyRecordUpdate,
    MonthlyRecordUpsert,
};
use crate::store::{RecordStore, StoreError, collections};
use crate::targets::{Target, TargetInput};

/// Orchestrates validation, derived metrics and the record store.
pub struct BusinessDataService<S: ?Sized = dyn RecordStore> {
    store: Arc<S>,
    metrics: MetricsCalculator,
}

impl<S: ?Sized> Clone for BusinessDataService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            metrics: self.metrics,
        }
    }
}

impl<S: RecordStore + ?Sized> BusinessDataService<S> {
    /// Creates a service over a record store.
    #[must_use]
    pub const fn new(store: Arc<S>, formula: NetIncomeFormula) -> Self {
        Self {
            store,
            metrics: MetricsCalculator::new(formula),
        }
    }

    /// The underlying record store.
    #[must_use]
    pub const fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Computes margin and net income with the configured formula.
    #[must_use]
    pub fn compute_derived_metrics(&self, figures: &MonthlyFigures) -> DerivedMetrics {
        self.metrics.compute(figures)
    }

    // ========================================================================
    // Companies
    // ========================================================================

    /// Lists the signed-in user's companies, newest first.
    pub async fn list_companies<I>(&self, identity: &I) -> BusinessResult<Vec<Company>>
    where
        I: IdentityProvider + ?Sized,
    {
        let user_id = identity.current_user_id().await?;
        Ok(self.store.list_companies(user_id).await?)
    }

    /// Creates a company owned by the signed-in user.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyCompanyName` without touching the store
    /// when the trimmed name is empty.
    pub async fn create_company<I>(
        &self,
        identity: &I,
        input: &CompanyInput,
    ) -> BusinessResult<CompanySaved>
    where
        I: IdentityProvider + ?Sized,
    {
        let fields = input.validate()?;
        let user_id = identity.current_user_id().await?;

        let company = self
            .store
            .insert_company(NewCompany { user_id, fields })
            .await
            .inspect_err(|e| warn!(error = %e, "Failed to create company"))?;
        info!(company_id = %company.id, name = %company.name, "Company created");

        let companies = self.store.list_companies(user_id).await?;
        Ok(CompanySaved { company, companies })
    }

    /// Updates a company's name, description and share capital.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyCompanyName` without touching the store
    /// when the trimmed name is empty, `BusinessError::CompanyNotFound` when
    /// the company is not the user's.
    pub async fn update_company<I>(
        &self,
        identity: &I,
        company_id: CompanyId,
        input: &CompanyInput,
    ) -> BusinessResult<CompanySaved>
    where
        I: IdentityProvider + ?Sized,
    {
        let changes = input.validate()?;
        let user_id = identity.current_user_id().await?;
        self.owned_company(user_id, company_id).await?;

        let company = self
            .store
            .update_company(company_id, changes)
            .await
            .inspect_err(|e| warn!(error = %e, %company_id, "Failed to update company"))?;
        info!(%company_id, "Company updated");

        let companies = self.store.list_companies(user_id).await?;
        Ok(CompanySaved { company, companies })
    }

    // ========================================================================
    // Monthly records
    // ========================================================================

    /// Lists a company's records ordered by year, then month.
    pub async fn list_monthly_records<I>(
        &self,
        identity: &I,
        company_id: CompanyId,
    ) -> BusinessResult<Vec<MonthlyRecord>>
    where
        I: IdentityProvider + ?Sized,
    {
        let user_id = identity.current_user_id().await?;
        self.owned_company(user_id, company_id).await?;
        Ok(self.store.list_monthly_records(company_id).await?)
    }

    /// Stores a month's figures, replacing any record for the same period.
    ///
    /// Advisories for negative margin or net income are returned alongside
    /// the stored record; they never block the write.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NoCompanySelected` when `company_id` is
    /// `None` and other validation errors for bad input, in both cases before
    /// any store call.
    pub async fn submit_monthly_record<I>(
        &self,
        identity: &I,
        company_id: Option<CompanyId>,
        input: &MonthlyEntryInput,
    ) -> BusinessResult<RecordSaved>
    where
        I: IdentityProvider + ?Sized,
    {
        let company_id = company_id.ok_or(ValidationError::NoCompanySelected)?;
        let (period, figures) = input.validate()?;
        let user_id = identity.current_user_id().await?;
        self.owned_company(user_id, company_id).await?;

        let metrics = self.metrics.compute(&figures);
        metrics.ensure_storable()?;
        let record = self
            .store
            .upsert_monthly_record(MonthlyRecordUpsert {
                company_id,
                period,
                figures,
                metrics,
            })
            .await
            .inspect_err(|e| warn!(error = %e, %company_id, %period, "Failed to save monthly record"))?;
        info!(%company_id, record_id = %record.id, %period, "Monthly record saved");

        let advisories = advisories_for(&metrics);
        if !advisories.is_empty() {
            debug!(record_id = %record.id, ?advisories, "Monthly record saved with advisories");
        }

        let records = self.store.list_monthly_records(company_id).await?;
        Ok(RecordSaved {
            record,
            records,
            advisories,
        })
    }

    /// Merges new figures into a record and recomputes its metrics.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` when the record does not exist or
    /// belongs to another user's company.
    pub async fn update_monthly_record<I>(
        &self,
        identity: &I,
        record_id: MonthlyRecordId,
        patch: &MonthlyRecordPatch,
    ) -> BusinessResult<RecordSaved>
    where
        I: IdentityProvider + ?Sized,
    {
        let user_id = identity.current_user_id().await?;
        let current = self.owned_record(user_id, record_id).await?;
        let figures = patch.apply_to(current.figures)?;
        let metrics = self.metrics.compute(&figures);
        metrics.ensure_storable()?;

        let record = if patch.is_empty() && metrics == current.metrics() {
            debug!(%record_id, "Empty patch, nothing to update");
            current
        } else {
            let updated = self
                .store
                .update_monthly_record(record_id, MonthlyRecordUpdate { figures, metrics })
                .await
                .inspect_err(|e| warn!(error = %e, %record_id, "Failed to update monthly record"))?;
            info!(%record_id, period = %updated.period, "Monthly record updated");
            updated
        };

        let records = self.store.list_monthly_records(record.company_id).await?;
        Ok(RecordSaved {
            advisories: advisories_for(&record.metrics()),
            record,
            records,
        })
    }

    /// Deletes a record and returns the owning company's remaining records.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown record.
    pub async fn delete_monthly_record<I>(
        &self,
        identity: &I,
        record_id: MonthlyRecordId,
    ) -> BusinessResult<Vec<MonthlyRecord>>
    where
        I: IdentityProvider + ?Sized,
    {
        let user_id = identity.current_user_id().await?;
        let record = self.owned_record(user_id, record_id).await?;

        self.store
            .delete_monthly_record(record_id)
            .await
            .inspect_err(|e| warn!(error = %e, %record_id, "Failed to delete monthly record"))?;
        info!(%record_id, company_id = %record.company_id, period = %record.period, "Monthly record deleted");

        Ok(self.store.list_monthly_records(record.company_id).await?)
    }

    // ========================================================================
    // Targets
    // ========================================================================

    /// Lists a company's targets, latest year first.
    pub async fn list_targets<I>(
        &self,
        identity: &I,
        company_id: CompanyId,
    ) -> BusinessResult<Vec<Target>>
    where
        I: IdentityProvider + ?Sized,
    {
        let user_id = identity.current_user_id().await?;
        self.owned_company(user_id, company_id).await?;
        Ok(self.store.list_targets(company_id).await?)
    }

    /// Sets the targets of a year, replacing earlier ones.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::NoCompanySelected` when `company_id` is
    /// `None`.
    pub async fn save_targets<I>(
        &self,
        identity: &I,
        company_id: Option<CompanyId>,
        input: &TargetInput,
    ) -> BusinessResult<TargetsSaved>
    where
        I: IdentityProvider + ?Sized,
    {
        let company_id = company_id.ok_or(ValidationError::NoCompanySelected)?;
        let upsert = input.validate(company_id)?;
        let user_id = identity.current_user_id().await?;
        self.owned_company(user_id, company_id).await?;

        let target = self
            .store
            .upsert_target(upsert)
            .await
            .inspect_err(|e| warn!(error = %e, %company_id, "Failed to save targets"))?;
        info!(%company_id, year = target.year, "Targets saved");

        let targets = self.store.list_targets(company_id).await?;
        Ok(TargetsSaved { target, targets })
    }

    // ========================================================================
    // Read models
    // ========================================================================

    /// Alerts for the company's latest period.
    pub async fn alerts<I>(&self, identity: &I, company_id: CompanyId) -> BusinessResult<Vec<Alert>>
    where
        I: IdentityProvider + ?Sized,
    {
        let user_id = identity.current_user_id().await?;
        self.owned_company(user_id, company_id).await?;
        let records = self.store.list_monthly_records(company_id).await?;
        let targets = self.store.list_targets(company_id).await?;
        Ok(alerts::alerts_for_latest(&records, &targets))
    }

    /// Dashboard for a company.
    pub async fn dashboard<I>(&self, identity: &I, company_id: CompanyId) -> BusinessResult<Dashboard>
    where
        I: IdentityProvider + ?Sized,
    {
        let user_id = identity.current_user_id().await?;
        self.owned_company(user_id, company_id).await?;
        let records = self.store.list_monthly_records(company_id).await?;
        let targets = self.store.list_targets(company_id).await?;
        Ok(dashboard::build_dashboard(company_id, &records, &targets))
    }

    // ========================================================================
    // Access
    // ========================================================================

    async fn owned_company(&self, user_id: UserId, company_id: CompanyId) -> BusinessResult<Company> {
        match self.store.find_company(company_id).await? {
            Some(company) if company.user_id == user_id => Ok(company),
            Some(_) => {
                warn!(%company_id, %user_id, "Company belongs to another user");
                Err(BusinessError::CompanyNotFound(company_id))
            }
            None => Err(BusinessError::CompanyNotFound(company_id)),
        }
    }

    async fn owned_record(
        &self,
        user_id: UserId,
        record_id: MonthlyRecordId,
    ) -> BusinessResult<MonthlyRecord> {
        let not_found = || StoreError::not_found(collections::MONTHLY_BUSINESS_DATA, record_id);

        let record = self
            .store
            .find_monthly_record(record_id)
            .await?
            .ok_or_else(not_found)?;
        match self.owned_company(user_id, record.company_id).await {
            Ok(_) => Ok(record),
            Err(BusinessError::CompanyNotFound(_)) => Err(not_found().into()),
            Err(e) => Err(e),
        }
    }
}
