//! [`RecordStore`] backed by `SeaORM`.

use async_trait::async_trait;
use bizpulse_core::company::{Company, CompanyChanges, NewCompany};
use bizpulse_core::records::{
    MonthlyFigures, MonthlyRecord, MonthlyRecordUpdate, MonthlyRecordUpsert,
};
use bizpulse_core::store::{RecordStore, StoreError, StoreResult, collections};
use bizpulse_core::targets::{Target, TargetUpsert};
use bizpulse_shared::types::{CompanyId, MonthlyRecordId, Period, UserId};
use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr, SqlErr};
use tracing::error;

use crate::entities::{business_targets, companies, monthly_business_data};
use crate::repositories::{
    CompanyFields, CompanyRepository, MonthlyDataRepository, MonthlyValues, TargetRepository,
    TargetValues,
};

/// Record store over a database connection.
#[derive(Debug, Clone)]
pub struct SeaOrmStore {
    companies: CompanyRepository,
    monthly_data: MonthlyDataRepository,
    targets: TargetRepository,
}

impl SeaOrmStore {
    /// Creates a store over a connection.
    #[must_use]
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            companies: CompanyRepository::new(db.clone()),
            monthly_data: MonthlyDataRepository::new(db.clone()),
            targets: TargetRepository::new(db),
        }
    }
}

#[async_trait]
impl RecordStore for SeaOrmStore {
    async fn list_companies(&self, owner: UserId) -> StoreResult<Vec<Company>> {
        let rows = self
            .companies
            .list_by_user(owner.into_inner())
            .await
            .map_err(|e| store_error(collections::COMPANIES, e))?;
        Ok(rows.into_iter().map(company_from_model).collect())
    }

    async fn find_company(&self, id: CompanyId) -> StoreResult<Option<Company>> {
        let row = self
            .companies
            .find_by_id(id.into_inner())
            .await
            .map_err(|e| store_error(collections::COMPANIES, e))?;
        Ok(row.map(company_from_model))
    }

    async fn insert_company(&self, company: NewCompany) -> StoreResult<Company> {
        self.companies
            .create(company.user_id.into_inner(), company_fields(company.fields))
            .await
            .map(company_from_model)
            .map_err(|e| store_error(collections::COMPANIES, e))
    }

    async fn update_company(&self, id: CompanyId, changes: CompanyChanges) -> StoreResult<Company> {
        self.companies
            .update(id.into_inner(), company_fields(changes))
            .await
            .map(company_from_model)
            .map_err(|e| match e {
                DbErr::RecordNotFound(_) => StoreError::not_found(collections::COMPANIES, id),
                e => store_error(collections::COMPANIES, e),
            })
    }

    async fn list_monthly_records(&self, company: CompanyId) -> StoreResult<Vec<MonthlyRecord>> {
        self.monthly_data
            .list_by_company(company.into_inner())
            .await
            .map_err(|e| store_error(collections::MONTHLY_BUSINESS_DATA, e))?
            .into_iter()
            .map(record_from_model)
            .collect()
    }

    async fn find_monthly_record(
        &self,
        id: MonthlyRecordId,
    ) -> StoreResult<Option<MonthlyRecord>> {
        self.monthly_data
            .find_by_id(id.into_inner())
            .await
            .map_err(|e| store_error(collections::MONTHLY_BUSINESS_DATA, e))?
            .map(record_from_model)
            .transpose()
    }

    async fn upsert_monthly_record(
        &self,
        record: MonthlyRecordUpsert,
    ) -> StoreResult<MonthlyRecord> {
        let month = i32::try_from(record.period.month())
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let values = monthly_values(record.figures, record.metrics.margin, record.metrics.net_income);

        let row = self
            .monthly_data
            .upsert(
                record.company_id.into_inner(),
                record.period.year(),
                month,
                values,
            )
            .await
            .map_err(|e| store_error(collections::MONTHLY_BUSINESS_DATA, e))?;
        record_from_model(row)
    }

    async fn update_monthly_record(
        &self,
        id: MonthlyRecordId,
        update: MonthlyRecordUpdate,
    ) -> StoreResult<MonthlyRecord> {
        let values = monthly_values(update.figures, update.metrics.margin, update.metrics.net_income);

        let row = self
            .monthly_data
            .update(id.into_inner(), values)
            .await
            .map_err(|e| match e {
                DbErr::RecordNotFound(_) => {
                    StoreError::not_found(collections::MONTHLY_BUSINESS_DATA, id)
                }
                e => store_error(collections::MONTHLY_BUSINESS_DATA, e),
            })?;
        record_from_model(row)
    }

    async fn delete_monthly_record(&self, id: MonthlyRecordId) -> StoreResult<()> {
        let deleted = self
            .monthly_data
            .delete(id.into_inner())
            .await
            .map_err(|e| store_error(collections::MONTHLY_BUSINESS_DATA, e))?;
        if deleted {
            Ok(())
        } else {
            Err(StoreError::not_found(collections::MONTHLY_BUSINESS_DATA, id))
        }
    }

    async fn list_targets(&self, company: CompanyId) -> StoreResult<Vec<Target>> {
        let rows = self
            .targets
            .list_by_company(company.into_inner())
            .await
            .map_err(|e| store_error(collections::BUSINESS_TARGETS, e))?;
        Ok(rows.into_iter().map(target_from_model).collect())
    }

    async fn upsert_target(&self, target: TargetUpsert) -> StoreResult<Target> {
        let values = TargetValues {
            target_revenue: target.target_revenue,
            target_margin: target.target_margin,
            target_net_income: target.target_net_income,
        };
        self.targets
            .upsert(target.company_id.into_inner(), target.year, values)
            .await
            .map(target_from_model)
            .map_err(|e| store_error(collections::BUSINESS_TARGETS, e))
    }
}

/// Maps a database error to a store error.
fn store_error(collection: &'static str, err: DbErr) -> StoreError {
    if let Some(SqlErr::UniqueConstraintViolation(message)) = err.sql_err() {
        return StoreError::Conflict {
            collection,
            message,
        };
    }

    error!(collection, error = %err, "Database error");
    match err {
        DbErr::Conn(_) | DbErr::ConnectionAcquire(_) => StoreError::Unavailable(err.to_string()),
        _ => StoreError::Backend(err.to_string()),
    }
}

fn company_fields(changes: CompanyChanges) -> CompanyFields {
    CompanyFields {
        name: changes.name,
        description: changes.description,
        share_capital: changes.share_capital,
    }
}

const fn monthly_values(
    figures: MonthlyFigures,
    margin: rust_decimal::Decimal,
    net_income: rust_decimal::Decimal,
) -> MonthlyValues {
    MonthlyValues {
        revenue: figures.revenue,
        direct_costs: figures.direct_costs,
        total_costs: figures.total_costs,
        owner_compensation: figures.owner_compensation,
        margin,
        net_income,
    }
}

fn company_from_model(model: companies::Model) -> Company {
    Company {
        id: CompanyId::from_uuid(model.id),
        name: model.name,
        description: model.description,
        share_capital: model.share_capital,
        user_id: UserId::from_uuid(model.user_id),
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}

fn record_from_model(model: monthly_business_data::Model) -> StoreResult<MonthlyRecord> {
    let month = u32::try_from(model.month).unwrap_or(0);
    let period = Period::new(month, model.year).map_err(|e| {
        StoreError::Backend(format!("monthly record {} has a bad period: {e}", model.id))
    })?;

    Ok(MonthlyRecord {
        id: MonthlyRecordId::from_uuid(model.id),
        company_id: CompanyId::from_uuid(model.company_id),
        period,
        figures: MonthlyFigures {
            revenue: model.revenue,
            direct_costs: model.direct_costs,
            total_costs: model.total_costs,
            owner_compensation: model.owner_compensation,
        },
        margin: model.margin,
        net_income: model.net_income,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    })
}

fn target_from_model(model: business_targets::Model) -> Target {
    Target {
        id: model.id.into(),
        company_id: CompanyId::from_uuid(model.company_id),
        year: model.year,
        target_revenue: model.target_revenue,
        target_margin: model.target_margin,
        target_net_income: model.target_net_income,
        created_at: model.created_at.with_timezone(&Utc),
        updated_at: model.updated_at.with_timezone(&Utc),
    }
}
