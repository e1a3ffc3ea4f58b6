//! Monthly business data repository.
//!
//! Records are unique per `(company_id, year, month)`; [`MonthlyDataRepository::upsert`]
//! is a single `INSERT .. ON CONFLICT DO UPDATE` on that key, so concurrent
//! submissions for one period both succeed and the last write wins.

use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set,
};
use uuid::Uuid;

use crate::entities::monthly_business_data;

/// Figures and derived metrics of one month.
#[derive(Debug, Clone, Copy)]
pub struct MonthlyValues {
    /// Revenue.
    pub revenue: Decimal,
    /// Direct costs.
    pub direct_costs: Decimal,
    /// Total costs.
    pub total_costs: Decimal,
    /// Owner compensation.
    pub owner_compensation: Decimal,
    /// Margin.
    pub margin: Decimal,
    /// Net income.
    pub net_income: Decimal,
}

/// Repository for the monthly_business_data table.
#[derive(Debug, Clone)]
pub struct MonthlyDataRepository {
    db: DatabaseConnection,
}

impl MonthlyDataRepository {
    /// Creates a new monthly data repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a record by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<monthly_business_data::Model>, DbErr> {
        monthly_business_data::Entity::find_by_id(id)
            .one(&self.db)
            .await
    }

    /// Lists a company's records by year, then month.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<monthly_business_data::Model>, DbErr> {
        monthly_business_data::Entity::find()
            .filter(monthly_business_data::Column::CompanyId.eq(company_id))
            .order_by_asc(monthly_business_data::Column::Year)
            .order_by_asc(monthly_business_data::Column::Month)
            .all(&self.db)
            .await
    }

    /// Inserts or replaces the record of `(company_id, year, month)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert(
        &self,
        company_id: Uuid,
        year: i32,
        month: i32,
        values: MonthlyValues,
    ) -> Result<monthly_business_data::Model, DbErr> {
        use monthly_business_data::Column;

        let now = chrono::Utc::now().into();
        let mut active = monthly_business_data::ActiveModel {
            id: Set(Uuid::now_v7()),
            company_id: Set(company_id),
            year: Set(year),
            month: Set(month),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        set_values(&mut active, values);

        monthly_business_data::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([Column::CompanyId, Column::Year, Column::Month])
                    .update_columns([
                        Column::Revenue,
                        Column::DirectCosts,
                        Column::TotalCosts,
                        Column::OwnerCompensation,
                        Column::Margin,
                        Column::NetIncome,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        monthly_business_data::Entity::find()
            .filter(Column::CompanyId.eq(company_id))
            .filter(Column::Year.eq(year))
            .filter(Column::Month.eq(month))
            .one(&self.db)
            .await?
            .ok_or_else(|| {
                DbErr::RecordNotFound(format!("monthly record {company_id} {year}-{month}"))
            })
    }

    /// Replaces a record's figures and metrics.
    ///
    /// # Errors
    ///
    /// Returns `DbErr::RecordNotFound` if the record does not exist.
    pub async fn update(
        &self,
        id: Uuid,
        values: MonthlyValues,
    ) -> Result<monthly_business_data::Model, DbErr> {
        let record = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("monthly record {id}")))?;

        let mut active: monthly_business_data::ActiveModel = record.into();
        set_values(&mut active, values);
        active.updated_at = Set(chrono::Utc::now().into());

        active.update(&self.db).await
    }

    /// Deletes a record. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, id: Uuid) -> Result<bool, DbErr> {
        let result = monthly_business_data::Entity::delete_by_id(id)
            .exec(&self.db)
            .await?;
        Ok(result.rows_affected > 0)
    }
}

fn set_values(active: &mut monthly_business_data::ActiveModel, values: MonthlyValues) {
    active.revenue = Set(values.revenue);
    active.direct_costs = Set(values.direct_costs);
    active.total_costs = Set(values.total_costs);
    active.owner_compensation = Set(values.owner_compensation);
    active.margin = Set(values.margin);
    active.net_income = Set(values.net_income);
}
