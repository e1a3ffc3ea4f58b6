//! Business targets repository.
//!
//! Targets are unique per `(company_id, year)` and written with a single
//! `INSERT .. ON CONFLICT DO UPDATE` on that key.

use rust_decimal::Decimal;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use uuid::Uuid;

use crate::entities::business_targets;

/// Thresholds of one year.
#[derive(Debug, Clone, Copy, Default)]
pub struct TargetValues {
    /// Revenue threshold.
    pub target_revenue: Option<Decimal>,
    /// Margin threshold.
    pub target_margin: Option<Decimal>,
    /// Net income threshold.
    pub target_net_income: Option<Decimal>,
}

/// Repository for the business_targets table.
#[derive(Debug, Clone)]
pub struct TargetRepository {
    db: DatabaseConnection,
}

impl TargetRepository {
    /// Creates a new target repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Lists a company's targets, latest year first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<business_targets::Model>, DbErr> {
        business_targets::Entity::find()
            .filter(business_targets::Column::CompanyId.eq(company_id))
            .order_by_desc(business_targets::Column::Year)
            .all(&self.db)
            .await
    }

    /// Inserts or replaces the targets of `(company_id, year)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database write fails.
    pub async fn upsert(
        &self,
        company_id: Uuid,
        year: i32,
        values: TargetValues,
    ) -> Result<business_targets::Model, DbErr> {
        use business_targets::Column;

        let now = chrono::Utc::now().into();
        let active = business_targets::ActiveModel {
            id: Set(Uuid::now_v7()),
            company_id: Set(company_id),
            year: Set(year),
            target_revenue: Set(values.target_revenue),
            target_margin: Set(values.target_margin),
            target_net_income: Set(values.target_net_income),
            created_at: Set(now),
            updated_at: Set(now),
        };

        business_targets::Entity::insert(active)
            .on_conflict(
                OnConflict::columns([Column::CompanyId, Column::Year])
                    .update_columns([
                        Column::TargetRevenue,
                        Column::TargetMargin,
                        Column::TargetNetIncome,
                        Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;

        business_targets::Entity::find()
            .filter(Column::CompanyId.eq(company_id))
            .filter(Column::Year.eq(year))
            .one(&self.db)
            .await?
            .ok_or_else(|| DbErr::RecordNotFound(format!("targets {company_id} {year}")))
    }
}
