//! `SeaORM` Entity for business_targets table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "business_targets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub year: i32,
    #[sea_orm(column_name = "target_ricavi", column_type = "Decimal(Some((15, 2)))", nullable)]
    pub target_revenue: Option<Decimal>,
    #[sea_orm(column_name = "target_margine", column_type = "Decimal(Some((15, 2)))", nullable)]
    pub target_margin: Option<Decimal>,
    #[sea_orm(
        column_name = "target_utile_netto",
        column_type = "Decimal(Some((15, 2)))",
        nullable
    )]
    pub target_net_income: Option<Decimal>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id",
        on_delete = "Cascade"
    )]
    Companies,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Companies.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
