//! `SeaORM` Entity for monthly_business_data table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "monthly_business_data")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub month: i32,
    pub year: i32,
    #[sea_orm(column_name = "ricavi", column_type = "Decimal(Some((15, 2)))")]
    pub revenue: Decimal,
    #[sea_orm(column_name = "costi_diretti", column_type = "Decimal(Some((15, 2)))")]
    pub direct_costs: Decimal,
    #[sea_orm(column_name = "costi_totali", column_type = "Decimal(Some((15, 2)))")]
    pub total_costs: Decimal,
    #[sea_orm(column_name = "compenso_imprenditore", column_type = "Decimal(Some((15, 2)))")]
    pub owner_compensation: Decimal,
    #[sea_orm(column_name = "margine", column_type = "Decimal(Some((15, 2)))")]
    pub margin: Decimal,
    #[sea_orm(column_name = "utile_netto", column_type = "Decimal(Some((15, 2)))")]
    pub net_income: Decimal,
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
