//! `SeaORM` Entity for companies table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "companies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_name = "capitale_sociale", column_type = "Decimal(Some((15, 2)))")]
    pub share_capital: Decimal,
    pub user_id: Uuid,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::monthly_business_data::Entity")]
    MonthlyBusinessData,
    #[sea_orm(has_many = "super::business_targets::Entity")]
    BusinessTargets,
}

impl Related<super::monthly_business_data::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MonthlyBusinessData.def()
    }
}

impl Related<super::business_targets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::BusinessTargets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
