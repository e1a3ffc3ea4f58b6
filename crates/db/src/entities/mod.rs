//! `SeaORM` entities for the hosted store's collections.
//!
//! Field names are English; column names keep the hosted schema.

pub mod business_targets;
pub mod companies;
pub mod monthly_business_data;

pub mod prelude {
    //! Entity re-exports.
    pub use super::business_targets::Entity as BusinessTargets;
    pub use super::companies::Entity as Companies;
    pub use super::monthly_business_data::Entity as MonthlyBusinessData;
}
