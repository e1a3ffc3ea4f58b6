//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.

pub mod company;
pub mod monthly_data;
pub mod target;

pub use company::{CompanyFields, CompanyRepository};
pub use monthly_data::{MonthlyDataRepository, MonthlyValues};
pub use target::{TargetRepository, TargetValues};
