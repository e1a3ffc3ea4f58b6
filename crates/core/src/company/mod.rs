//! Companies: the root entity owning monthly records and targets.

pub mod types;

pub use types::{Company, CompanyChanges, CompanyInput, NewCompany};
