//! Core business logic for BizPulse.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! Persistence and identity are reached through the [`store::RecordStore`] and
//! [`identity::IdentityProvider`] ports.
//!
//! # Modules
//!
//! - `company` - Companies owned by a user
//! - `records` - Monthly figures, one record per company and period
//! - `targets` - Yearly thresholds
//! - `metrics` - Margin and net income derivation, advisories
//! - `alerts` - Target-vs-actual alerts
//! - `dashboard` - Metric cards and trend series
//! - `service` - The business data service
//! - `workspace` - Session state with stale-load protection

pub mod alerts;
pub mod company;
pub mod dashboard;
pub mod error;
pub mod identity;
pub mod metrics;
pub mod records;
pub mod service;
pub mod store;
pub mod targets;
pub mod workspace;

pub use error::{BusinessError, BusinessResult, ValidationError};
pub use identity::{IdentityProvider, StaticIdentity};
pub use service::BusinessDataService;
pub use store::{InMemoryStore, RecordStore, StoreError, StoreResult};
pub use workspace::Workspace;
