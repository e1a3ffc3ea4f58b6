//! Shared types, errors, and configuration for BizPulse.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - Amount coercion and euro display formatting
//! - Monthly periods
//! - Application-wide error types
//! - Configuration management
//! - Identity-provider token validation

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

pub use auth::Claims;
pub use config::{AppConfig, AuthConfig, MetricsConfig, NetIncomeFormula};
pub use error::{AppError, AppResult};
pub use jwt::{JwtConfig, JwtError, JwtService};
