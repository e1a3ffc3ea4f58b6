//! Common types used across the application.

pub mod id;
pub mod money;
pub mod period;

pub use id::*;
pub use money::{AmountInput, coerce_amount, format_eur};
pub use period::{Period, PeriodError};
