//! Amount input coercion and display formatting.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts are `rust_decimal::Decimal` from the form boundary onwards.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A monetary field as typed into a form.
///
/// Forms send numbers, numeric strings, or garbage. Anything that does not
/// parse becomes zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountInput {
    /// A value that already parsed as a decimal.
    Number(Decimal),
    /// Free text.
    Text(String),
}

impl AmountInput {
    /// Returns the decimal value, or zero when the input is not numeric.
    #[must_use]
    pub fn coerce(&self) -> Decimal {
        match self {
            Self::Number(value) => *value,
            Self::Text(text) => coerce_amount(text),
        }
    }
}

impl From<Decimal> for AmountInput {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

/// Parses a typed amount, defaulting to zero on invalid input.
///
/// Accepts a comma as decimal separator ("1250,50").
#[must_use]
pub fn coerce_amount(raw: &str) -> Decimal {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Decimal::ZERO;
    }

    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replace(',', ".")
    } else {
        trimmed.to_string()
    };

    Decimal::from_str(&normalized)
        .or_else(|_| Decimal::from_scientific(&normalized))
        .unwrap_or(Decimal::ZERO)
}

/// Formats an amount as whole euros the Italian way: `45.000 €`.
#[must_use]
pub fn format_eur(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let digits = rounded.abs().trunc().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{sign}{grouped}\u{a0}€")
}
