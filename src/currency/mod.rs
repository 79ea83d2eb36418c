//! Two-decimal rounding and money formatting for chips and totals.

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::domain::common::SignedAmount;

/// How negative totals are rendered.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum NegativeStyle {
    #[default]
    Sign,
    Parentheses,
}

/// Rounds to whole cents, never returning negative zero. Values too large to
/// scale have no fractional cents and are returned unchanged.
pub fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if !scaled.is_finite() {
        return value;
    }
    let rounded = scaled.round() / 100.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

/// Formats a signed value such as a ledger total: `$150.00`, `-$12.50`.
pub fn format_amount(value: f64, config: &Config) -> String {
    let rounded = round_cents(value);
    let magnitude = format!("{}{:.2}", config.currency_symbol, rounded.abs());
    if rounded >= 0.0 {
        return magnitude;
    }
    match config.negative_style {
        NegativeStyle::Sign => format!("-{magnitude}"),
        NegativeStyle::Parentheses => format!("({magnitude})"),
    }
}

/// Formats the face of a chip, always showing the category sign: `-$12.50`, `+$200.00`.
pub fn format_chip_face<T: SignedAmount>(item: &T, config: &Config) -> String {
    format!(
        "{}{}{:.2}",
        item.category().sign_symbol(),
        config.currency_symbol,
        round_cents(item.amount())
    )
}

/// Sums signed amounts and rounds the result once.
pub fn signed_sum<'a, T, I>(items: I) -> f64
where
    T: SignedAmount + 'a,
    I: IntoIterator<Item = &'a T>,
{
    round_cents(items.into_iter().map(SignedAmount::signed_amount).sum())
}
