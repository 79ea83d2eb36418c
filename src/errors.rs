use thiserror::Error;
use uuid::Uuid;

use crate::currency::round_cents;

/// Largest accepted chip amount. Every cent below it is exactly representable,
/// and sums over any realistic number of chips stay finite.
pub const MAX_CHIP_AMOUNT: f64 = 10_000_000_000_000.0;

/// Error type that captures chip, ledger, and configuration failures.
#[derive(Debug, Error)]
pub enum ChipError {
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Chip not found: {0}")]
    ChipNotFound(Uuid),
    #[error("Budget entry not found: {0}")]
    EntryNotFound(Uuid),
    #[error("Invalid drag payload: {0}")]
    Payload(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ChipError {
    /// Returns `true` for the lookup failures the UI treats as stale-render races.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ChipError::ChipNotFound(_) | ChipError::EntryNotFound(_))
    }
}

pub type ChipResult<T> = Result<T, ChipError>;

/// Rejects titles that are empty once surrounding whitespace is removed.
pub(crate) fn validate_title(title: &str) -> ChipResult<String> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(ChipError::Validation("chip title must not be empty".into()));
    }
    Ok(trimmed.to_string())
}

/// Rejects NaN, infinities, negative amounts, and amounts above
/// [`MAX_CHIP_AMOUNT`]. Returns the amount rounded to cents.
pub(crate) fn validate_amount(amount: f64) -> ChipResult<f64> {
    if !amount.is_finite() {
        return Err(ChipError::Validation(format!(
            "amount must be a finite number, got {amount}"
        )));
    }
    if amount < 0.0 {
        return Err(ChipError::Validation(format!(
            "amount must not be negative, got {amount}"
        )));
    }
    let rounded = round_cents(amount);
    if rounded > MAX_CHIP_AMOUNT {
        return Err(ChipError::Validation(format!(
            "amount must not exceed {MAX_CHIP_AMOUNT}, got {amount}"
        )));
    }
    Ok(rounded)
}
