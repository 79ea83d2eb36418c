//! Shared traits and enums for chip primitives.

use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies entities that expose a stable unique identifier.
pub trait Identifiable {
    fn id(&self) -> Uuid;
}

/// Supplies the unsigned magnitude of a monetary item.
pub trait Amounted {
    fn amount(&self) -> f64;
}

/// Applies the expense/income sign convention on top of [`Amounted`].
pub trait SignedAmount: Amounted {
    fn category(&self) -> Category;

    fn signed_amount(&self) -> f64 {
        self.category().apply_sign(self.amount())
    }
}

/// Supplies a presentation-ready label for UI or logs.
pub trait Displayable {
    fn display_label(&self) -> String;
}

/// Whether a chip takes money out of or puts money into the budget.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Expense,
    Income,
}

impl Category {
    /// Expenses contribute negatively, income positively.
    pub fn apply_sign(self, amount: f64) -> f64 {
        match self {
            Category::Expense => -amount,
            Category::Income => amount,
        }
    }

    pub fn sign_symbol(self) -> char {
        match self {
            Category::Expense => '-',
            Category::Income => '+',
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Expense => "Expense",
            Category::Income => "Income",
        };
        f.write_str(label)
    }
}

/// The two uncommitted staging areas a chip can live in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum Pool {
    #[default]
    #[serde(rename = "daybudget", alias = "day_budget")]
    DayBudget,
    #[serde(rename = "storage")]
    Storage,
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Pool::DayBudget => "Day Budget",
            Pool::Storage => "Budget Storage",
        };
        f.write_str(label)
    }
}

/// Where a chip surfaced by the aggregate view currently lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChipOrigin {
    DayBudget,
    Storage,
    Entry { entry_id: Uuid, date: NaiveDate },
}

impl From<Pool> for ChipOrigin {
    fn from(pool: Pool) -> Self {
        match pool {
            Pool::DayBudget => ChipOrigin::DayBudget,
            Pool::Storage => ChipOrigin::Storage,
        }
    }
}

impl ChipOrigin {
    /// Staging pool of the origin, `None` for committed entries.
    pub fn pool(self) -> Option<Pool> {
        match self {
            ChipOrigin::DayBudget => Some(Pool::DayBudget),
            ChipOrigin::Storage => Some(Pool::Storage),
            ChipOrigin::Entry { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_sign_convention() {
        assert_eq!(Category::Expense.apply_sign(12.5), -12.5);
        assert_eq!(Category::Income.apply_sign(12.5), 12.5);
    }

    #[test]
    fn pool_serializes_with_widget_names() {
        assert_eq!(
            serde_json::to_string(&Pool::DayBudget).unwrap(),
            "\"daybudget\""
        );
        let parsed: Pool = serde_json::from_str("\"day_budget\"").unwrap();
        assert_eq!(parsed, Pool::DayBudget);
        let storage: Pool = serde_json::from_str("\"storage\"").unwrap();
        assert_eq!(storage, Pool::Storage);
    }

    #[test]
    fn entry_origin_has_no_pool() {
        let origin = ChipOrigin::Entry {
            entry_id: Uuid::new_v4(),
            date: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
        };
        assert_eq!(origin.pool(), None);
        assert_eq!(ChipOrigin::from(Pool::Storage).pool(), Some(Pool::Storage));
    }
}
