//! Message-style commands accepted by the coordinator and the events it
//! reports back to observers.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use crate::domain::{BudgetEntry, Chip, ChipRequest, Pool};

/// A UI action routed into the coordinator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum BudgetCommand {
    CreateChip(ChipRequest),
    RemoveChip { id: Uuid, pool: Pool },
    SubmitBudget { date: NaiveDate, chips: Vec<Chip> },
    DeleteEntry { entry_id: Uuid },
}

/// Outcome of a command, delivered to observers once the state change is complete.
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetEvent {
    ChipCreated(Chip),
    ChipUpdated(Chip),
    ChipRemoved { chip: Chip, pool: Pool },
    BudgetSubmitted(BudgetEntry),
    EntryDeleted(BudgetEntry),
    /// The command referenced something that no longer exists.
    Unchanged,
}

impl BudgetEvent {
    pub fn is_change(&self) -> bool {
        !matches!(self, BudgetEvent::Unchanged)
    }
}

/// Receives coordinator events. Closures taking `&BudgetEvent` qualify.
pub trait BudgetObserver {
    fn notify(&mut self, event: &BudgetEvent);
}

impl<F> BudgetObserver for F
where
    F: FnMut(&BudgetEvent),
{
    fn notify(&mut self, event: &BudgetEvent) {
        self(event)
    }
}
