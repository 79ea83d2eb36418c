//! Coordination of pools, ledger, and calculator behind a command interface.

pub mod coordinator;
pub mod events;

pub use coordinator::ReconciliationCoordinator;
pub use events::{BudgetCommand, BudgetEvent, BudgetObserver};
