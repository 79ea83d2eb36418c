#![doc(test(attr(deny(warnings))))]

//! Budget Chips is the reconciliation core of a budgeting widget: chips
//! (signed line items) staged in day-budget and storage pools, committed into
//! a date-keyed ledger, and fed through a calculator that can mint or amend
//! chips from its result.

pub mod calculator;
pub mod config;
pub mod currency;
pub mod domain;
pub mod errors;
pub mod ledger;
pub mod reconcile;
pub mod utils;

pub use calculator::{CalculatorEngine, CalculatorPhase, CalculatorSignal, Operator};
pub use config::{Config, ConfigManager, LinkPolicy};
pub use domain::{BudgetEntry, Category, Chip, ChipOrigin, ChipRequest, DragPayload, Pool};
pub use errors::{ChipError, ChipResult, MAX_CHIP_AMOUNT};
pub use ledger::{ChipCollection, LedgerStore};
pub use reconcile::{BudgetCommand, BudgetEvent, BudgetObserver, ReconciliationCoordinator};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Chips tracing initialized.");
    });
}
