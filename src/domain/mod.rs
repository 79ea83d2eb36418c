//! Chip and budget-entry models. No I/O, only data types and their invariants.

pub mod chip;
pub mod common;
pub mod entry;

pub use chip::{Chip, ChipRequest, DragPayload};
pub use common::{
    Amounted, Category, ChipOrigin, Displayable, Identifiable, Pool, SignedAmount,
};
pub use entry::BudgetEntry;
