//! Staging pools and the committed, date-keyed ledger.

pub mod collection;
pub mod store;

pub use collection::ChipCollection;
pub use store::LedgerStore;
