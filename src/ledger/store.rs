use std::collections::BTreeMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::currency::round_cents;
use crate::domain::{BudgetEntry, Chip, Identifiable};
use crate::errors::{validate_amount, ChipResult};

/// Committed budget entries keyed by calendar date. Exactly one entry exists
/// per date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LedgerStore {
    entries: BTreeMap<NaiveDate, BudgetEntry>,
}

impl LedgerStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commits `chips` under `date`. A second submission for the same day is
    /// appended to the existing entry rather than replacing it.
    pub fn upsert(&mut self, date: NaiveDate, chips: Vec<Chip>) -> BudgetEntry {
        match self.entries.get_mut(&date) {
            Some(entry) => {
                entry.merge(chips);
                tracing::info!(
                    entry_id = %entry.id(),
                    %date,
                    total = entry.total(),
                    "merged chips into existing budget entry"
                );
                entry.clone()
            }
            None => {
                let entry = BudgetEntry::new(date, chips);
                tracing::info!(
                    entry_id = %entry.id(),
                    %date,
                    total = entry.total(),
                    "created budget entry"
                );
                self.entries.insert(date, entry.clone());
                entry
            }
        }
    }

    /// Removes the entry with `entry_id`; absent ids are ignored.
    pub fn delete(&mut self, entry_id: Uuid) -> Option<BudgetEntry> {
        let date = self.entry(entry_id)?.date();
        let removed = self.entries.remove(&date);
        if removed.is_some() {
            tracing::info!(%entry_id, %date, "deleted budget entry");
        }
        removed
    }

    /// Sum of every entry's precomputed total.
    pub fn grand_total(&self) -> f64 {
        round_cents(self.entries.values().map(BudgetEntry::total).sum())
    }

    /// Writes `new_amount` into every embedded copy of `chip_id` and
    /// recomputes the totals of the entries that changed. Returns how many
    /// entries were touched; an invalid amount leaves every entry as it was.
    pub fn propagate_chip_edit(&mut self, chip_id: Uuid, new_amount: f64) -> ChipResult<usize> {
        let new_amount = validate_amount(new_amount)?;
        let touched = self
            .entries
            .values_mut()
            .map(|entry| entry.amend_chip(chip_id, new_amount))
            .filter(|changed| *changed)
            .count();
        if touched > 0 {
            tracing::debug!(%chip_id, new_amount, touched, "propagated chip edit into ledger");
        }
        Ok(touched)
    }

    /// Entries in date order.
    pub fn entries(&self) -> impl Iterator<Item = &BudgetEntry> {
        self.entries.values()
    }

    pub fn entry(&self, entry_id: Uuid) -> Option<&BudgetEntry> {
        self.entries.values().find(|entry| entry.id() == entry_id)
    }

    pub fn entry_for_date(&self, date: NaiveDate) -> Option<&BudgetEntry> {
        self.entries.get(&date)
    }

    /// First embedded copy of `chip_id`, searching entries in date order.
    pub fn find_chip(&self, chip_id: Uuid) -> Option<&Chip> {
        self.entries.values().find_map(|entry| entry.chip(chip_id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
