use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::currency::signed_sum;
use crate::domain::chip::Chip;
use crate::domain::common::{Displayable, Identifiable};

/// A committed, date-keyed group of chip snapshots with a precomputed total.
///
/// `total` always equals the signed sum of `chips`; the fields are private so
/// every mutation path recomputes it before returning.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct BudgetEntry {
    id: Uuid,
    date: NaiveDate,
    chips: Vec<Chip>,
    total: f64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl BudgetEntry {
    /// Builds an entry holding each chip id once; a later duplicate replaces
    /// the earlier copy.
    pub fn new(date: NaiveDate, chips: Vec<Chip>) -> Self {
        let now = Utc::now();
        let mut entry = Self {
            id: Uuid::new_v4(),
            date,
            chips: Vec::with_capacity(chips.len()),
            total: 0.0,
            created_at: now,
            updated_at: now,
        };
        entry.union(chips);
        entry.recompute_total();
        entry
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn chips(&self) -> &[Chip] {
        &self.chips
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn chip_count(&self) -> usize {
        self.chips.len()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn chip(&self, chip_id: Uuid) -> Option<&Chip> {
        self.chips.iter().find(|chip| chip.id == chip_id)
    }

    /// Appends chips to the entry. A chip whose id is already present is
    /// refreshed in place so the entry stays a union by id.
    pub fn merge(&mut self, chips: impl IntoIterator<Item = Chip>) {
        self.union(chips);
        self.recompute_total();
        self.touch();
    }

    /// Replaces the amount of the embedded chip with `chip_id`. Returns
    /// `false` when the entry does not contain it. Callers validate `amount`.
    pub(crate) fn amend_chip(&mut self, chip_id: Uuid, amount: f64) -> bool {
        let Some(chip) = self.chips.iter_mut().find(|chip| chip.id == chip_id) else {
            return false;
        };
        chip.set_amount(amount);
        self.recompute_total();
        self.touch();
        true
    }

    fn union(&mut self, chips: impl IntoIterator<Item = Chip>) {
        for chip in chips {
            match self.chips.iter_mut().find(|existing| existing.id == chip.id) {
                Some(existing) => *existing = chip,
                None => self.chips.push(chip),
            }
        }
    }

    fn recompute_total(&mut self) {
        self.total = signed_sum(&self.chips);
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Identifiable for BudgetEntry {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Displayable for BudgetEntry {
    fn display_label(&self) -> String {
        format!(
            "{} ({} items) {:.2}",
            self.date.format("%Y-%m-%d"),
            self.chips.len(),
            self.total
        )
    }
}
