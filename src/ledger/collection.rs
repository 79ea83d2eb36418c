use serde::Serialize;
use uuid::Uuid;

use crate::currency::signed_sum;
use crate::domain::{Category, Chip, Pool};
use crate::errors::{validate_amount, validate_title, ChipError, ChipResult};

/// Staged chips belonging to one pool, kept in insertion order.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
pub struct ChipCollection {
    pool: Pool,
    chips: Vec<Chip>,
}

impl ChipCollection {
    pub fn new(pool: Pool) -> Self {
        Self {
            pool,
            chips: Vec::new(),
        }
    }

    pub fn pool(&self) -> Pool {
        self.pool
    }

    /// Validates and inserts a new chip with a freshly generated id.
    pub fn add(&mut self, title: &str, amount: f64, category: Category) -> ChipResult<Chip> {
        let chip = Chip::validated(title, amount, category, self.pool)?;
        self.chips.push(chip.clone());
        Ok(chip)
    }

    /// Inserts a chip built elsewhere, re-tagging it with this pool. An
    /// existing chip with the same id is replaced.
    pub fn add_chip(&mut self, mut chip: Chip) -> ChipResult<Chip> {
        chip.title = validate_title(&chip.title)?;
        chip.amount = validate_amount(chip.amount)?;
        chip.pool = self.pool;
        match self.chips.iter_mut().find(|existing| existing.id == chip.id) {
            Some(existing) => *existing = chip.clone(),
            None => self.chips.push(chip.clone()),
        }
        Ok(chip)
    }

    /// Replaces the amount of the chip with `id`.
    pub fn update(&mut self, id: Uuid, new_amount: f64) -> ChipResult<Chip> {
        let amount = validate_amount(new_amount)?;
        let chip = self
            .chips
            .iter_mut()
            .find(|chip| chip.id == id)
            .ok_or(ChipError::ChipNotFound(id))?;
        chip.set_amount(amount);
        Ok(chip.clone())
    }

    /// Removes the chip with `id`; removing an absent id is a no-op.
    pub fn remove(&mut self, id: Uuid) -> Option<Chip> {
        let index = self.chips.iter().position(|chip| chip.id == id)?;
        Some(self.chips.remove(index))
    }

    /// Removes exactly the listed ids, leaving every other chip in place.
    pub fn remove_many(&mut self, ids: &[Uuid]) -> usize {
        let before = self.chips.len();
        self.chips.retain(|chip| !ids.contains(&chip.id));
        before - self.chips.len()
    }

    pub fn signed_total(&self) -> f64 {
        signed_sum(&self.chips)
    }

    pub fn get(&self, id: Uuid) -> Option<&Chip> {
        self.chips.iter().find(|chip| chip.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Chip> {
        self.chips.iter()
    }

    pub fn len(&self) -> usize {
        self.chips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signed_total_tracks_adds_and_removes() {
        let mut pool = ChipCollection::new(Pool::DayBudget);
        let groceries = pool.add("Groceries", 50.0, Category::Expense).unwrap();
        pool.add("Paycheck", 200.0, Category::Income).unwrap();
        assert_eq!(pool.signed_total(), 150.0);

        pool.remove(groceries.id);
        assert_eq!(pool.signed_total(), 200.0);
    }

    #[test]
    fn add_rejects_invalid_input_without_mutation() {
        let mut pool = ChipCollection::new(Pool::Storage);
        assert!(pool.add("", 1.0, Category::Expense).is_err());
        assert!(pool.add("Fuel", f64::NAN, Category::Expense).is_err());
        assert!(pool.add("Fuel", -3.0, Category::Expense).is_err());
        assert!(pool.is_empty());
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let mut pool = ChipCollection::new(Pool::DayBudget);
        let err = pool
            .update(Uuid::new_v4(), 10.0)
            .expect_err("update must fail for unknown id");
        assert!(matches!(err, ChipError::ChipNotFound(_)));
    }

    #[test]
    fn update_is_idempotent() {
        let mut pool = ChipCollection::new(Pool::DayBudget);
        let chip = pool.add("Coffee", 3.0, Category::Expense).unwrap();

        pool.update(chip.id, 4.25).unwrap();
        let once = pool.clone();
        pool.update(chip.id, 4.25).unwrap();
        assert_eq!(pool, once);
    }

    #[test]
    fn removing_absent_chip_leaves_state_unchanged() {
        let mut pool = ChipCollection::new(Pool::DayBudget);
        pool.add("Bus", 2.75, Category::Expense).unwrap();
        let before = pool.clone();

        assert!(pool.remove(Uuid::new_v4()).is_none());
        assert_eq!(pool, before);
    }

    #[test]
    fn remove_many_only_drops_listed_ids() {
        let mut pool = ChipCollection::new(Pool::DayBudget);
        let a = pool.add("A", 1.0, Category::Expense).unwrap();
        let b = pool.add("B", 2.0, Category::Expense).unwrap();
        let c = pool.add("C", 3.0, Category::Income).unwrap();

        assert_eq!(pool.remove_many(&[a.id, c.id]), 2);
        assert_eq!(pool.len(), 1);
        assert!(pool.contains(b.id));
    }

    #[test]
    fn add_chip_retags_pool() {
        let mut pool = ChipCollection::new(Pool::Storage);
        let chip = Chip::new("Savings", 100.0, Category::Income, Pool::DayBudget);
        let stored = pool.add_chip(chip).unwrap();
        assert_eq!(stored.pool, Pool::Storage);
        assert_eq!(pool.get(stored.id).map(|c| c.pool), Some(Pool::Storage));
    }

    #[test]
    fn oversized_amounts_never_reach_the_pool() {
        let mut pool = ChipCollection::new(Pool::Storage);
        assert!(pool.add("Yacht", 1e307, Category::Expense).is_err());

        let mut huge = Chip::new("Yacht", 1.0, Category::Expense, Pool::Storage);
        huge.amount = 1e307;
        assert!(matches!(pool.add_chip(huge), Err(ChipError::Validation(_))));

        let fuel = pool.add("Fuel", 40.0, Category::Expense).unwrap();
        assert!(pool.update(fuel.id, 1e307).is_err());
        assert_eq!(pool.get(fuel.id).unwrap().amount, 40.0);
        assert_eq!(pool.signed_total(), -40.0);
    }
}
