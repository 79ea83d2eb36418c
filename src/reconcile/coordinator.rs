//! Orchestration layer tying the staging pools, the ledger, and the calculator
//! together.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::calculator::CalculatorEngine;
use crate::config::{Config, LinkPolicy};
use crate::currency::round_cents;
use crate::domain::{
    BudgetEntry, Category, Chip, ChipOrigin, ChipRequest, DragPayload, Identifiable, Pool,
};
use crate::errors::{validate_amount, validate_title, ChipError, ChipResult};
use crate::ledger::{ChipCollection, LedgerStore};
use crate::reconcile::events::{BudgetCommand, BudgetEvent, BudgetObserver};

/// Owns every piece of budgeting state. Each method runs to completion and
/// either applies all of its changes or none of them.
pub struct ReconciliationCoordinator {
    config: Config,
    day_budget: ChipCollection,
    storage: ChipCollection,
    ledger: LedgerStore,
    calculator: CalculatorEngine,
    observers: Vec<Box<dyn BudgetObserver>>,
}

impl Default for ReconciliationCoordinator {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl ReconciliationCoordinator {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            day_budget: ChipCollection::new(Pool::DayBudget),
            storage: ChipCollection::new(Pool::Storage),
            ledger: LedgerStore::new(),
            calculator: CalculatorEngine::new(),
            observers: Vec::new(),
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn pool(&self, pool: Pool) -> &ChipCollection {
        match pool {
            Pool::DayBudget => &self.day_budget,
            Pool::Storage => &self.storage,
        }
    }

    fn pool_mut(&mut self, pool: Pool) -> &mut ChipCollection {
        match pool {
            Pool::DayBudget => &mut self.day_budget,
            Pool::Storage => &mut self.storage,
        }
    }

    pub fn day_budget(&self) -> &ChipCollection {
        &self.day_budget
    }

    pub fn storage(&self) -> &ChipCollection {
        &self.storage
    }

    pub fn ledger(&self) -> &LedgerStore {
        &self.ledger
    }

    pub fn calculator(&self) -> &CalculatorEngine {
        &self.calculator
    }

    pub fn calculator_mut(&mut self) -> &mut CalculatorEngine {
        &mut self.calculator
    }

    /// Registers an observer that is told about every completed change.
    pub fn subscribe(&mut self, observer: impl BudgetObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    /// Creates a chip, or amends an existing one when `request.is_update`.
    ///
    /// Amendments are written to the named pool and, under
    /// [`LinkPolicy::LiveLinked`], into every committed entry holding a chip
    /// with the same id. An id found nowhere is reported as not found and
    /// nothing changes.
    pub fn create_or_update_chip(&mut self, request: ChipRequest) -> ChipResult<Chip> {
        let is_update = request.is_update;
        let chip = if is_update {
            self.amend_chip(&request)?
        } else {
            self.mint_chip(request)?
        };
        let event = if is_update {
            BudgetEvent::ChipUpdated(chip.clone())
        } else {
            BudgetEvent::ChipCreated(chip.clone())
        };
        self.emit(&event);
        Ok(chip)
    }

    fn mint_chip(&mut self, request: ChipRequest) -> ChipResult<Chip> {
        let chip = Chip::validated(
            &request.title,
            request.amount,
            request.category,
            request.pool,
        )?
        .with_date(request.date);
        if chip.pool == Pool::Storage && chip.date.is_none() {
            return Err(ChipError::Validation("storage chips need a date".into()));
        }
        let chip = self.pool_mut(request.pool).add_chip(chip)?;
        tracing::debug!(
            chip_id = %chip.id,
            pool = %chip.pool,
            amount = chip.amount,
            "created chip"
        );
        Ok(chip)
    }

    fn amend_chip(&mut self, request: &ChipRequest) -> ChipResult<Chip> {
        let id = request
            .id
            .ok_or_else(|| ChipError::Validation("update request carries no chip id".into()))?;
        let amount = validate_amount(request.amount)?;

        let live_linked = self.config.link_policy == LinkPolicy::LiveLinked;
        let in_pool = self.pool(request.pool).contains(id);
        let in_ledger = live_linked && self.ledger.find_chip(id).is_some();
        if !in_pool && !in_ledger {
            return Err(ChipError::ChipNotFound(id));
        }

        let pooled = if in_pool {
            Some(self.pool_mut(request.pool).update(id, amount)?)
        } else {
            None
        };
        let touched = if live_linked {
            self.ledger.propagate_chip_edit(id, amount)?
        } else {
            0
        };
        tracing::debug!(chip_id = %id, amount, in_pool, entries = touched, "updated chip");

        pooled
            .or_else(|| self.ledger.find_chip(id).cloned())
            .ok_or(ChipError::ChipNotFound(id))
    }

    /// Removes a staged chip. Committed copies in the ledger are untouched.
    pub fn remove_chip(&mut self, id: Uuid, pool: Pool) -> Option<Chip> {
        let removed = self.pool_mut(pool).remove(id);
        match &removed {
            Some(chip) => {
                tracing::debug!(chip_id = %id, %pool, "removed chip");
                self.emit(&BudgetEvent::ChipRemoved {
                    chip: chip.clone(),
                    pool,
                });
            }
            None => tracing::debug!(chip_id = %id, %pool, "remove ignored, chip not staged"),
        }
        removed
    }

    /// Commits chips under `date` and clears exactly those ids from the
    /// day-budget pool. Chips staged after the submission was prepared stay.
    /// Titles are trimmed and amounts rounded to cents before committing.
    pub fn submit_day_budget(
        &mut self,
        date: NaiveDate,
        mut chips: Vec<Chip>,
    ) -> ChipResult<BudgetEntry> {
        if chips.is_empty() {
            return Err(ChipError::Validation(
                "a day budget needs at least one chip".into(),
            ));
        }
        for chip in &mut chips {
            chip.title = validate_title(&chip.title)?;
            chip.amount = validate_amount(chip.amount)?;
        }

        let ids: Vec<Uuid> = chips.iter().map(|chip| chip.id).collect();
        let entry = self.ledger.upsert(date, chips);
        let cleared = self.day_budget.remove_many(&ids);
        tracing::info!(%date, submitted = ids.len(), cleared, "submitted day budget");

        self.emit(&BudgetEvent::BudgetSubmitted(entry.clone()));
        Ok(entry)
    }

    /// Commits everything currently staged in the day-budget pool.
    pub fn submit_staged_day_budget(&mut self, date: NaiveDate) -> ChipResult<BudgetEntry> {
        let chips: Vec<Chip> = self.day_budget.iter().cloned().collect();
        self.submit_day_budget(date, chips)
    }

    pub fn delete_entry(&mut self, entry_id: Uuid) -> Option<BudgetEntry> {
        let removed = self.ledger.delete(entry_id);
        if let Some(entry) = &removed {
            self.emit(&BudgetEvent::EntryDeleted(entry.clone()));
        }
        removed
    }

    /// Committed totals plus both staging pools.
    pub fn grand_total(&self) -> f64 {
        round_cents(
            self.ledger.grand_total() + self.day_budget.signed_total() + self.storage.signed_total(),
        )
    }

    /// Snapshot of every chip in both pools and all entries, tagged with where
    /// it lives. Each call walks the current state afresh.
    pub fn all_chips(&self) -> impl Iterator<Item = (ChipOrigin, Chip)> + '_ {
        let day_budget = self
            .day_budget
            .iter()
            .map(|chip| (ChipOrigin::DayBudget, chip.clone()));
        let storage = self
            .storage
            .iter()
            .map(|chip| (ChipOrigin::Storage, chip.clone()));
        let committed = self.ledger.entries().flat_map(|entry| {
            let origin = ChipOrigin::Entry {
                entry_id: entry.id(),
                date: entry.date(),
            };
            entry.chips().iter().map(move |chip| (origin, chip.clone()))
        });
        day_budget.chain(storage).chain(committed)
    }

    /// Handles a chip dropped on the calculator display.
    pub fn drop_on_calculator(&mut self, payload: &str) -> ChipResult<Chip> {
        let chip = DragPayload::parse(payload)?.into_chip()?;
        self.calculator.absorb_chip(&chip);
        tracing::debug!(chip_id = %chip.id, amount = chip.amount, "calculator consumed chip");
        Ok(chip)
    }

    /// Mints a new chip from the calculator result, then closes the chip action.
    pub fn mint_from_calculator(
        &mut self,
        title: &str,
        category: Category,
        pool: Pool,
        date: Option<NaiveDate>,
    ) -> ChipResult<Chip> {
        let request = self.calculator.mint_request(title, category, pool, date);
        let chip = self.create_or_update_chip(request)?;
        self.calculator.dismiss_chip_action();
        Ok(chip)
    }

    /// Overwrites a consumed chip with the calculator result, then closes the
    /// chip action.
    pub fn amend_from_calculator(&mut self, chip_id: Uuid) -> ChipResult<Chip> {
        let request = self
            .calculator
            .amend_request(chip_id)
            .ok_or(ChipError::ChipNotFound(chip_id))?;
        let chip = self.create_or_update_chip(request)?;
        self.calculator.dismiss_chip_action();
        Ok(chip)
    }

    /// Applies a command and returns the resulting event. Observers see the
    /// same event.
    pub fn dispatch(&mut self, command: BudgetCommand) -> ChipResult<BudgetEvent> {
        let event = match command {
            BudgetCommand::CreateChip(request) => {
                let is_update = request.is_update;
                let chip = self.create_or_update_chip(request)?;
                if is_update {
                    BudgetEvent::ChipUpdated(chip)
                } else {
                    BudgetEvent::ChipCreated(chip)
                }
            }
            BudgetCommand::RemoveChip { id, pool } => match self.remove_chip(id, pool) {
                Some(chip) => BudgetEvent::ChipRemoved { chip, pool },
                None => BudgetEvent::Unchanged,
            },
            BudgetCommand::SubmitBudget { date, chips } => {
                BudgetEvent::BudgetSubmitted(self.submit_day_budget(date, chips)?)
            }
            BudgetCommand::DeleteEntry { entry_id } => match self.delete_entry(entry_id) {
                Some(entry) => BudgetEvent::EntryDeleted(entry),
                None => BudgetEvent::Unchanged,
            },
        };
        Ok(event)
    }

    /// Chip-creator and calculator-popup entry point. A stale update target is
    /// a no-op (`Ok(None)`); validation failures are still reported.
    pub fn on_create_chip(&mut self, request: ChipRequest) -> ChipResult<Option<Chip>> {
        match self.create_or_update_chip(request) {
            Ok(chip) => Ok(Some(chip)),
            Err(err) if err.is_not_found() => {
                tracing::debug!(error = %err, "ignoring chip request for a vanished chip");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub fn on_remove_chip(&mut self, id: Uuid, pool: Pool) {
        self.remove_chip(id, pool);
    }

    pub fn on_submit_budget(
        &mut self,
        date: NaiveDate,
        chips: Vec<Chip>,
    ) -> ChipResult<BudgetEntry> {
        self.submit_day_budget(date, chips)
    }

    pub fn on_delete_entry(&mut self, entry_id: Uuid) {
        self.delete_entry(entry_id);
    }

    fn emit(&mut self, event: &BudgetEvent) {
        for observer in &mut self.observers {
            observer.notify(event);
        }
    }
}
