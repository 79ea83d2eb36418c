#![allow(dead_code)]

use std::{cell::RefCell, rc::Rc};

use budget_chips::{
    BudgetEvent, Category, Chip, ChipRequest, Config, Pool, ReconciliationCoordinator,
};
use chrono::NaiveDate;

/// Coordinator with default preferences and a recorder for every emitted event.
pub fn setup_coordinator() -> (ReconciliationCoordinator, Rc<RefCell<Vec<BudgetEvent>>>) {
    setup_with_config(Config::default())
}

pub fn setup_with_config(
    config: Config,
) -> (ReconciliationCoordinator, Rc<RefCell<Vec<BudgetEvent>>>) {
    let mut coordinator = ReconciliationCoordinator::new(config);
    let events = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&events);
    coordinator.subscribe(move |event: &BudgetEvent| sink.borrow_mut().push(event.clone()));
    (coordinator, events)
}

pub fn day(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, month, day).expect("valid date")
}

/// Stages a chip through the public create path. Storage chips are dated
/// 2024-06-01, as the chip creator requires a date for them.
pub fn stage(
    coordinator: &mut ReconciliationCoordinator,
    title: &str,
    amount: f64,
    category: Category,
    pool: Pool,
) -> Chip {
    let date = (pool == Pool::Storage).then(|| day(6, 1));
    coordinator
        .create_or_update_chip(ChipRequest::create(title, amount, category, pool).with_date(date))
        .expect("stage chip")
}
