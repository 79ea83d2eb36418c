//! Four-function calculator that can absorb chips and mint or amend them
//! from its result.

use std::fmt;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::calculator::display::{format_for_display, number_to_text};
use crate::config::Config;
use crate::domain::{Category, Chip, ChipRequest, Pool};
use crate::errors::{ChipError, ChipResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    /// Division by zero yields `0` rather than an error or infinity.
    pub fn apply(self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Subtract => lhs - rhs,
            Operator::Multiply => lhs * rhs,
            Operator::Divide => {
                if rhs == 0.0 {
                    0.0
                } else {
                    lhs / rhs
                }
            }
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' | '−' => Some(Operator::Subtract),
            '*' | '×' => Some(Operator::Multiply),
            '/' | '÷' => Some(Operator::Divide),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '−',
            Operator::Multiply => '×',
            Operator::Divide => '÷',
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Coarse state of the keypad, derived from the engine fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculatorPhase {
    Idle,
    OperandEntry,
    AwaitingOperator,
    OperatorSet,
}

/// Raised by `equals` when the finished computation used dropped chips.
#[derive(Debug, Clone, PartialEq)]
pub enum CalculatorSignal {
    ResultReady { result: f64, consumed: Vec<Uuid> },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorEngine {
    display: String,
    pending_operand: Option<f64>,
    pending_operator: Option<Operator>,
    awaiting_fresh_input: bool,
    consumed_chips: Vec<Chip>,
    chip_action_ready: bool,
}

impl Default for CalculatorEngine {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            pending_operand: None,
            pending_operator: None,
            awaiting_fresh_input: false,
            consumed_chips: Vec::new(),
            chip_action_ready: false,
        }
    }
}

impl CalculatorEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn display(&self) -> &str {
        &self.display
    }

    /// Display text after the display-only scientific transform.
    pub fn formatted_display(&self, config: &Config) -> String {
        format_for_display(&self.display, config)
    }

    /// Numeric value of the display.
    pub fn value(&self) -> f64 {
        self.display.parse().unwrap_or(0.0)
    }

    pub fn pending_operand(&self) -> Option<f64> {
        self.pending_operand
    }

    pub fn pending_operator(&self) -> Option<Operator> {
        self.pending_operator
    }

    pub fn awaiting_fresh_input(&self) -> bool {
        self.awaiting_fresh_input
    }

    pub fn consumed_chips(&self) -> &[Chip] {
        &self.consumed_chips
    }

    pub fn has_consumed(&self, chip_id: Uuid) -> bool {
        self.consumed_chips.iter().any(|chip| chip.id == chip_id)
    }

    /// Whether the "update existing / create new" choice should be offered.
    pub fn chip_action_ready(&self) -> bool {
        self.chip_action_ready
    }

    pub fn phase(&self) -> CalculatorPhase {
        match (self.pending_operator, self.awaiting_fresh_input) {
            (Some(_), true) => CalculatorPhase::OperatorSet,
            (Some(_), false) => CalculatorPhase::OperandEntry,
            (None, true) => CalculatorPhase::AwaitingOperator,
            (None, false) if self.display == "0" => CalculatorPhase::Idle,
            (None, false) => CalculatorPhase::OperandEntry,
        }
    }

    pub fn input_digit(&mut self, digit: u8) -> ChipResult<()> {
        if digit > 9 {
            return Err(ChipError::Validation(format!("not a digit: {digit}")));
        }
        let digit = char::from(b'0' + digit);
        if self.awaiting_fresh_input {
            self.display = digit.to_string();
            self.awaiting_fresh_input = false;
        } else if self.display == "0" {
            self.display = digit.to_string();
        } else {
            self.display.push(digit);
        }
        Ok(())
    }

    /// A second decimal point in the same operand is ignored.
    pub fn input_decimal(&mut self) {
        if self.awaiting_fresh_input {
            self.display = "0.".to_string();
            self.awaiting_fresh_input = false;
        } else if !self.display.contains('.') {
            self.display.push('.');
        }
    }

    /// Stores the operator, folding any pending operation first so chains
    /// evaluate left to right.
    pub fn press_operator(&mut self, operator: Operator) {
        let current = self.value();
        match (self.pending_operand, self.pending_operator) {
            (None, _) => self.pending_operand = Some(current),
            (Some(operand), Some(pending)) => {
                let folded = pending.apply(operand, current);
                self.display = number_to_text(folded);
                self.pending_operand = Some(folded);
            }
            (Some(_), None) => {}
        }
        self.pending_operator = Some(operator);
        self.awaiting_fresh_input = true;
    }

    pub fn equals(&mut self) -> Option<CalculatorSignal> {
        let (operand, operator) = match (self.pending_operand, self.pending_operator) {
            (Some(operand), Some(operator)) => (operand, operator),
            _ => return None,
        };
        let result = operator.apply(operand, self.value());
        self.display = number_to_text(result);
        self.pending_operand = None;
        self.pending_operator = None;
        self.awaiting_fresh_input = true;

        if self.consumed_chips.is_empty() {
            return None;
        }
        self.chip_action_ready = true;
        Some(CalculatorSignal::ResultReady {
            result: self.value(),
            consumed: self.consumed_chips.iter().map(|chip| chip.id).collect(),
        })
    }

    /// Divides the display by 100 without touching the pending operation.
    pub fn percent(&mut self) {
        self.display = number_to_text(self.value() / 100.0);
    }

    pub fn toggle_sign(&mut self) {
        self.display = number_to_text(-self.value());
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Loads a dropped chip's magnitude into the display. The category sign
    /// is not applied. Absorbing the same chip twice records it once.
    pub fn absorb_chip(&mut self, chip: &Chip) {
        self.display = number_to_text(chip.amount);
        self.awaiting_fresh_input = true;
        if !self.has_consumed(chip.id) {
            self.consumed_chips.push(chip.clone());
        }
    }

    /// Request minting a brand-new chip from the current result.
    pub fn mint_request(
        &self,
        title: &str,
        category: Category,
        pool: Pool,
        date: Option<NaiveDate>,
    ) -> ChipRequest {
        ChipRequest::create(title, self.value(), category, pool).with_date(date)
    }

    /// Request overwriting a consumed chip's amount with the current result.
    /// `None` when the chip was not consumed in this computation.
    pub fn amend_request(&self, chip_id: Uuid) -> Option<ChipRequest> {
        let chip = self.consumed_chips.iter().find(|chip| chip.id == chip_id)?;
        Some(ChipRequest {
            title: chip.title.clone(),
            category: chip.category,
            date: chip.date,
            ..ChipRequest::update(chip.id, self.value(), chip.pool)
        })
    }

    /// Old and new amount for a consumed chip, as listed in the update choice.
    pub fn amend_preview(&self, chip_id: Uuid) -> Option<(f64, f64)> {
        self.consumed_chips
            .iter()
            .find(|chip| chip.id == chip_id)
            .map(|chip| (chip.amount, self.value()))
    }

    /// Closes the chip-action choice and forgets consumed chips. Called after a
    /// successful mint or update, and when the user cancels.
    pub fn dismiss_chip_action(&mut self) {
        self.consumed_chips.clear();
        self.chip_action_ready = false;
    }
}
