//! Calculator engine and its display formatting.

pub mod display;
pub mod engine;

pub use display::{format_for_display, number_to_text};
pub use engine::{CalculatorEngine, CalculatorPhase, CalculatorSignal, Operator};
