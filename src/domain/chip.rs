//! Chip line items, creation/update requests, and the drag-and-drop payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::currency::round_cents;
use crate::domain::common::*;
use crate::errors::{validate_amount, validate_title, ChipResult};

/// A titled monetary line item. `amount` is an unsigned magnitude; the sign
/// comes from `category` when aggregating.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Chip {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub category: Category,
    pub pool: Pool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl Chip {
    /// Builds a chip with a fresh id. Callers accepting user input should go
    /// through [`Chip::validated`] instead.
    pub fn new(title: impl Into<String>, amount: f64, category: Category, pool: Pool) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: title.into(),
            amount: round_cents(amount),
            category,
            pool,
            date: None,
        }
    }

    /// Validates title and amount before building the chip.
    pub fn validated(title: &str, amount: f64, category: Category, pool: Pool) -> ChipResult<Self> {
        let title = validate_title(title)?;
        let amount = validate_amount(amount)?;
        Ok(Self::new(title, amount, category, pool))
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }

    /// Replaces the amount. The only mutation a chip supports after creation.
    pub(crate) fn set_amount(&mut self, amount: f64) {
        self.amount = round_cents(amount);
    }
}

impl Identifiable for Chip {
    fn id(&self) -> Uuid {
        self.id
    }
}

impl Amounted for Chip {
    fn amount(&self) -> f64 {
        self.amount
    }
}

impl SignedAmount for Chip {
    fn category(&self) -> Category {
        self.category
    }
}

impl Displayable for Chip {
    fn display_label(&self) -> String {
        format!(
            "{} {}{:.2} [{}]",
            self.title,
            self.category.sign_symbol(),
            self.amount,
            self.pool
        )
    }
}

/// Request sent by the chip creator form or the calculator popup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChipRequest {
    #[serde(default)]
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    pub amount: f64,
    #[serde(default)]
    pub category: Category,
    #[serde(default, alias = "type")]
    pub pool: Pool,
    #[serde(default, rename = "isUpdate", alias = "is_update")]
    pub is_update: bool,
    #[serde(default)]
    pub date: Option<NaiveDate>,
}

impl ChipRequest {
    pub fn create(title: impl Into<String>, amount: f64, category: Category, pool: Pool) -> Self {
        Self {
            id: None,
            title: title.into(),
            amount,
            category,
            pool,
            is_update: false,
            date: None,
        }
    }

    pub fn update(id: Uuid, amount: f64, pool: Pool) -> Self {
        Self {
            id: Some(id),
            title: String::new(),
            amount,
            category: Category::default(),
            pool,
            is_update: true,
            date: None,
        }
    }

    pub fn with_date(mut self, date: Option<NaiveDate>) -> Self {
        self.date = date;
        self
    }
}

/// Serialized chip carried by the platform's drag-and-drop text channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DragPayload {
    pub id: Uuid,
    pub title: String,
    pub amount: f64,
    pub category: Category,
    #[serde(alias = "type")]
    pub pool: Pool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl DragPayload {
    pub fn encode(&self) -> ChipResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn parse(raw: &str) -> ChipResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Rebuilds the chip reference, rejecting payloads that would not pass
    /// the creation checks.
    pub fn into_chip(self) -> ChipResult<Chip> {
        let title = validate_title(&self.title)?;
        let amount = validate_amount(self.amount)?;
        Ok(Chip {
            id: self.id,
            title,
            amount,
            category: self.category,
            pool: self.pool,
            date: self.date,
        })
    }
}

impl From<&Chip> for DragPayload {
    fn from(chip: &Chip) -> Self {
        Self {
            id: chip.id,
            title: chip.title.clone(),
            amount: chip.amount,
            category: chip.category,
            pool: chip.pool,
            date: chip.date,
        }
    }
}
