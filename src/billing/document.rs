use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::line_item::{Discount, LineItem, TaxPolicy};
use super::totals::{compute_totals, LineDiscountPolicy, Totals};
use crate::currency::CurrencyCode;
use crate::schedule::{next_occurrence, next_occurrence_today, RecurrenceRule};

fn default_active() -> bool {
    true
}

/// A priced, issued document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: Uuid,
    pub number: String,
    pub issued_on: NaiveDate,
    #[serde(default)]
    pub currency: CurrencyCode,
    pub lines: Vec<LineItem>,
    #[serde(default)]
    pub discount: Discount,
    #[serde(default)]
    pub tax: TaxPolicy,
    #[serde(default)]
    pub shipping: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Invoice {
    pub fn new(number: impl Into<String>, issued_on: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            number: number.into(),
            issued_on,
            currency: CurrencyCode::default(),
            lines: Vec::new(),
            discount: Discount::none(),
            tax: TaxPolicy::default(),
            shipping: 0.0,
            notes: None,
        }
    }

    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_tax(mut self, tax: TaxPolicy) -> Self {
        self.tax = tax;
        self
    }

    pub fn with_shipping(mut self, shipping: f64) -> Self {
        self.shipping = shipping;
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn push_line(&mut self, line: LineItem) {
        self.lines.push(line);
    }

    /// Invoice rows honor their per-line discount column.
    pub fn totals(&self) -> Totals {
        compute_totals(
            &self.lines,
            &self.discount,
            self.shipping,
            &self.tax,
            LineDiscountPolicy::Honor,
        )
    }
}

/// A template that stamps out invoices on a recurrence schedule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringTemplate {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub currency: CurrencyCode,
    pub lines: Vec<LineItem>,
    #[serde(default)]
    pub discount: Discount,
    #[serde(default)]
    pub tax: TaxPolicy,
    #[serde(default)]
    pub shipping: f64,
    pub rule: RecurrenceRule,
    #[serde(default = "default_active")]
    pub active: bool,
}

impl RecurringTemplate {
    pub fn new(name: impl Into<String>, rule: RecurrenceRule) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            currency: CurrencyCode::default(),
            lines: Vec::new(),
            discount: Discount::none(),
            tax: TaxPolicy::default(),
            shipping: 0.0,
            rule,
            active: true,
        }
    }

    pub fn with_currency(mut self, currency: CurrencyCode) -> Self {
        self.currency = currency;
        self
    }

    pub fn with_discount(mut self, discount: Discount) -> Self {
        self.discount = discount;
        self
    }

    pub fn with_tax(mut self, tax: TaxPolicy) -> Self {
        self.tax = tax;
        self
    }

    pub fn with_shipping(mut self, shipping: f64) -> Self {
        self.shipping = shipping;
        self
    }

    pub fn push_line(&mut self, line: LineItem) {
        self.lines.push(line);
    }

    pub fn pause(&mut self) {
        self.active = false;
    }

    pub fn resume(&mut self) {
        self.active = true;
    }

    /// Template rows have no per-line discount column, so none are applied.
    pub fn totals(&self) -> Totals {
        compute_totals(
            &self.lines,
            &self.discount,
            self.shipping,
            &self.tax,
            LineDiscountPolicy::Ignore,
        )
    }

    /// Next date this template should issue an invoice, or `None` when the
    /// template is paused or its schedule has run out.
    pub fn next_run(&self, as_of: NaiveDate) -> Option<NaiveDate> {
        if !self.active {
            return None;
        }
        next_occurrence(&self.rule, as_of)
    }

    pub fn next_run_today(&self) -> Option<NaiveDate> {
        if !self.active {
            return None;
        }
        next_occurrence_today(&self.rule)
    }
}
