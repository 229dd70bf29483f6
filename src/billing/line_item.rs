use serde::{Deserialize, Serialize};

/// One billable row on an invoice or recurring template: a quantity priced at
/// a unit rate, the line's own tax rate, and an optional per-line discount
/// amount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub quantity: f64,
    pub unit_price: f64,
    /// Percentage in `[0, 100]`, consulted only under [`TaxMode::PerLine`].
    #[serde(default)]
    pub tax_rate: f64,
    /// Absolute discount for this row alone, clamped to the row's gross value
    /// when totals are computed.
    #[serde(default)]
    pub line_discount: f64,
}

impl LineItem {
    pub fn new(quantity: f64, unit_price: f64) -> Self {
        Self {
            quantity,
            unit_price,
            tax_rate: 0.0,
            line_discount: 0.0,
        }
    }

    pub fn with_tax_rate(mut self, rate: f64) -> Self {
        self.tax_rate = rate;
        self
    }

    pub fn with_line_discount(mut self, amount: f64) -> Self {
        self.line_discount = amount;
        self
    }

    /// Quantity times unit price before any discount, with malformed numbers
    /// coerced to zero.
    pub fn gross(&self) -> f64 {
        sanitize(self.quantity) * sanitize(self.unit_price)
    }
}

/// Line row as the form or API layer supplies it. Missing fields normalize to
/// zero rather than failing the whole document.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LineItemInput {
    pub quantity: Option<f64>,
    pub unit_price: Option<f64>,
    pub tax_rate: Option<f64>,
    pub line_discount: Option<f64>,
}

impl LineItemInput {
    /// Coerces the loose payload into a well-formed line item.
    pub fn normalize(&self) -> LineItem {
        LineItem {
            quantity: sanitize(self.quantity.unwrap_or(0.0)),
            unit_price: sanitize(self.unit_price.unwrap_or(0.0)),
            tax_rate: clamp_percent(self.tax_rate.unwrap_or(0.0)),
            line_discount: sanitize(self.line_discount.unwrap_or(0.0)),
        }
    }
}

/// How the document-level discount value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DiscountMode {
    /// Fixed amount subtracted from the line subtotal.
    #[default]
    Amount,
    /// Percentage of the line subtotal.
    Percent,
}

/// Document-level discount applied to the line subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Discount {
    pub mode: DiscountMode,
    #[serde(default)]
    pub value: f64,
}

impl Discount {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn amount(value: f64) -> Self {
        Self {
            mode: DiscountMode::Amount,
            value,
        }
    }

    pub fn percent(value: f64) -> Self {
        Self {
            mode: DiscountMode::Percent,
            value,
        }
    }
}

/// Which tax formula applies to the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// Each row's own `tax_rate` applies to that row's gross value.
    #[default]
    PerLine,
    /// One rate applies to the discounted taxable base; row rates are ignored.
    Global,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct TaxPolicy {
    pub mode: TaxMode,
    /// Percentage in `[0, 100]`, consulted only under [`TaxMode::Global`].
    #[serde(default)]
    pub global_rate: f64,
}

impl TaxPolicy {
    pub fn per_line() -> Self {
        Self::default()
    }

    pub fn global(rate: f64) -> Self {
        Self {
            mode: TaxMode::Global,
            global_rate: rate,
        }
    }
}

/// Coerces NaN, infinities, and negative magnitudes to zero.
pub(crate) fn sanitize(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Sanitizes and caps a percentage at 100.
pub(crate) fn clamp_percent(value: f64) -> f64 {
    sanitize(value).min(100.0)
}
