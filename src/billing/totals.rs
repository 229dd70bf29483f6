use serde::{Deserialize, Serialize};

use super::line_item::{clamp_percent, sanitize, Discount, DiscountMode, LineItem, TaxMode, TaxPolicy};

/// Whether per-line discounts participate in the subtotal.
///
/// Invoice rows carry their own discount column; recurring-template rows do
/// not. Both forms share this one computation, with the capability made
/// explicit instead of duplicating the arithmetic per call site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineDiscountPolicy {
    Honor,
    Ignore,
}

/// Derived subtotal, tax, and grand-total figures.
///
/// Always recomputed from the raw rows after an edit; never cache one of these
/// alongside its inputs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct Totals {
    pub subtotal: f64,
    pub tax_total: f64,
    pub total_amount: f64,
}

impl Totals {
    pub fn zero() -> Self {
        Self::default()
    }
}

/// Computes document totals from priced rows plus discount, shipping, and tax
/// configuration.
///
/// Total function: malformed numbers coerce to zero and out-of-range
/// percentages clamp, so every input produces a deterministic result.
pub fn compute_totals(
    lines: &[LineItem],
    discount: &Discount,
    shipping: f64,
    tax: &TaxPolicy,
    line_discounts: LineDiscountPolicy,
) -> Totals {
    if lines.is_empty() {
        return Totals::zero();
    }

    let mut line_subtotal = 0.0;
    let mut per_line_tax = 0.0;
    for line in lines {
        let gross = line.gross();
        let line_discount = match line_discounts {
            LineDiscountPolicy::Honor => sanitize(line.line_discount).min(gross),
            LineDiscountPolicy::Ignore => 0.0,
        };
        line_subtotal += gross - line_discount;
        // Per-line tax is assessed on the gross row value; neither the row
        // discount nor the document discount feeds into it.
        per_line_tax += gross * clamp_percent(line.tax_rate) / 100.0;
    }

    let discount_amount = match discount.mode {
        DiscountMode::Percent => clamp_percent(discount.value) * line_subtotal / 100.0,
        DiscountMode::Amount => sanitize(discount.value).min(line_subtotal),
    };
    let taxable_base = (line_subtotal - discount_amount).max(0.0);

    let tax_total = match tax.mode {
        TaxMode::PerLine => per_line_tax,
        TaxMode::Global => taxable_base * clamp_percent(tax.global_rate) / 100.0,
    };

    Totals {
        subtotal: taxable_base,
        tax_total,
        total_amount: taxable_base + tax_total + sanitize(shipping),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worked_example_per_line_tax_on_gross() {
        let lines = vec![LineItem::new(2.0, 50.0)
            .with_tax_rate(10.0)
            .with_line_discount(0.0)];
        let totals = compute_totals(
            &lines,
            &Discount::amount(20.0),
            10.0,
            &TaxPolicy::per_line(),
            LineDiscountPolicy::Honor,
        );
        assert_eq!(totals.subtotal, 80.0);
        assert_eq!(totals.tax_total, 10.0);
        assert_eq!(totals.total_amount, 100.0);
    }

    #[test]
    fn empty_lines_zero_everything_including_shipping() {
        let totals = compute_totals(
            &[],
            &Discount::amount(20.0),
            15.0,
            &TaxPolicy::global(21.0),
            LineDiscountPolicy::Honor,
        );
        assert_eq!(totals, Totals::zero());
    }

    #[test]
    fn amount_discount_clamps_to_line_subtotal() {
        let lines = vec![LineItem::new(1.0, 40.0)];
        let totals = compute_totals(
            &lines,
            &Discount::amount(500.0),
            0.0,
            &TaxPolicy::per_line(),
            LineDiscountPolicy::Honor,
        );
        assert_eq!(totals.subtotal, 0.0);
        assert_eq!(totals.total_amount, 0.0);
    }

    #[test]
    fn ignore_policy_skips_row_discounts() {
        let lines = vec![LineItem::new(1.0, 100.0).with_line_discount(30.0)];
        let honored = compute_totals(
            &lines,
            &Discount::none(),
            0.0,
            &TaxPolicy::per_line(),
            LineDiscountPolicy::Honor,
        );
        let ignored = compute_totals(
            &lines,
            &Discount::none(),
            0.0,
            &TaxPolicy::per_line(),
            LineDiscountPolicy::Ignore,
        );
        assert_eq!(honored.subtotal, 70.0);
        assert_eq!(ignored.subtotal, 100.0);
    }
}
