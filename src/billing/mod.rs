//! Invoice documents and the totals engine they share.

pub mod document;
pub mod line_item;
pub mod totals;

pub use document::{Invoice, RecurringTemplate};
pub use line_item::{Discount, DiscountMode, LineItem, LineItemInput, TaxMode, TaxPolicy};
pub use totals::{compute_totals, LineDiscountPolicy, Totals};
