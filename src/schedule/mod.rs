//! Recurrence rules and the occurrence advancer behind recurring invoices.

pub mod advancer;
pub mod rule;

pub use advancer::{next_occurrence, next_occurrence_today, upcoming, MAX_ADVANCE_STEPS};
pub use rule::{Frequency, RecurrenceRule, RecurrenceRuleInput};
