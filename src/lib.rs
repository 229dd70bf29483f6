#![doc(test(attr(deny(warnings))))]

//! Invoice Core offers the totals and recurrence primitives that power
//! invoicing workflows: line-item arithmetic, document totals, and recurring
//! schedule advancement.

pub mod billing;
pub mod config;
pub mod currency;
pub mod errors;
pub mod schedule;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Invoice Core tracing initialized.");
    });
}
