#![doc(test(attr(deny(warnings))))]

//! Expense Tracker keeps a personal ledger of income and expense
//! transactions, derives filtered views, totals and chart series from it, and
//! converts amounts between currencies using a live rate table.

pub mod cli;
pub mod config;
pub mod core;
pub mod currency;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("expense tracker tracing initialized");
    });
}
