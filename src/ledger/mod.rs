//! Ledger domain models, persistence-friendly types, and helpers.

pub mod category;
pub mod filter;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod transaction;

pub use category::{categories_for, Category, CategoryInfo, BUILTIN_CATEGORIES};
pub use filter::{CategoryFilter, Filter, FilterController, KindFilter};
pub use ledger::Ledger;
pub use transaction::{
    parse_amount, parse_date, Transaction, TransactionDraft, TransactionKind, DATE_FORMAT,
    DEFAULT_DESCRIPTION,
};
