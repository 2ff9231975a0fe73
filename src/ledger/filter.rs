//! User-selected restriction applied to the displayed and charted transactions.

use std::fmt;

use chrono::NaiveDate;
use tracing::{debug, warn};

use super::{
    category::Category,
    transaction::{Transaction, TransactionKind, DATE_FORMAT},
};

const ALL: &str = "all";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    Only(Category),
}

impl CategoryFilter {
    fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(Category::new(trimmed))
        }
    }

    fn matches(&self, category: &Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(expected) => expected == category,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum KindFilter {
    #[default]
    All,
    Only(TransactionKind),
}

impl KindFilter {
    fn parse(input: &str) -> Self {
        let trimmed = input.trim();
        if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(ALL) {
            return KindFilter::All;
        }
        match trimmed.parse::<TransactionKind>() {
            Ok(kind) => KindFilter::Only(kind),
            Err(_) => {
                warn!(input = trimmed, "unknown transaction type in filter, ignoring");
                KindFilter::All
            }
        }
    }

    fn matches(&self, kind: TransactionKind) -> bool {
        match self {
            KindFilter::All => true,
            KindFilter::Only(expected) => *expected == kind,
        }
    }
}

/// Inclusive date bounds plus exact category/kind matching. The default filter
/// lets every transaction through.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Filter {
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    pub category: CategoryFilter,
    pub kind: KindFilter,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds a filter from raw panel values. Empty or malformed dates mean
    /// "unbounded"; empty or `all` category/type mean "unrestricted".
    pub fn from_inputs(from_date: &str, to_date: &str, category: &str, kind: &str) -> Self {
        Self {
            from_date: parse_bound(from_date),
            to_date: parse_bound(to_date),
            category: CategoryFilter::parse(category),
            kind: KindFilter::parse(kind),
        }
    }

    pub fn between(mut self, from_date: Option<NaiveDate>, to_date: Option<NaiveDate>) -> Self {
        self.from_date = from_date;
        self.to_date = to_date;
        self
    }

    pub fn with_category(mut self, category: impl Into<Category>) -> Self {
        self.category = CategoryFilter::Only(category.into());
        self
    }

    pub fn with_kind(mut self, kind: TransactionKind) -> Self {
        self.kind = KindFilter::Only(kind);
        self
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        if let Some(from) = self.from_date {
            if transaction.date < from {
                return false;
            }
        }
        // Dates carry no time, so `<=` covers the whole `to` day.
        if let Some(to) = self.to_date {
            if transaction.date > to {
                return false;
            }
        }
        self.category.matches(&transaction.category) && self.kind.matches(transaction.kind)
    }

    pub fn is_unrestricted(&self) -> bool {
        self == &Filter::default()
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unrestricted() {
            return f.write_str("none");
        }
        let mut parts = Vec::new();
        if let Some(from) = self.from_date {
            parts.push(format!("from {}", from.format(DATE_FORMAT)));
        }
        if let Some(to) = self.to_date {
            parts.push(format!("to {}", to.format(DATE_FORMAT)));
        }
        if let CategoryFilter::Only(category) = &self.category {
            parts.push(format!("category {}", category.label()));
        }
        if let KindFilter::Only(kind) = self.kind {
            parts.push(format!("type {}", kind.as_str()));
        }
        f.write_str(&parts.join(", "))
    }
}

fn parse_bound(input: &str) -> Option<NaiveDate> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(_) => {
            warn!(input = trimmed, "malformed filter date, treating as unbounded");
            None
        }
    }
}

/// Holds the single active filter. Applying replaces it wholesale.
#[derive(Debug, Clone, Default)]
pub struct FilterController {
    active: Filter,
}

impl FilterController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn active(&self) -> &Filter {
        &self.active
    }

    pub fn apply(&mut self, filter: Filter) {
        debug!(filter = %filter, "applying filter");
        self.active = filter;
    }

    pub fn reset(&mut self) {
        debug!("resetting filter");
        self.active = Filter::default();
    }
}
