use std::{collections::HashMap, fmt};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use super::transaction::TransactionKind;

/// Free-form category tag attached to every transaction (`food`, `salary`, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Display label for known tags; unknown tags are shown verbatim.
    pub fn label(&self) -> &str {
        CATEGORY_INDEX
            .get(self.0.as_str())
            .map(|info| info.label)
            .unwrap_or(self.0.as_str())
    }

    /// Kind the category is normally booked under, if it is a built-in tag.
    pub fn default_kind(&self) -> Option<TransactionKind> {
        CATEGORY_INDEX.get(self.0.as_str()).map(|info| info.kind)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct CategoryInfo {
    pub tag: &'static str,
    pub label: &'static str,
    pub kind: TransactionKind,
}

const fn info(tag: &'static str, label: &'static str, kind: TransactionKind) -> CategoryInfo {
    CategoryInfo { tag, label, kind }
}

/// Built-in categories in form display order.
pub const BUILTIN_CATEGORIES: &[CategoryInfo] = &[
    info("salary", "Salary", TransactionKind::Income),
    info("freelance", "Freelance", TransactionKind::Income),
    info("investment", "Investment", TransactionKind::Income),
    info("gift", "Gift", TransactionKind::Income),
    info("other-income", "Other Income", TransactionKind::Income),
    info("food", "Food & Dining", TransactionKind::Expense),
    info("transport", "Transport", TransactionKind::Expense),
    info("bills", "Bills & Utilities", TransactionKind::Expense),
    info("entertainment", "Entertainment", TransactionKind::Expense),
    info("shopping", "Shopping", TransactionKind::Expense),
    info("health", "Health & Fitness", TransactionKind::Expense),
    info("housing", "Housing", TransactionKind::Expense),
    info("education", "Education", TransactionKind::Expense),
    info("travel", "Travel", TransactionKind::Expense),
    info("other-expense", "Other Expense", TransactionKind::Expense),
];

static CATEGORY_INDEX: Lazy<HashMap<&'static str, CategoryInfo>> = Lazy::new(|| {
    BUILTIN_CATEGORIES
        .iter()
        .map(|info| (info.tag, *info))
        .collect()
});

/// Built-in categories for a given kind, in display order.
pub fn categories_for(kind: TransactionKind) -> impl Iterator<Item = &'static CategoryInfo> {
    BUILTIN_CATEGORIES
        .iter()
        .filter(move |info| info.kind == kind)
}
