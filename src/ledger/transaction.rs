use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::category::Category;
use crate::errors::LedgerError;

pub const DEFAULT_DESCRIPTION: &str = "No description";
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Income",
            TransactionKind::Expense => "Expense",
        }
    }

    /// Sign used when the amount is displayed in a list.
    pub fn sign(&self) -> char {
        match self {
            TransactionKind::Income => '+',
            TransactionKind::Expense => '-',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionKind {
    type Err = LedgerError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(LedgerError::InvalidInput(format!(
                "unknown transaction type `{}` (use income or expense)",
                other
            ))),
        }
    }
}

/// A single recorded income or expense event. Never mutated once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "StoredTransaction")]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: Category,
    pub date: NaiveDate,
    pub description: String,
}

impl Transaction {
    /// Builds a validated transaction with a fresh identifier.
    pub fn new(
        kind: TransactionKind,
        amount: f64,
        category: Category,
        date: NaiveDate,
        description: Option<String>,
    ) -> Result<Self, LedgerError> {
        let amount = validate_amount(amount)?;
        if category.is_empty() {
            return Err(LedgerError::InvalidInput("category is required".into()));
        }
        let description = description
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| DEFAULT_DESCRIPTION.to_string());
        Ok(Self {
            id: Uuid::new_v4(),
            kind,
            amount,
            category,
            date,
            description,
        })
    }

    /// Re-checks the invariants `new` enforces, for values built field by field.
    pub fn validate(&self) -> Result<(), LedgerError> {
        validate_amount(self.amount)?;
        if self.category.is_empty() {
            return Err(LedgerError::InvalidInput("category is required".into()));
        }
        Ok(())
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }
}

/// On-disk shape of a transaction; converted through [`Transaction::validate`].
#[derive(Deserialize)]
struct StoredTransaction {
    id: Uuid,
    #[serde(rename = "type")]
    kind: TransactionKind,
    amount: f64,
    category: Category,
    date: NaiveDate,
    description: String,
}

impl TryFrom<StoredTransaction> for Transaction {
    type Error = LedgerError;

    fn try_from(stored: StoredTransaction) -> Result<Self, Self::Error> {
        let transaction = Transaction {
            id: stored.id,
            kind: stored.kind,
            amount: stored.amount,
            category: stored.category,
            date: stored.date,
            description: stored.description,
        };
        transaction.validate()?;
        Ok(transaction)
    }
}

/// Raw form values as typed by the user, before any parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionDraft {
    pub kind: String,
    pub amount: String,
    pub category: String,
    pub date: String,
    pub description: String,
}

impl TryFrom<TransactionDraft> for Transaction {
    type Error = LedgerError;

    fn try_from(draft: TransactionDraft) -> Result<Self, Self::Error> {
        if draft.kind.trim().is_empty() {
            return Err(LedgerError::InvalidInput("transaction type is required".into()));
        }
        let kind = draft.kind.parse::<TransactionKind>()?;
        let amount = parse_amount(&draft.amount)?;
        let date = parse_date(&draft.date)?;
        Transaction::new(
            kind,
            amount,
            Category::new(draft.category),
            date,
            Some(draft.description),
        )
    }
}

/// Rejects anything that is not a positive, finite number.
pub fn validate_amount(amount: f64) -> Result<f64, LedgerError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(amount)
    } else {
        Err(LedgerError::InvalidInput(
            "amount must be a positive number".into(),
        ))
    }
}

pub fn parse_amount(input: &str) -> Result<f64, LedgerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidInput("amount is required".into()));
    }
    let value = trimmed.parse::<f64>().map_err(|_| {
        LedgerError::InvalidInput(format!("`{}` is not a valid amount", trimmed))
    })?;
    validate_amount(value)
}

pub fn parse_date(input: &str) -> Result<NaiveDate, LedgerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(LedgerError::InvalidInput("date is required".into()));
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).map_err(|_| {
        LedgerError::InvalidInput(format!("invalid date `{}` (use YYYY-MM-DD)", trimmed))
    })
}
