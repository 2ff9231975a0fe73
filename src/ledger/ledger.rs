use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use super::{filter::Filter, transaction::Transaction};
use crate::core::services::summary_service::{SummaryService, Totals};

/// In-memory list of transactions, kept in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    transactions: Vec<Transaction>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_transactions(transactions: Vec<Transaction>) -> Self {
        Self { transactions }
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        debug!(%id, kind = %transaction.kind, amount = transaction.amount, "transaction appended");
        self.transactions.push(transaction);
        id
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        Some(self.transactions.remove(index))
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    /// Transactions in insertion order.
    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// All transactions, newest date first.
    pub fn list(&self) -> Vec<&Transaction> {
        newest_first(self.transactions.iter())
    }

    /// Transactions accepted by `filter`, in insertion order.
    pub fn matching<'a>(&'a self, filter: &'a Filter) -> impl Iterator<Item = &'a Transaction> {
        self.transactions.iter().filter(move |txn| filter.matches(txn))
    }

    /// Transactions accepted by `filter`, newest date first.
    pub fn filtered(&self, filter: &Filter) -> Vec<&Transaction> {
        newest_first(self.transactions.iter().filter(|txn| filter.matches(txn)))
    }

    /// Dashboard totals over the full, unfiltered list.
    pub fn totals(&self) -> Totals {
        SummaryService::totals(self.transactions.iter())
    }
}

/// Sorts by date descending. Equal dates keep reverse insertion order, so the
/// most recently entered transaction of a day comes first.
fn newest_first<'a>(transactions: impl Iterator<Item = &'a Transaction>) -> Vec<&'a Transaction> {
    let mut ordered: Vec<&Transaction> = transactions.collect();
    ordered.reverse();
    ordered.sort_by(|a, b| b.date.cmp(&a.date));
    ordered
}
