//! Business logic helpers for managing transactions.

use uuid::Uuid;

use crate::core::services::{ServiceError, ServiceResult};
use crate::errors::LedgerError;
use crate::ledger::{Ledger, Transaction, TransactionDraft};

/// Provides validated add/remove helpers for ledger transactions.
pub struct TransactionService;

impl TransactionService {
    /// Appends a typed transaction after re-checking amount and category.
    pub fn add(ledger: &mut Ledger, transaction: Transaction) -> ServiceResult<Uuid> {
        transaction.validate()?;
        Ok(ledger.add_transaction(transaction))
    }

    /// Parses raw form values and appends the resulting transaction.
    pub fn add_draft(ledger: &mut Ledger, draft: TransactionDraft) -> ServiceResult<Transaction> {
        let transaction = Transaction::try_from(draft)?;
        ledger.add_transaction(transaction.clone());
        Ok(transaction)
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<Transaction> {
        ledger
            .remove_transaction(id)
            .ok_or_else(|| LedgerError::TransactionNotFound(id.to_string()).into())
    }

    /// Resolves a full id or a unique id prefix (as shown in listings).
    pub fn resolve(ledger: &Ledger, needle: &str) -> ServiceResult<Uuid> {
        let needle = needle.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return Err(ServiceError::Invalid("transaction id is required".into()));
        }
        if let Ok(id) = Uuid::parse_str(&needle) {
            return ledger
                .transaction(id)
                .map(|txn| txn.id)
                .ok_or_else(|| LedgerError::TransactionNotFound(needle).into());
        }
        let mut matches = ledger
            .transactions()
            .iter()
            .filter(|txn| txn.id.simple().to_string().starts_with(&needle));
        match (matches.next(), matches.next()) {
            (Some(txn), None) => Ok(txn.id),
            (None, _) => Err(LedgerError::TransactionNotFound(needle).into()),
            (Some(_), Some(_)) => Err(ServiceError::Invalid(format!(
                "id prefix `{}` is ambiguous",
                needle
            ))),
        }
    }
}
