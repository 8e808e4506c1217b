//! Transaction list helpers.

use crate::{
    db::{Database, Patch},
    domain::{FlowType, Mode, Transaction, TransactionStatus},
};

use super::{encoded, today, ServiceError, ServiceResult};

const COPY_SUFFIX: &str = " (copy)";

/// Narrows a transaction list by type and free-text search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    pub kind: Option<FlowType>,
    pub search: Option<String>,
}

impl TransactionFilter {
    fn matches(&self, txn: &Transaction) -> bool {
        if self.kind.is_some_and(|kind| kind != txn.kind) {
            return false;
        }
        match self.search.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                txn.description.to_lowercase().contains(&term)
                    || txn.category.to_lowercase().contains(&term)
            }
        }
    }
}

pub struct TransactionService;

impl TransactionService {
    /// Flips a transaction between paid and pending.
    pub fn toggle_status(db: &Database, id: &str) -> ServiceResult<Transaction> {
        let not_found = || ServiceError::NotFound {
            kind: "Transaction",
            id: id.to_string(),
        };
        let txn = db.transactions().get_by_id(id).ok_or_else(not_found)?;
        let patch = Patch::new().set("status", encoded(txn.status.toggled())?);
        db.transactions().update(id, &patch).ok_or_else(not_found)
    }

    /// Records a pending copy of a transaction, dated today, in `mode`.
    /// Attachments are not copied.
    pub fn duplicate(db: &Database, id: &str, mode: Mode) -> ServiceResult<Transaction> {
        let original = db
            .transactions()
            .get_by_id(id)
            .ok_or_else(|| ServiceError::NotFound {
                kind: "Transaction",
                id: id.to_string(),
            })?;
        let copy = Transaction::new(
            format!("{}{COPY_SUFFIX}", original.description),
            original.amount,
            original.kind,
            original.category,
            today(),
        )
        .with_status(TransactionStatus::Pending)
        .with_mode(mode);
        let stored = db.transactions().add(copy);
        tracing::info!(source = id, copy = %stored.id, "transaction duplicated");
        Ok(stored)
    }

    pub fn filter(transactions: &[Transaction], filter: &TransactionFilter) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|txn| filter.matches(txn))
            .cloned()
            .collect()
    }
}
