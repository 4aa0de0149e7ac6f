use serde::{Deserialize, Serialize};

use crate::models::transaction::{Transaction, TransactionType};

/// Income, expense and balance totals over a set of transactions.
///
/// `balance` always equals `total_income_cents - total_expenses_cents`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    #[serde(rename = "totalIncome", with = "crate::money::cents")]
    pub total_income_cents: i64,
    #[serde(rename = "totalExpenses", with = "crate::money::cents")]
    pub total_expenses_cents: i64,
    #[serde(rename = "balance", with = "crate::money::cents")]
    pub balance_cents: i64,
}

impl Summary {
    /// Add one transaction to the totals, saturating at the `i64` bounds.
    pub fn record(&mut self, transaction: &Transaction) {
        let total = self.total_for(transaction.kind);
        *total = total.saturating_add(transaction.amount_cents);
        self.rebalance();
    }

    /// Remove one previously recorded transaction from the totals.
    pub fn retract(&mut self, transaction: &Transaction) {
        let total = self.total_for(transaction.kind);
        *total = total.saturating_sub(transaction.amount_cents);
        self.rebalance();
    }

    fn total_for(&mut self, kind: TransactionType) -> &mut i64 {
        match kind {
            TransactionType::Income => &mut self.total_income_cents,
            TransactionType::Expense => &mut self.total_expenses_cents,
        }
    }

    fn rebalance(&mut self) {
        self.balance_cents = self
            .total_income_cents
            .saturating_sub(self.total_expenses_cents);
    }
}
