use std::cmp::Ordering;

use crate::models::{Transaction, TransactionType};

/// Number of entries in the "recent transactions" view.
pub const RECENT_TRANSACTIONS_LIMIT: usize = 5;

/// Which transaction types to keep.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TypeFilter {
    #[default]
    All,
    Income,
    Expense,
}

impl TypeFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "all" => Some(Self::All),
            "income" => Some(Self::Income),
            "expense" => Some(Self::Expense),
            _ => None,
        }
    }

    pub fn matches(&self, transaction: &Transaction) -> bool {
        match self {
            Self::All => true,
            Self::Income => transaction.kind == TransactionType::Income,
            Self::Expense => transaction.kind == TransactionType::Expense,
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Date,
    Amount,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "date",
            Self::Amount => "amount",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "amount" => Some(Self::Amount),
            _ => None,
        }
    }

    fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            Self::Date => a.date.cmp(&b.date),
            Self::Amount => a.amount_cents.cmp(&b.amount_cents),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Desc,
    Asc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "asc" => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub fn toggle(&self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// Filter and ordering applied to a transaction list for display.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ListView {
    pub filter: TypeFilter,
    pub sort: SortKey,
    pub direction: SortDirection,
}

impl ListView {
    pub fn new(filter: TypeFilter, sort: SortKey, direction: SortDirection) -> Self {
        Self {
            filter,
            sort,
            direction,
        }
    }

    /// Select a sort key. Selecting the active key again flips the direction.
    pub fn select_sort(&mut self, sort: SortKey) {
        if self.sort == sort {
            self.direction = self.direction.toggle();
        } else {
            self.sort = sort;
        }
    }

    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        filter_and_sort(transactions, self.filter, self.sort, self.direction)
    }
}

/// Keep the transactions matching `filter`, ordered by `key` in `direction`.
///
/// The sort is stable: transactions with equal keys keep their input order in both
/// directions.
pub fn filter_and_sort(
    transactions: &[Transaction],
    filter: TypeFilter,
    key: SortKey,
    direction: SortDirection,
) -> Vec<Transaction> {
    let mut result: Vec<Transaction> = transactions
        .iter()
        .filter(|t| filter.matches(t))
        .cloned()
        .collect();

    result.sort_by(|a, b| match direction {
        SortDirection::Asc => key.compare(a, b),
        SortDirection::Desc => key.compare(b, a),
    });

    result
}

/// The `limit` most recent transactions, newest first.
pub fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut result = filter_and_sort(
        transactions,
        TypeFilter::All,
        SortKey::Date,
        SortDirection::Desc,
    );
    result.truncate(limit);
    result
}
