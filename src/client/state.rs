use uuid::Uuid;

use crate::client::api::ClientError;
use crate::models::{Summary, Transaction, TransactionPage};

/// Lifecycle of the most recent request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Loading => "loading",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
        }
    }
}

/// The remote operations a client can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    FetchTransactions,
    FetchTransactionDetails,
    AddTransaction,
    DeleteTransaction,
}

impl Operation {
    pub fn default_error(&self) -> &'static str {
        match self {
            Self::FetchTransactions => "Failed to fetch transactions",
            Self::FetchTransactionDetails => "Failed to fetch transaction details",
            Self::AddTransaction => "Failed to add transaction",
            Self::DeleteTransaction => "Failed to delete transaction",
        }
    }
}

/// Everything the client knows about transactions between requests.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionsState {
    pub transactions: Vec<Transaction>,
    pub current_transaction: Option<Transaction>,
    pub summary: Summary,
    pub status: RequestStatus,
    pub error: Option<String>,
}

impl TransactionsState {
    pub fn is_loading(&self) -> bool {
        self.status == RequestStatus::Loading
    }

    /// A request was sent.
    pub fn begin(&mut self) {
        self.status = RequestStatus::Loading;
        self.error = None;
    }

    pub fn fetched(&mut self, page: TransactionPage) {
        self.status = RequestStatus::Succeeded;
        self.transactions = page.transactions;
        self.summary = page.summary;
    }

    pub fn detail_loaded(&mut self, transaction: Transaction) {
        self.status = RequestStatus::Succeeded;
        self.current_transaction = Some(transaction);
    }

    /// Prepend a freshly created transaction and fold it into the summary.
    ///
    /// The summary is not reconciled with the server, so it can include a
    /// transaction from outside the period that was last fetched.
    pub fn added(&mut self, transaction: Transaction) {
        self.status = RequestStatus::Succeeded;
        self.summary.record(&transaction);
        self.transactions.insert(0, transaction);
    }

    pub fn deleted(&mut self, id: Uuid) {
        self.status = RequestStatus::Succeeded;

        if let Some(pos) = self.transactions.iter().position(|t| t.id == id) {
            let removed = self.transactions.remove(pos);
            self.summary.retract(&removed);
        }
        if self.current_transaction.as_ref().is_some_and(|t| t.id == id) {
            self.current_transaction = None;
        }
    }

    pub fn failed(&mut self, operation: Operation, error: &ClientError) {
        self.status = RequestStatus::Failed;
        self.error = Some(error.user_message(operation.default_error()));
    }

    /// Drop the list and its totals. Status and error are left alone.
    pub fn reset(&mut self) {
        self.transactions.clear();
        self.summary = Summary::default();
    }

    pub fn clear_current(&mut self) {
        self.current_transaction = None;
    }
}
