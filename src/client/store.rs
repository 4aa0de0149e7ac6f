use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::api::{ApiClient, ClientError};
use crate::client::state::{Operation, TransactionsState};
use crate::date_utils::Period;
use crate::models::{NewTransaction, Transaction};
use crate::services::trends::{monthly_category_trends, MonthlyTrends, DEFAULT_TREND_CATEGORIES};
use crate::sort_utils::{recent_transactions, ListView, RECENT_TRANSACTIONS_LIMIT};

/// Drives [`TransactionsState`] through the request lifecycle of each API call.
///
/// Every method takes `&mut self`, so one store has at most one request in flight.
/// Failures are recorded in the state and also returned to the caller.
pub struct Store {
    api: ApiClient,
    state: TransactionsState,
    view: ListView,
}

impl Store {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            state: TransactionsState::default(),
            view: ListView::default(),
        }
    }

    pub fn connect(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Ok(Self::new(ApiClient::new(base_url)?))
    }

    pub fn state(&self) -> &TransactionsState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut TransactionsState {
        &mut self.state
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn view(&self) -> &ListView {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut ListView {
        &mut self.view
    }

    pub async fn fetch_transactions(&mut self, period: Period) -> Result<(), ClientError> {
        self.fetch(Some(period)).await
    }

    pub async fn fetch_all(&mut self) -> Result<(), ClientError> {
        self.fetch(None).await
    }

    async fn fetch(&mut self, period: Option<Period>) -> Result<(), ClientError> {
        self.state.begin();
        match self.api.list_transactions(period).await {
            Ok(listing) => {
                let page = listing.into_page();
                debug!(count = page.transactions.len(), "Transactions loaded");
                self.state.fetched(page);
                Ok(())
            }
            Err(e) => Err(self.fail(Operation::FetchTransactions, e)),
        }
    }

    pub async fn fetch_transaction_details(&mut self, id: Uuid) -> Result<(), ClientError> {
        self.state.begin();
        match self.api.get_transaction(id).await {
            Ok(transaction) => {
                self.state.detail_loaded(transaction);
                Ok(())
            }
            Err(e) => Err(self.fail(Operation::FetchTransactionDetails, e)),
        }
    }

    /// Create a transaction and apply it to the local state without re-fetching.
    pub async fn add_transaction(
        &mut self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, ClientError> {
        self.state.begin();
        match self.api.create_transaction(transaction).await {
            Ok(created) => {
                self.state.added(created.clone());
                Ok(created)
            }
            Err(e) => Err(self.fail(Operation::AddTransaction, e)),
        }
    }

    pub async fn delete_transaction(&mut self, id: Uuid) -> Result<(), ClientError> {
        self.state.begin();
        match self.api.delete_transaction(id).await {
            Ok(deleted) => {
                self.state.deleted(deleted.deleted_id);
                Ok(())
            }
            Err(e) => Err(self.fail(Operation::DeleteTransaction, e)),
        }
    }

    fn fail(&mut self, operation: Operation, error: ClientError) -> ClientError {
        warn!(?operation, "Request failed: {}", error);
        self.state.failed(operation, &error);
        error
    }

    /// Loaded transactions with the current filter and sort applied.
    pub fn visible_transactions(&self) -> Vec<Transaction> {
        self.view.apply(&self.state.transactions)
    }

    pub fn recent_transactions(&self) -> Vec<Transaction> {
        recent_transactions(&self.state.transactions, RECENT_TRANSACTIONS_LIMIT)
    }

    /// Expense trends over the loaded transactions for the default chart categories.
    pub fn monthly_trends(&self) -> MonthlyTrends {
        monthly_category_trends(&self.state.transactions, &DEFAULT_TREND_CATEGORIES)
    }
}
