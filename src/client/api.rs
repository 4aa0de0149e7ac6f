use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::date_utils::Period;
use crate::error::ErrorBody;
use crate::models::{DeletedTransaction, NewTransaction, Transaction, TransactionListing};
use crate::services::trends::MonthlyTrends;

const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Failed to create HTTP client: {0}")]
    Setup(#[source] reqwest::Error),

    /// The server could not be reached or the connection dropped.
    #[error("Network Error")]
    Network(#[source] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{message}")]
    Api { status: StatusCode, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(#[source] reqwest::Error),
}

impl ClientError {
    /// Message to surface to the user, or `fallback` when the failure carries none.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Api { message, .. } if !message.is_empty() => message.clone(),
            Self::Network(_) => "Network Error".to_string(),
            _ => fallback.to_string(),
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Typed client for the transactions REST API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    /// `base_url` is the API root, e.g. `http://localhost:5000/api`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(ClientError::Setup)?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// List transactions for `period`, or every transaction when `period` is `None`.
    ///
    /// The month goes over the wire as its English name.
    pub async fn list_transactions(
        &self,
        period: Option<Period>,
    ) -> Result<TransactionListing, ClientError> {
        let mut request = self.http.get(self.url("/transactions"));
        if let Some(period) = period {
            let year = period.year().to_string();
            request = request.query(&[("month", period.month_name()), ("year", year.as_str())]);
        }

        debug!(?period, "Fetching transactions");
        let response = request.send().await.map_err(ClientError::Network)?;
        decode(response).await
    }

    pub async fn get_transaction(&self, id: Uuid) -> Result<Transaction, ClientError> {
        let response = self
            .http
            .get(self.url(&format!("/transactions/{}", id)))
            .send()
            .await
            .map_err(ClientError::Network)?;
        decode(response).await
    }

    pub async fn create_transaction(
        &self,
        transaction: &NewTransaction,
    ) -> Result<Transaction, ClientError> {
        let response = self
            .http
            .post(self.url("/transactions"))
            .json(transaction)
            .send()
            .await
            .map_err(ClientError::Network)?;
        decode(response).await
    }

    pub async fn delete_transaction(&self, id: Uuid) -> Result<DeletedTransaction, ClientError> {
        let response = self
            .http
            .delete(self.url(&format!("/transactions/{}", id)))
            .send()
            .await
            .map_err(ClientError::Network)?;
        decode(response).await
    }

    pub async fn monthly_trends(&self, year: Option<i32>) -> Result<MonthlyTrends, ClientError> {
        let mut request = self.http.get(self.url("/analytics/monthly-trends"));
        if let Some(year) = year {
            request = request.query(&[("year", year)]);
        }

        let response = request.send().await.map_err(ClientError::Network)?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    if status.is_success() {
        return response.json::<T>().await.map_err(ClientError::Decode);
    }

    // Error bodies are `{ "error": "..." }`; anything else leaves the message empty.
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(e) => {
            warn!(%status, "Unreadable error body: {}", e);
            String::new()
        }
    };

    Err(ClientError::Api { status, message })
}
