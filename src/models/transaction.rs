use chrono::NaiveDate;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::date_utils::parse_date;
use crate::error::{AppError, AppResult};
use crate::models::summary::Summary;

/// Whether money came in or went out. The amount itself is always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }

    /// Categories offered to the user when entering a transaction of this type.
    ///
    /// These are suggestions only; any non-empty category is accepted.
    pub fn suggested_categories(&self) -> &'static [&'static str] {
        match self {
            Self::Expense => &[
                "Food",
                "Transport",
                "Shopping",
                "Bills",
                "Entertainment",
                "Health",
                "Other",
            ],
            Self::Income => &["Salary", "Freelance", "Investments", "Gifts", "Other"],
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            _ => Err(AppError::InvalidArgument(
                "type must be 'income' or 'expense'".into(),
            )),
        }
    }
}

impl ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()?
            .parse()
            .map_err(|_| FromSqlError::InvalidType)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: Uuid,
    #[serde(rename = "amount", with = "crate::money::cents")]
    pub amount_cents: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub date: NaiveDate,
    #[serde(
        rename = "Notes",
        alias = "notes",
        alias = "description",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
}

/// A validated transaction that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTransaction {
    #[serde(rename = "amount", with = "crate::money::cents")]
    pub amount_cents: i64,
    #[serde(rename = "type")]
    pub kind: TransactionType,
    pub category: String,
    pub date: NaiveDate,
    #[serde(rename = "Notes", skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewTransaction {
    pub fn new(amount_cents: i64, kind: TransactionType, category: &str, date: NaiveDate) -> Self {
        Self {
            amount_cents,
            kind,
            category: category.to_string(),
            date,
            notes: None,
        }
    }

    pub fn with_notes(mut self, notes: &str) -> Self {
        self.notes = Some(notes.to_string());
        self
    }
}

/// Raw body of a create request, before validation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TransactionPayload {
    pub amount: Option<f64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
    #[serde(rename = "Notes", alias = "notes", alias = "description")]
    pub notes: Option<String>,
}

impl TransactionPayload {
    /// Treat empty/whitespace-only strings as absent.
    fn non_empty(s: &Option<String>) -> Option<String> {
        s.as_ref()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// Validate the payload. A missing date falls back to `today`.
    pub fn into_new_transaction(self, today: NaiveDate) -> AppResult<NewTransaction> {
        let amount = self
            .amount
            .ok_or_else(|| AppError::InvalidArgument("amount is required".into()))?;
        let not_positive =
            || AppError::InvalidArgument("amount must be greater than zero".into());
        if amount.is_nan() || amount <= 0.0 {
            return Err(not_positive());
        }
        let amount_cents = crate::money::from_decimal(amount)
            .filter(|cents| *cents <= crate::money::MAX_AMOUNT_CENTS)
            .ok_or_else(|| AppError::InvalidArgument("amount is too large".into()))?;
        if amount_cents == 0 {
            return Err(not_positive());
        }

        let kind = Self::non_empty(&self.kind)
            .ok_or_else(|| AppError::InvalidArgument("type is required".into()))?
            .parse::<TransactionType>()?;

        let category = Self::non_empty(&self.category)
            .ok_or_else(|| AppError::InvalidArgument("category is required".into()))?;

        let date = match Self::non_empty(&self.date) {
            Some(raw) => parse_date(&raw)
                .ok_or_else(|| AppError::InvalidArgument(format!("Invalid date: {}", raw)))?,
            None => today,
        };

        Ok(NewTransaction {
            amount_cents,
            kind,
            category,
            date,
            notes: Self::non_empty(&self.notes),
        })
    }
}

/// Transactions of one period together with their totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionPage {
    pub transactions: Vec<Transaction>,
    pub summary: Summary,
}

/// Body of `GET /transactions`: a page when a period was requested, otherwise the
/// bare list of every transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TransactionListing {
    Period(TransactionPage),
    All(Vec<Transaction>),
}

impl TransactionListing {
    /// Split into transactions and summary, computing the summary for bare lists.
    pub fn into_page(self) -> TransactionPage {
        match self {
            Self::Period(page) => page,
            Self::All(transactions) => {
                let summary = crate::services::summary::summarize(&transactions);
                TransactionPage {
                    transactions,
                    summary,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedTransaction {
    #[serde(rename = "deletedId")]
    pub deleted_id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn payload(json: &str) -> TransactionPayload {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_payload_into_new_transaction() {
        let new = payload(
            r#"{"amount": 50, "type": "expense", "category": " Food ", "date": "2024-06-01", "Notes": "lunch"}"#,
        )
        .into_new_transaction(today())
        .unwrap();

        assert_eq!(new.amount_cents, 5000);
        assert_eq!(new.kind, TransactionType::Expense);
        assert_eq!(new.category, "Food");
        assert_eq!(new.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(new.notes.as_deref(), Some("lunch"));
    }

    #[test]
    fn test_payload_accepts_lowercase_notes_and_iso_datetime() {
        let new = payload(
            r#"{"amount": 12.5, "type": "income", "category": "Salary", "date": "2024-06-01T10:30:00.000Z", "notes": "June"}"#,
        )
        .into_new_transaction(today())
        .unwrap();

        assert_eq!(new.date, NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(new.notes.as_deref(), Some("June"));
    }

    #[test]
    fn test_payload_defaults_date_to_today() {
        let new = payload(r#"{"amount": 1, "type": "income", "category": "Gifts"}"#)
            .into_new_transaction(today())
            .unwrap();
        assert_eq!(new.date, today());
        assert_eq!(new.notes, None);
    }

    #[test]
    fn test_payload_rejects_non_positive_amounts() {
        for body in [
            r#"{"amount": 0, "type": "expense", "category": "Food"}"#,
            r#"{"amount": -5, "type": "expense", "category": "Food"}"#,
            r#"{"amount": 0.001, "type": "expense", "category": "Food"}"#,
            r#"{"type": "expense", "category": "Food"}"#,
        ] {
            let err = payload(body).into_new_transaction(today()).unwrap_err();
            assert!(matches!(err, AppError::InvalidArgument(_)), "{}", body);
        }
    }

    #[test]
    fn test_payload_rejects_amounts_beyond_the_maximum() {
        for body in [
            r#"{"amount": 1e300, "type": "income", "category": "Gifts"}"#,
            r#"{"amount": 5e16, "type": "expense", "category": "Food"}"#,
            r#"{"amount": 1000000000000.01, "type": "income", "category": "Gifts"}"#,
        ] {
            let err = payload(body).into_new_transaction(today()).unwrap_err();
            assert_eq!(err.to_string(), "amount is too large", "{}", body);
        }

        let largest = payload(r#"{"amount": 1000000000000, "type": "income", "category": "Gifts"}"#)
            .into_new_transaction(today())
            .unwrap();
        assert_eq!(largest.amount_cents, crate::money::MAX_AMOUNT_CENTS);
    }

    #[test]
    fn test_payload_rejects_unknown_type_and_missing_category() {
        let err = payload(r#"{"amount": 5, "type": "transfer", "category": "Food"}"#)
            .into_new_transaction(today())
            .unwrap_err();
        assert_eq!(err.to_string(), "type must be 'income' or 'expense'");

        let err = payload(r#"{"amount": 5, "type": "expense", "category": "  "}"#)
            .into_new_transaction(today())
            .unwrap_err();
        assert_eq!(err.to_string(), "category is required");
    }

    #[test]
    fn test_payload_rejects_garbage_date() {
        let err = payload(r#"{"amount": 5, "type": "expense", "category": "Food", "date": "soon"}"#)
            .into_new_transaction(today())
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn test_transaction_wire_format() {
        let transaction = Transaction {
            id: Uuid::nil(),
            amount_cents: 5000,
            kind: TransactionType::Expense,
            category: "Food".into(),
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            notes: None,
        };

        let value = serde_json::to_value(&transaction).unwrap();
        assert_eq!(value["amount"], 50.0);
        assert_eq!(value["type"], "expense");
        assert_eq!(value["date"], "2024-06-01");
        assert!(value.get("Notes").is_none());
    }

    #[test]
    fn test_listing_distinguishes_page_from_bare_list() {
        let bare: TransactionListing = serde_json::from_str("[]").unwrap();
        assert_eq!(bare, TransactionListing::All(Vec::new()));

        let page: TransactionListing = serde_json::from_str(
            r#"{"transactions": [], "summary": {"totalIncome": 0, "totalExpenses": 0, "balance": 0}}"#,
        )
        .unwrap();
        assert!(matches!(page, TransactionListing::Period(_)));
    }

    #[test]
    fn test_suggested_categories_end_with_other() {
        assert_eq!(
            TransactionType::Expense.suggested_categories().last(),
            Some(&"Other")
        );
        assert!(TransactionType::Income
            .suggested_categories()
            .contains(&"Salary"));
    }
}
