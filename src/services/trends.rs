use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::date_utils::MONTH_NAMES;
use crate::models::{Transaction, TransactionType};

/// Categories charted by the monthly trends view, in display order.
pub const DEFAULT_TREND_CATEGORIES: [&str; 5] =
    ["Food", "Entertainment", "Grocery", "Medical", "Other"];

/// Bucket used for expenses recorded without a category.
pub const UNCATEGORIZED_BUCKET: &str = "Other";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySeries {
    pub category: String,
    /// Expense total per month, index 0 is January.
    #[serde(rename = "data", with = "crate::money::monthly_cents")]
    pub monthly_cents: [i64; 12],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrends {
    pub labels: Vec<String>,
    pub series: Vec<CategorySeries>,
}

impl MonthlyTrends {
    pub fn series_for(&self, category: &str) -> Option<&[i64; 12]> {
        self.series
            .iter()
            .find(|s| s.category == category)
            .map(|s| &s.monthly_cents)
    }

    /// Whether any charted category has spending in any month.
    pub fn has_data(&self) -> bool {
        self.series
            .iter()
            .any(|s| s.monthly_cents.iter().any(|c| *c != 0))
    }
}

/// Sum expense amounts per category and month-of-year.
///
/// Only `categories` get a series; expenses in any other category are left out, and
/// income is ignored entirely. Years are not distinguished, so callers wanting a
/// single year must narrow `transactions` first.
pub fn monthly_category_trends<'a, I>(transactions: I, categories: &[&str]) -> MonthlyTrends
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut series: Vec<CategorySeries> = categories
        .iter()
        .map(|category| CategorySeries {
            category: category.to_string(),
            monthly_cents: [0; 12],
        })
        .collect();

    for transaction in transactions {
        if transaction.kind != TransactionType::Expense {
            continue;
        }

        let category = match transaction.category.trim() {
            "" => UNCATEGORIZED_BUCKET,
            name => name,
        };

        if let Some(bucket) = series.iter_mut().find(|s| s.category == category) {
            let slot = &mut bucket.monthly_cents[transaction.date.month0() as usize];
            *slot = slot.saturating_add(transaction.amount_cents);
        }
    }

    MonthlyTrends {
        labels: MONTH_NAMES.iter().map(|m| m.to_string()).collect(),
        series,
    }
}
