use crate::models::{Summary, Transaction, TransactionType};

/// Totals over `transactions`. The result does not depend on their order.
///
/// Totals saturate at the `i64` bounds instead of wrapping.
pub fn summarize<'a, I>(transactions: I) -> Summary
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let (total_income_cents, total_expenses_cents) = transactions.into_iter().fold(
        (0i64, 0i64),
        |(income, expenses), t| match t.kind {
            TransactionType::Income => (income.saturating_add(t.amount_cents), expenses),
            TransactionType::Expense => (income, expenses.saturating_add(t.amount_cents)),
        },
    );

    Summary {
        total_income_cents,
        total_expenses_cents,
        balance_cents: total_income_cents.saturating_sub(total_expenses_cents),
    }
}
