use crate::date_utils::DateRange;
use crate::models::{NewTransaction, Transaction};
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, trace};
use uuid::Uuid;

const SELECT_COLUMNS: &str = "SELECT id, amount_cents, type, category, date, notes FROM transactions";

/// List transactions, newest first. `range` narrows to `[start, end)` when given.
pub fn list_transactions(
    conn: &Connection,
    range: Option<&DateRange>,
) -> rusqlite::Result<Vec<Transaction>> {
    let mut sql = format!("{} WHERE 1=1", SELECT_COLUMNS);
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(range) = range {
        sql.push_str(" AND date >= ? AND date < ?");
        params_vec.push(Box::new(range.start));
        params_vec.push(Box::new(range.end));
    }
    sql.push_str(" ORDER BY date DESC, rowid DESC");

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;
    let transactions = stmt
        .query_map(params_refs.as_slice(), map_transaction_row)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(count = transactions.len(), "Listed transactions");
    Ok(transactions)
}

pub fn get_transaction(conn: &Connection, id: Uuid) -> rusqlite::Result<Option<Transaction>> {
    trace!(transaction_id = %id, "Fetching transaction");
    conn.query_row(
        &format!("{} WHERE id = ?", SELECT_COLUMNS),
        [id.to_string()],
        map_transaction_row,
    )
    .optional()
}

/// Store `transaction` under a freshly generated id and return the stored record.
pub fn create_transaction(
    conn: &Connection,
    transaction: &NewTransaction,
) -> rusqlite::Result<Transaction> {
    let id = Uuid::new_v4();

    conn.execute(
        "INSERT INTO transactions (id, amount_cents, type, category, date, notes)
         VALUES (?, ?, ?, ?, ?, ?)",
        params![
            id.to_string(),
            transaction.amount_cents,
            transaction.kind,
            transaction.category,
            transaction.date,
            transaction.notes,
        ],
    )?;

    debug!(
        transaction_id = %id,
        amount_cents = transaction.amount_cents,
        kind = %transaction.kind,
        "Created transaction"
    );

    Ok(Transaction {
        id,
        amount_cents: transaction.amount_cents,
        kind: transaction.kind,
        category: transaction.category.clone(),
        date: transaction.date,
        notes: transaction.notes.clone(),
    })
}

/// Returns whether a row was deleted.
pub fn delete_transaction(conn: &Connection, id: Uuid) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM transactions WHERE id = ?", [id.to_string()])?;
    if rows > 0 {
        debug!(transaction_id = %id, "Deleted transaction");
    }
    Ok(rows > 0)
}

pub fn count_transactions(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))
}

fn map_transaction_row(row: &Row) -> rusqlite::Result<Transaction> {
    let raw_id: String = row.get(0)?;
    let id = Uuid::parse_str(&raw_id).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Transaction {
        id,
        amount_cents: row.get(1)?,
        kind: row.get(2)?,
        category: row.get(3)?,
        date: row.get(4)?,
        notes: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::migrations::run_migrations;
    use crate::models::TransactionType;
    use chrono::NaiveDate;
    use std::path::Path;

    fn setup() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn, Path::new("migrations")).unwrap();
        conn
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_and_get() {
        let conn = setup();
        let new = NewTransaction::new(5000, TransactionType::Expense, "Food", date(2024, 6, 1))
            .with_notes("groceries");

        let created = create_transaction(&conn, &new).unwrap();
        let fetched = get_transaction(&conn, created.id).unwrap().unwrap();

        assert_eq!(fetched, created);
        assert_eq!(fetched.amount_cents, 5000);
        assert_eq!(fetched.notes.as_deref(), Some("groceries"));
        assert_eq!(count_transactions(&conn).unwrap(), 1);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let conn = setup();
        assert!(get_transaction(&conn, Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_list_respects_half_open_range() {
        let conn = setup();
        for d in [date(2024, 5, 31), date(2024, 6, 1), date(2024, 6, 30), date(2024, 7, 1)] {
            create_transaction(
                &conn,
                &NewTransaction::new(100, TransactionType::Income, "Gifts", d),
            )
            .unwrap();
        }

        let range = DateRange {
            start: date(2024, 6, 1),
            end: date(2024, 7, 1),
        };
        let june = list_transactions(&conn, Some(&range)).unwrap();
        let dates: Vec<NaiveDate> = june.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![date(2024, 6, 30), date(2024, 6, 1)]);

        assert_eq!(list_transactions(&conn, None).unwrap().len(), 4);
    }

    #[test]
    fn test_delete() {
        let conn = setup();
        let created = create_transaction(
            &conn,
            &NewTransaction::new(999, TransactionType::Expense, "Bills", date(2024, 1, 1)),
        )
        .unwrap();

        assert!(delete_transaction(&conn, created.id).unwrap());
        assert!(!delete_transaction(&conn, created.id).unwrap());
        assert_eq!(count_transactions(&conn).unwrap(), 0);
    }

    #[test]
    fn test_schema_rejects_non_positive_amounts() {
        let conn = setup();
        let mut new = NewTransaction::new(100, TransactionType::Expense, "Food", date(2024, 1, 1));
        new.amount_cents = 0;
        assert!(create_transaction(&conn, &new).is_err());
    }
}
