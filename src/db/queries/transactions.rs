use chrono::{SubsecRound, Utc};
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::date_utils::{parse_storage, to_storage};
use crate::models::{Category, NewTransaction, Transaction, TransactionType};
use crate::sort_utils::{SortSpec, SortableColumn};

pub const DEFAULT_LIST_LIMIT: i64 = 50;
pub const MAX_LIST_LIMIT: i64 = 1000;

const SELECT_COLUMNS: &str = "SELECT t.id, t.title, t.amount_cents, t.category, t.transaction_type,
        t.date, t.created_at, t.updated_at
 FROM transactions t";

/// Sortable columns for the transactions listing.
#[derive(Debug, Default, Clone, PartialEq)]
pub enum TransactionSortColumn {
    #[default]
    Date,
    Amount,
    Title,
    Category,
    Type,
    CreatedAt,
}

impl SortableColumn for TransactionSortColumn {
    fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "date" => Some(Self::Date),
            "amount" => Some(Self::Amount),
            "title" => Some(Self::Title),
            "category" => Some(Self::Category),
            "type" => Some(Self::Type),
            "createdat" | "created_at" => Some(Self::CreatedAt),
            _ => None,
        }
    }

    fn sql_expression(&self) -> &'static str {
        match self {
            Self::Date => "t.date",
            Self::Amount => "t.amount_cents",
            Self::Title => "t.title COLLATE NOCASE",
            Self::Category => "t.category",
            Self::Type => "t.transaction_type",
            Self::CreatedAt => "t.created_at",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub category: Option<Category>,
    pub transaction_type: Option<TransactionType>,
    pub limit: Option<i64>,
    pub sort: SortSpec<TransactionSortColumn>,
}

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let category: String = row.get(3)?;
    let transaction_type: String = row.get(4)?;

    Ok(Transaction {
        id: row.get(0)?,
        title: row.get(1)?,
        amount_cents: row.get(2)?,
        category: category
            .parse()
            .map_err(|_| conversion_error(3, format!("unknown category {category}")))?,
        transaction_type: transaction_type
            .parse()
            .map_err(|_| conversion_error(4, format!("unknown type {transaction_type}")))?,
        date: timestamp_column(row, 5)?,
        created_at: timestamp_column(row, 6)?,
        updated_at: timestamp_column(row, 7)?,
    })
}

fn timestamp_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<chrono::DateTime<Utc>> {
    let raw: String = row.get(idx)?;
    parse_storage(&raw).map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

pub fn list_transactions(
    conn: &Connection,
    filter: &TransactionFilter,
) -> rusqlite::Result<Vec<Transaction>> {
    let mut sql = format!("{SELECT_COLUMNS} WHERE 1=1");
    let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

    if let Some(category) = filter.category {
        sql.push_str(" AND t.category = ?");
        params_vec.push(Box::new(category.as_str()));
    }
    if let Some(transaction_type) = filter.transaction_type {
        sql.push_str(" AND t.transaction_type = ?");
        params_vec.push(Box::new(transaction_type.as_str()));
    }

    sql.push_str(&format!(" ORDER BY {}, t.id DESC", filter.sort.sql_order_by()));

    if let Some(limit) = filter.limit {
        sql.push_str(" LIMIT ?");
        params_vec.push(Box::new(limit));
    }

    let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
    let mut stmt = conn.prepare(&sql)?;
    let transactions = stmt
        .query_map(params_refs.as_slice(), row_to_transaction)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    debug!(count = transactions.len(), "Listed transactions");
    Ok(transactions)
}

/// Snapshot of every stored transaction, used for statistics.
pub fn list_all_transactions(conn: &Connection) -> rusqlite::Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY t.date, t.id"))?;
    let transactions = stmt
        .query_map([], row_to_transaction)?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    trace!(count = transactions.len(), "Loaded transaction snapshot");
    Ok(transactions)
}

pub fn get_transaction(conn: &Connection, id: &str) -> rusqlite::Result<Option<Transaction>> {
    trace!(transaction_id = id, "Fetching transaction");
    conn.query_row(
        &format!("{SELECT_COLUMNS} WHERE t.id = ?"),
        [id],
        row_to_transaction,
    )
    .optional()
}

pub fn create_transaction(
    conn: &Connection,
    transaction: &NewTransaction,
) -> rusqlite::Result<Transaction> {
    let now = Utc::now().trunc_subsecs(3);
    let created = Transaction {
        id: Uuid::new_v4().to_string(),
        title: transaction.title.clone(),
        amount_cents: transaction.amount_cents,
        category: transaction.category,
        transaction_type: transaction.transaction_type,
        date: transaction.date.map_or(now, |d| d.trunc_subsecs(3)),
        created_at: now,
        updated_at: now,
    };

    conn.execute(
        "INSERT INTO transactions (id, title, amount_cents, category, transaction_type,
         date, created_at, updated_at)
         VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        params![
            created.id,
            created.title,
            created.amount_cents,
            created.category.as_str(),
            created.transaction_type.as_str(),
            to_storage(&created.date),
            to_storage(&created.created_at),
            to_storage(&created.updated_at),
        ],
    )?;

    debug!(
        transaction_id = %created.id,
        amount_cents = created.amount_cents,
        "Created transaction"
    );
    Ok(created)
}

/// Insert a batch within the caller's SQLite transaction. Nothing is visible
/// to other connections until the caller commits.
pub fn insert_transactions(
    tx: &rusqlite::Transaction<'_>,
    transactions: &[NewTransaction],
) -> rusqlite::Result<usize> {
    for transaction in transactions {
        create_transaction(tx, transaction)?;
    }
    debug!(count = transactions.len(), "Inserted transaction batch");
    Ok(transactions.len())
}

/// Persist every editable field of `transaction` and refresh `updated_at`.
/// Timestamps are stored with millisecond precision.
/// Returns `None` if no row has that id.
pub fn update_transaction(
    conn: &Connection,
    transaction: &Transaction,
) -> rusqlite::Result<Option<Transaction>> {
    let updated_at = Utc::now().trunc_subsecs(3);
    let date = transaction.date.trunc_subsecs(3);
    let rows = conn.execute(
        "UPDATE transactions SET title = ?, amount_cents = ?, category = ?,
         transaction_type = ?, date = ?, updated_at = ?
         WHERE id = ?",
        params![
            transaction.title,
            transaction.amount_cents,
            transaction.category.as_str(),
            transaction.transaction_type.as_str(),
            to_storage(&date),
            to_storage(&updated_at),
            transaction.id,
        ],
    )?;

    if rows == 0 {
        return Ok(None);
    }

    debug!(transaction_id = %transaction.id, "Updated transaction");
    Ok(Some(Transaction {
        date,
        updated_at,
        ..transaction.clone()
    }))
}

pub fn delete_transaction(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    let rows = conn.execute("DELETE FROM transactions WHERE id = ?", [id])?;
    if rows > 0 {
        debug!(transaction_id = id, "Deleted transaction");
    }
    Ok(rows > 0)
}

pub fn delete_all_transactions(conn: &Connection) -> rusqlite::Result<usize> {
    let rows = conn.execute("DELETE FROM transactions", [])?;
    tracing::warn!(count = rows, "Deleted all transactions");
    Ok(rows)
}
