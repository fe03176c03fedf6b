//! Demo data for a fresh installation.

use chrono::{DateTime, Duration, Utc};
use rusqlite::Connection;

use crate::db::queries::transactions;
use crate::models::{Category, NewTransaction, TransactionType};

/// Sample transactions spread over the week before `now`.
pub fn sample_transactions(now: DateTime<Utc>) -> Vec<NewTransaction> {
    use Category::*;
    use TransactionType::{Expense, Income};

    let entry = |title: &str,
                 cents: i64,
                 category: Category,
                 transaction_type: TransactionType,
                 days_ago: i64| NewTransaction {
        title: title.to_string(),
        amount_cents: cents,
        category,
        transaction_type,
        date: Some(now - Duration::days(days_ago)),
    };

    vec![
        entry("Salary", 500_000, Salary, Income, 7),
        entry("Freelance Project", 120_000, Freelance, Income, 5),
        entry("Grocery Shopping", 15_000, Food, Expense, 3),
        entry("Gas Station", 4_500, Transportation, Expense, 2),
        entry("Netflix Subscription", 1_500, Entertainment, Expense, 1),
        entry("Electric Bill", 12_000, Bills, Expense, 6),
        entry("Investment Dividend", 30_000, Investment, Income, 4),
        entry("Restaurant Dinner", 8_500, Food, Expense, 1),
    ]
}

/// Replace all stored transactions with the sample set. Returns the number
/// of transactions inserted.
pub fn reseed(conn: &Connection, now: DateTime<Utc>) -> rusqlite::Result<usize> {
    let samples = sample_transactions(now);
    let tx = conn.unchecked_transaction()?;
    transactions::delete_all_transactions(&tx)?;
    let inserted = transactions::insert_transactions(&tx, &samples)?;
    tx.commit()?;
    Ok(inserted)
}
