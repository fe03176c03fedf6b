//! Pure aggregations over a snapshot of transactions.
//!
//! Nothing here touches storage or mutates its input; every function takes a
//! borrowed slice and returns freshly built series. Amounts are in cents and
//! sums saturate at the `i64` bounds.

use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::date_utils::{day_key, month_key};
use crate::models::{Category, Transaction, TransactionType};
use crate::models::amount;

pub const DEFAULT_TREND_WINDOW_DAYS: usize = 30;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    #[serde(with = "amount::decimal")]
    pub total_income: i64,
    #[serde(with = "amount::decimal")]
    pub total_expenses: i64,
    #[serde(with = "amount::decimal")]
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyBucket {
    pub year_month: String,
    #[serde(with = "amount::decimal")]
    pub income: i64,
    #[serde(with = "amount::decimal")]
    pub expenses: i64,
    #[serde(with = "amount::decimal")]
    pub balance: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DailySpending {
    pub date: String,
    #[serde(with = "amount::decimal")]
    pub spending: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub category: Category,
    #[serde(with = "amount::decimal")]
    pub total: i64,
}

/// Expense totals per category. Categories without expenses are absent.
pub fn category_totals(records: &[Transaction]) -> HashMap<Category, i64> {
    let mut totals: HashMap<Category, i64> = HashMap::new();

    for record in records.iter().filter(|r| r.is_expense()) {
        let total = totals.entry(record.category).or_insert(0);
        *total = total.saturating_add(record.amount_cents);
    }

    totals
}

/// [`category_totals`] ordered by total descending, ties by category name.
pub fn sorted_category_totals(records: &[Transaction]) -> Vec<CategoryTotal> {
    let mut result: Vec<CategoryTotal> = category_totals(records)
        .into_iter()
        .map(|(category, total)| CategoryTotal { category, total })
        .collect();

    result.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    result
}

/// Income, expenses and balance per calendar month, most recent month first.
pub fn monthly_series(records: &[Transaction]) -> Vec<MonthlyBucket> {
    let mut months: BTreeMap<(i32, u32), (i64, i64)> = BTreeMap::new();

    for record in records {
        let entry = months
            .entry((record.date.year(), record.date.month()))
            .or_insert((0, 0));
        match record.transaction_type {
            TransactionType::Income => entry.0 = entry.0.saturating_add(record.amount_cents),
            TransactionType::Expense => entry.1 = entry.1.saturating_add(record.amount_cents),
        }
    }

    months
        .into_iter()
        .rev()
        .map(|((year, month), (income, expenses))| MonthlyBucket {
            year_month: month_key(year, month),
            income,
            expenses,
            balance: income.saturating_sub(expenses),
        })
        .collect()
}

/// Expense totals per calendar day in ascending date order, keeping only the
/// most recent `window_days` days that had any spending. Days without
/// expenses are not filled in.
pub fn daily_spending_trend(records: &[Transaction], window_days: usize) -> Vec<DailySpending> {
    let mut days: BTreeMap<chrono::NaiveDate, i64> = BTreeMap::new();

    for record in records.iter().filter(|r| r.is_expense()) {
        let spending = days.entry(record.date.date_naive()).or_insert(0);
        *spending = spending.saturating_add(record.amount_cents);
    }

    let skip = days.len().saturating_sub(window_days);
    days.into_iter()
        .skip(skip)
        .map(|(date, spending)| DailySpending {
            date: day_key(date),
            spending,
        })
        .collect()
}

pub fn totals(records: &[Transaction]) -> Totals {
    let (total_income, total_expenses) =
        records
            .iter()
            .fold((0i64, 0i64), |(income, expenses), record| {
                match record.transaction_type {
                    TransactionType::Income => {
                        (income.saturating_add(record.amount_cents), expenses)
                    }
                    TransactionType::Expense => {
                        (income, expenses.saturating_add(record.amount_cents))
                    }
                }
            });

    Totals {
        total_income,
        total_expenses,
        balance: total_income.saturating_sub(total_expenses),
    }
}
