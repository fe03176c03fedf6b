use serde::Serialize;
use std::collections::HashMap;

use crate::models::amount;
use crate::models::{Category, Transaction};
use crate::services::aggregation::{
    daily_spending_trend, monthly_series, sorted_category_totals, totals, CategoryTotal,
    DailySpending, MonthlyBucket,
};

/// Total and number of transactions in a category, counting income and
/// expenses alike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryStat {
    pub category: Category,
    #[serde(with = "amount::decimal")]
    pub total: i64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryPayload {
    #[serde(with = "amount::decimal")]
    pub total_income: i64,
    #[serde(with = "amount::decimal")]
    pub total_expenses: i64,
    #[serde(with = "amount::decimal")]
    pub balance: i64,
    pub category_stats: Vec<CategoryStat>,
    pub monthly_stats: Vec<MonthlyBucket>,
}

/// Series backing the dashboard charts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChartPayload {
    pub category_totals: Vec<CategoryTotal>,
    pub monthly: Vec<MonthlyBucket>,
    pub daily_spending: Vec<DailySpending>,
}

pub fn summarize(records: &[Transaction]) -> SummaryPayload {
    let totals = totals(records);

    SummaryPayload {
        total_income: totals.total_income,
        total_expenses: totals.total_expenses,
        balance: totals.balance,
        category_stats: category_stats(records),
        monthly_stats: monthly_series(records),
    }
}

pub fn chart_series(records: &[Transaction], window_days: usize) -> ChartPayload {
    ChartPayload {
        category_totals: sorted_category_totals(records),
        monthly: monthly_series(records),
        daily_spending: daily_spending_trend(records, window_days),
    }
}

fn category_stats(records: &[Transaction]) -> Vec<CategoryStat> {
    let mut by_category: HashMap<Category, (i64, usize)> = HashMap::new();

    for record in records {
        let entry = by_category.entry(record.category).or_insert((0, 0));
        entry.0 = entry.0.saturating_add(record.amount_cents);
        entry.1 += 1;
    }

    let mut result: Vec<CategoryStat> = by_category
        .into_iter()
        .map(|(category, (total, count))| CategoryStat {
            category,
            total,
            count,
        })
        .collect();

    result.sort_by(|a, b| {
        b.total
            .cmp(&a.total)
            .then_with(|| a.category.as_str().cmp(b.category.as_str()))
    });
    result
}
