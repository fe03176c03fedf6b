use axum::response::Json;
use serde::Serialize;

use crate::models::{Category, TransactionType};

/// Which categories a client may offer for each transaction type.
#[derive(Debug, Serialize)]
pub struct CategoryOptions {
    pub income: &'static [Category],
    pub expense: &'static [Category],
}

pub async fn index() -> Json<CategoryOptions> {
    Json(CategoryOptions {
        income: TransactionType::Income.categories(),
        expense: TransactionType::Expense.categories(),
    })
}
