use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::{debug, info};

use crate::db::queries::transactions::{
    self, TransactionFilter, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT,
};
use crate::error::{AppError, AppResult};
use crate::models::{
    Category, CreateTransactionRequest, Transaction, TransactionType, UpdateTransactionRequest,
    ValidationError,
};
use crate::sort_utils::SortSpec;
use crate::state::AppState;

/// Query parameters of the listing endpoint. `"all"` (or an empty value)
/// disables the category or type filter.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    #[serde(rename = "type")]
    pub transaction_type: Option<String>,
    pub limit: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    pub fn resolve_filter(&self) -> Result<TransactionFilter, ValidationError> {
        let category = match active_filter(self.category.as_deref()) {
            Some(raw) => Some(
                raw.parse::<Category>()
                    .map_err(|_| ValidationError::UnknownCategory(raw.to_string()))?,
            ),
            None => None,
        };

        let transaction_type = match active_filter(self.transaction_type.as_deref()) {
            Some(raw) => Some(
                raw.parse::<TransactionType>()
                    .map_err(|_| ValidationError::UnknownType(raw.to_string()))?,
            ),
            None => None,
        };

        let limit = match self.limit.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|n| (1..=MAX_LIST_LIMIT).contains(n))
                .ok_or_else(|| {
                    ValidationError::InvalidQuery(format!(
                        "limit must be an integer between 1 and {}",
                        MAX_LIST_LIMIT
                    ))
                })?,
            None => DEFAULT_LIST_LIMIT,
        };

        let sort = self
            .sort
            .as_deref()
            .map(SortSpec::parse)
            .unwrap_or_default();

        Ok(TransactionFilter {
            category,
            transaction_type,
            limit: Some(limit),
            sort,
        })
    }
}

fn active_filter(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty() && !v.eq_ignore_ascii_case("all"))
}

pub async fn list(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> AppResult<Json<Vec<Transaction>>> {
    let Query(params) = params?;
    let filter = params.resolve_filter()?;
    debug!(?filter, "Listing transactions");

    let conn = state.db.get()?;
    let list = transactions::list_transactions(&conn, &filter)?;
    Ok(Json(list))
}

pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<Transaction>> {
    let conn = state.db.get()?;
    let transaction = transactions::get_transaction(&conn, &id)?.ok_or_else(not_found)?;
    Ok(Json(transaction))
}

pub async fn create(
    State(state): State<AppState>,
    payload: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<Transaction>)> {
    let Json(request) = payload?;
    let new_transaction = request.validate()?;

    let conn = state.db.get()?;
    let created = transactions::create_transaction(&conn, &new_transaction)?;

    info!(
        transaction_id = %created.id,
        transaction_type = %created.transaction_type,
        category = %created.category,
        "Transaction created"
    );
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTransactionRequest>, JsonRejection>,
) -> AppResult<Json<Transaction>> {
    let Json(request) = payload?;
    let patch = request.validate()?;

    let conn = state.db.get()?;
    let existing = transactions::get_transaction(&conn, &id)?.ok_or_else(not_found)?;

    if patch.is_empty() {
        debug!(transaction_id = %id, "Empty update, nothing to change");
        return Ok(Json(existing));
    }

    let merged = patch.merge(&existing)?;
    let updated = transactions::update_transaction(&conn, &merged)?.ok_or_else(not_found)?;

    info!(transaction_id = %updated.id, "Transaction updated");
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let conn = state.db.get()?;
    if !transactions::delete_transaction(&conn, &id)? {
        return Err(not_found());
    }

    info!(transaction_id = %id, "Transaction deleted");
    Ok(Json(serde_json::json!({
        "message": "Transaction deleted successfully"
    })))
}

fn not_found() -> AppError {
    AppError::NotFound("Transaction not found".into())
}
