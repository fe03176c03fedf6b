use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::AppResult;
use crate::models::ValidationError;
use crate::services::summary::{chart_series, summarize, ChartPayload, SummaryPayload};
use crate::state::AppState;

/// Upper bound for the `days` parameter of the chart endpoint.
pub const MAX_TREND_WINDOW_DAYS: usize = 3660;

#[derive(Debug, Default, Deserialize)]
pub struct ChartParams {
    pub days: Option<String>,
}

impl ChartParams {
    pub fn window_days(&self, default: usize) -> Result<usize, ValidationError> {
        match self.days.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(raw) => raw
                .parse::<usize>()
                .ok()
                .filter(|d| *d <= MAX_TREND_WINDOW_DAYS)
                .ok_or_else(|| {
                    ValidationError::InvalidQuery(format!(
                        "days must be an integer between 0 and {}",
                        MAX_TREND_WINDOW_DAYS
                    ))
                }),
            None => Ok(default),
        }
    }
}

/// Totals, per-category statistics and monthly series over every stored
/// transaction, regardless of any listing filter.
pub async fn summary(State(state): State<AppState>) -> AppResult<Json<SummaryPayload>> {
    let records = state.transaction_snapshot()?;
    let payload = summarize(&records);
    tracing::debug!(
        records = records.len(),
        months = payload.monthly_stats.len(),
        "Computed summary"
    );
    Ok(Json(payload))
}

pub async fn charts(
    State(state): State<AppState>,
    params: Result<Query<ChartParams>, QueryRejection>,
) -> AppResult<Json<ChartPayload>> {
    let Query(params) = params?;
    let window_days = params.window_days(state.config.trend_window_days)?;

    let records = state.transaction_snapshot()?;
    Ok(Json(chart_series(&records, window_days)))
}
