use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use insightboard_core::Insight;
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::{filter_from, run_blocking};
use crate::state::AppState;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 50;

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub page: u64,
    pub limit: u64,
    pub total: u64,
    pub pages: u64,
    pub items: Vec<Insight>,
}

pub async fn list(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<ListResponse>, ApiError> {
    let page = positive_or(lookup(&params, "page"), DEFAULT_PAGE);
    let limit = positive_or(lookup(&params, "limit"), DEFAULT_LIMIT);
    // limit >= 1 after coercion, so the offset stays page-aligned
    let offset = (page - 1).saturating_mul(limit);
    let filter = filter_from(params);

    let count_store = state.store.clone();
    let count_filter = filter.clone();
    let find_store = state.store.clone();
    let (total, items) = tokio::try_join!(
        run_blocking(move || count_store.count(&count_filter)),
        run_blocking(move || find_store.find(&filter, offset, limit)),
    )?;

    Ok(Json(ListResponse {
        page,
        limit,
        total,
        pages: total.div_ceil(limit),
        items,
    }))
}

fn lookup<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(name, _)| name.as_str() == key)
        .map(|(_, value)| value.as_str())
}

fn positive_or(raw: Option<&str>, default: u64) -> u64 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|value| *value > 0)
        .map(|value| value as u64)
        .unwrap_or(default)
}
