use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use insightboard_store::{GroupKey, GroupOrder, GroupSummary};
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::{filter_from, grouped};
use crate::state::AppState;

pub const COUNTRY_GROUP_CAP: u32 = 50;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub by_year: Vec<GroupSummary>,
    pub by_country: Vec<GroupSummary>,
    pub by_sector: Vec<GroupSummary>,
}

pub async fn summary(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<StatsResponse>, ApiError> {
    let filter = filter_from(params);
    let (by_year, by_country, by_sector) = tokio::try_join!(
        grouped(
            state.store.clone(),
            filter.clone(),
            GroupKey::EndYear,
            GroupOrder::KeyAscending,
            None,
        ),
        grouped(
            state.store.clone(),
            filter.clone(),
            GroupKey::Country,
            GroupOrder::CountDescending,
            Some(COUNTRY_GROUP_CAP),
        ),
        grouped(
            state.store.clone(),
            filter,
            GroupKey::Sector,
            GroupOrder::CountDescending,
            None,
        ),
    )?;
    Ok(Json(StatsResponse {
        by_year,
        by_country,
        by_sector,
    }))
}
