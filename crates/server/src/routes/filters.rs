use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use insightboard_store::{InsightStore, TextField};
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::run_blocking;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct FacetOptions {
    pub end_year: Vec<f64>,
    pub topic: Vec<String>,
    pub sector: Vec<String>,
    pub region: Vec<String>,
    pub pestle: Vec<String>,
    pub source: Vec<String>,
    pub country: Vec<String>,
}

pub async fn options(State(state): State<Arc<AppState>>) -> Result<Json<FacetOptions>, ApiError> {
    let (end_year, topic, sector, region, pestle, source, country) = tokio::try_join!(
        year_options(state.store.clone()),
        label_options(state.store.clone(), TextField::Topic),
        label_options(state.store.clone(), TextField::Sector),
        label_options(state.store.clone(), TextField::Region),
        label_options(state.store.clone(), TextField::Pestle),
        label_options(state.store.clone(), TextField::Source),
        label_options(state.store.clone(), TextField::Country),
    )?;
    Ok(Json(FacetOptions {
        end_year,
        topic,
        sector,
        region,
        pestle,
        source,
        country,
    }))
}

async fn year_options(store: InsightStore) -> Result<Vec<f64>, ApiError> {
    run_blocking(move || store.distinct_end_years()).await
}

async fn label_options(store: InsightStore, field: TextField) -> Result<Vec<String>, ApiError> {
    run_blocking(move || store.distinct_labels(field)).await
}
