mod data;
mod filters;
mod health;
mod stats;
mod visualizations;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;
use insightboard_core::{build_filter, FilterQuery, InsightFilter};
use insightboard_store::{GroupKey, GroupOrder, GroupSummary, InsightStore};
use tokio::task;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::error::ApiError;
use crate::state::AppState;

pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::check))
        .route("/api/data", get(data::list))
        .route("/api/filters", get(filters::options))
        .route("/api/stats", get(stats::summary))
        .route(
            "/api/visualizations/country-distribution",
            get(visualizations::country_distribution),
        )
        .route(
            "/api/visualizations/region-distribution",
            get(visualizations::region_distribution),
        )
        .route(
            "/api/visualizations/pestle-distribution",
            get(visualizations::pestle_distribution),
        )
        .route(
            "/api/visualizations/intensity-likelihood-scatter",
            get(visualizations::intensity_likelihood_scatter),
        )
        .route(
            "/api/visualizations/topic-sector-heatmap",
            get(visualizations::topic_sector_heatmap),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn run_blocking<T, F>(call: F) -> Result<T, ApiError>
where
    F: FnOnce() -> insightboard_store::Result<T> + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(call)
        .await
        .map_err(ApiError::internal)?
        .map_err(ApiError::internal)
}

// a repeated query key folds into one comma-separated value, like ?topic=gas,oil
fn filter_from(pairs: Vec<(String, String)>) -> InsightFilter {
    build_filter(&FilterQuery::from_pairs(pairs))
}

async fn grouped(
    store: InsightStore,
    filter: InsightFilter,
    key: GroupKey,
    order: GroupOrder,
    limit: Option<u32>,
) -> Result<Vec<GroupSummary>, ApiError> {
    run_blocking(move || store.group_summaries(&filter, key, order, limit)).await
}
