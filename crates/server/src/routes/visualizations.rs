use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;
use insightboard_store::{GroupKey, GroupOrder, GroupSummary, GroupValue, HeatmapCell, ScatterPoint};
use itertools::Itertools;
use serde::Serialize;

use crate::error::ApiError;
use crate::routes::{filter_from, grouped, run_blocking};
use crate::state::AppState;

pub const COUNTRY_DISTRIBUTION_CAP: u32 = 20;
pub const SCATTER_SAMPLE_CAP: u64 = 1000;
pub const HEATMAP_TOPIC_CAP: usize = 15;

pub async fn country_distribution(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<GroupSummary>>, ApiError> {
    let filter = filter_from(params);
    let summaries = grouped(
        state.store.clone(),
        filter,
        GroupKey::Country,
        GroupOrder::CountDescending,
        Some(COUNTRY_DISTRIBUTION_CAP),
    )
    .await?;
    Ok(Json(summaries))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionBucket {
    #[serde(rename = "_id")]
    pub key: GroupValue,
    pub count: u64,
    pub avg_intensity: Option<f64>,
}

pub async fn region_distribution(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<RegionBucket>>, ApiError> {
    let filter = filter_from(params);
    let summaries = grouped(
        state.store.clone(),
        filter,
        GroupKey::Region,
        GroupOrder::CountDescending,
        None,
    )
    .await?;
    let buckets = summaries
        .into_iter()
        .map(|group| RegionBucket {
            key: group.key,
            count: group.count,
            avg_intensity: group.avg_intensity,
        })
        .collect();
    Ok(Json(buckets))
}

#[derive(Debug, Serialize)]
pub struct PestleBucket {
    #[serde(rename = "_id")]
    pub key: GroupValue,
    pub count: u64,
}

pub async fn pestle_distribution(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<PestleBucket>>, ApiError> {
    let filter = filter_from(params);
    let summaries = grouped(
        state.store.clone(),
        filter,
        GroupKey::Pestle,
        GroupOrder::CountDescending,
        None,
    )
    .await?;
    let buckets = summaries
        .into_iter()
        .map(|group| PestleBucket {
            key: group.key,
            count: group.count,
        })
        .collect();
    Ok(Json(buckets))
}

pub async fn intensity_likelihood_scatter(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<ScatterPoint>>, ApiError> {
    let filter = filter_from(params);
    let store = state.store.clone();
    let points = run_blocking(move || store.scatter_points(&filter, SCATTER_SAMPLE_CAP)).await?;
    Ok(Json(points))
}

#[derive(Debug, Serialize)]
pub struct HeatmapTopic {
    #[serde(rename = "_id")]
    pub topic: String,
    pub sectors: Vec<HeatmapSector>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeatmapSector {
    pub sector: String,
    pub count: u64,
    pub avg_relevance: Option<f64>,
}

pub async fn topic_sector_heatmap(
    State(state): State<Arc<AppState>>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<HeatmapTopic>>, ApiError> {
    let filter = filter_from(params);
    let store = state.store.clone();
    let cells = run_blocking(move || store.heatmap_cells(&filter)).await?;
    Ok(Json(regroup_by_topic(cells, HEATMAP_TOPIC_CAP)))
}

fn regroup_by_topic(cells: Vec<HeatmapCell>, topic_cap: usize) -> Vec<HeatmapTopic> {
    let mut topics = Vec::new();
    // cells arrive sorted by topic, so each topic is one contiguous run
    let runs = cells.into_iter().group_by(|cell| cell.topic.clone());
    for (topic, cells) in &runs {
        if topics.len() == topic_cap {
            break;
        }
        topics.push(HeatmapTopic {
            topic,
            sectors: cells
                .map(|cell| HeatmapSector {
                    sector: cell.sector,
                    count: cell.count,
                    avg_relevance: cell.avg_relevance,
                })
                .collect(),
        });
    }
    topics
}
