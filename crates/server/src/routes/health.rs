use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tokio::task;
use tracing::error;

use crate::state::AppState;

pub async fn check(State(state): State<Arc<AppState>>) -> Response {
    let store = state.store.clone();
    let ping = match task::spawn_blocking(move || store.ping()).await {
        Ok(result) => result.map_err(anyhow::Error::from),
        Err(join) => Err(anyhow::Error::from(join)),
    };
    match ping {
        Ok(()) => Json(json!({ "status": "ok" })).into_response(),
        Err(err) => {
            error!("health_check_failed" = %err);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "status": "error", "message": "Database connection failed" })),
            )
                .into_response()
        }
    }
}
