use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;

use crate::app::AppState;

/// GET /health - liveness check
///
/// Reports `degraded` with 503 when a front end is configured but does not answer.
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    let Some(upstream) = &state.upstream else {
        return (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "upstream": null
                }
            })),
        );
    };

    if upstream.is_reachable().await {
        (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": {
                    "status": "ok",
                    "timestamp": now,
                    "upstream": upstream.base().as_str()
                }
            })),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "success": false,
                "error": "front end unavailable",
                "data": {
                    "status": "degraded",
                    "timestamp": now,
                    "upstream": upstream.base().as_str()
                }
            })),
        )
    }
}
