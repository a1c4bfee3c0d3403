use axum::{
    extract::{Request, State},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::app::AppState;
use crate::error::ApiError;
use crate::middleware::ApiResponse;

/// Fallback for every page route.
///
/// With an upstream configured the request is forwarded to the front end;
/// otherwise the gate answers with a placeholder naming the page that would
/// have been rendered.
pub async fn page(State(state): State<AppState>, request: Request) -> Result<Response, ApiError> {
    match &state.upstream {
        Some(upstream) => upstream.forward(request).await,
        None => {
            let path = request.uri().path();
            Ok(ApiResponse::success(json!({
                "page": path,
                "rendered_by": null
            }))
            .into_response())
        }
    }
}
