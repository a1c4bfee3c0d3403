use axum::{extract::State, http::HeaderMap};
use serde::Serialize;

use crate::app::AppState;
use crate::auth::Role;
use crate::error::ApiError;
use crate::guard::TOKEN_COOKIE;
use crate::middleware::{cookie_value, ApiResult, ApiResponse};

/// Current credential as seen by the gate.
#[derive(Debug, Serialize)]
pub struct SessionView {
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,
}

/// GET /api/session - decode the `token` cookie
///
/// ```json
/// { "success": true, "data": { "role": "EVENT_CREATOR", "subject": "u-42", "expires_at": 1767225600 } }
/// ```
///
/// Answers 401 when the cookie is missing or does not verify. Unlike the page
/// guard it never touches the cookie.
pub async fn session(State(state): State<AppState>, headers: HeaderMap) -> ApiResult<SessionView> {
    let token = cookie_value(&headers, TOKEN_COOKIE)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| ApiError::unauthorized("Missing credential"))?;

    let claims = state.guard.verifier().verify(token)?;

    Ok(ApiResponse::success(SessionView {
        role: claims.role,
        subject: claims.sub,
        expires_at: claims.exp,
    }))
}
