use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::SET_COOKIE,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use super::cookies::{clear_token_cookie, cookie_value};
use crate::error::ApiError;
use crate::guard::{
    canonical_path, AccessGuard, Decision, GuardRequest, SIGNUP_PENDING_COOKIE, TOKEN_COOKIE,
};

/// Route access middleware.
///
/// Only canonical paths get past this layer: any other spelling is answered
/// with a 308 to its canonical form (400 if it has none), so the path the
/// guard judges is the path the front end receives. The guard then runs for
/// paths on its trigger surface and its decision becomes a pass-through, a
/// 307 redirect, or a 307 redirect that also deletes the `token` cookie.
/// Paths off the surface go straight to the next layer.
pub async fn access_guard_middleware(
    State(guard): State<Arc<AccessGuard>>,
    request: Request,
    next: Next,
) -> Response {
    let path = match canonical_path(request.uri().path()) {
        Ok(path) => path,
        Err(e) => {
            tracing::warn!("Rejected request path: {}", e);
            return ApiError::bad_request("Malformed request path").into_response();
        }
    };

    if path != request.uri().path() {
        let location = match request.uri().query() {
            Some(query) => format!("{}?{}", path, query),
            None => path,
        };
        tracing::debug!("Canonicalized {} -> {}", request.uri().path(), location);
        return Redirect::permanent(&location).into_response();
    }

    if !guard.routes().is_guarded(&path) {
        return next.run(request).await;
    }

    let decision = {
        let headers = request.headers();
        guard.evaluate(&GuardRequest {
            path: &path,
            token: cookie_value(headers, TOKEN_COOKIE),
            signup_pending: cookie_value(headers, SIGNUP_PENDING_COOKIE),
        })
    };

    tracing::debug!(
        "Access guard on {}: {} {}",
        path,
        decision.kind(),
        decision.location().unwrap_or("")
    );

    match decision {
        Decision::Allow => next.run(request).await,
        Decision::Redirect { location, .. } => Redirect::temporary(&location).into_response(),
        Decision::RedirectAndClear { location, .. } => {
            let mut response = Redirect::temporary(&location).into_response();
            response
                .headers_mut()
                .append(SET_COOKIE, clear_token_cookie());
            response
        }
    }
}
