#![allow(dead_code)]

use std::sync::Arc;

use anyhow::Result;
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::SecretString;
use serde_json::{json, Value};
use tower::ServiceExt;

use market_gate::auth::JwtVerifier;
use market_gate::guard::{AccessGuard, RouteTable};
use market_gate::upstream::Upstream;
use market_gate::{app, AppState};

pub const SECRET: &str = "integration-test-secret";

pub fn guard() -> AccessGuard {
    let verifier = JwtVerifier::new(&SecretString::from(SECRET.to_string()), 0);
    AccessGuard::new(RouteTable::default(), Arc::new(verifier))
}

/// Gate without a front end: allowed pages answer with a placeholder.
pub fn gate() -> Router {
    app(AppState::new(guard(), None))
}

pub fn gate_with_upstream(upstream: Upstream) -> Router {
    app(AppState::new(guard(), Some(upstream)))
}

/// Credential for `role`, valid for an hour.
pub fn token(role: &str) -> String {
    sign(json!({
        "role": role,
        "sub": format!("{}-user", role.to_lowercase()),
        "iat": Utc::now().timestamp(),
        "exp": (Utc::now() + Duration::hours(1)).timestamp(),
    }))
}

/// Correctly signed credential that expired an hour ago.
pub fn expired_token(role: &str) -> String {
    sign(json!({
        "role": role,
        "exp": (Utc::now() - Duration::hours(1)).timestamp(),
    }))
}

pub fn sign(claims: Value) -> String {
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(SECRET.as_bytes()),
    )
    .expect("sign test token")
}

/// Send a GET through the gate with an optional `Cookie` header.
pub async fn get(router: Router, path: &str, cookie: Option<&str>) -> Result<Response<Body>> {
    let mut builder = Request::builder().method("GET").uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let response = router.oneshot(builder.body(Body::empty())?).await?;
    Ok(response)
}

pub fn location(response: &Response<Body>) -> Option<&str> {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub async fn json_body(response: Response<Body>) -> Result<Value> {
    let bytes = to_bytes(response.into_body(), usize::MAX).await?;
    Ok(serde_json::from_slice(&bytes)?)
}
