mod common;

use anyhow::Result;
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let res = common::get(common::gate(), "/health", None).await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = common::json_body(res).await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], json!("ok"));
    assert!(body["data"]["upstream"].is_null());
    Ok(())
}

#[tokio::test]
async fn session_reports_role_and_subject() -> Result<()> {
    let cookie = format!("theme=dark; token={}", common::token("EVENT_CREATOR"));
    let res = common::get(common::gate(), "/api/session", Some(&cookie)).await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = common::json_body(res).await?;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["role"], json!("EVENT_CREATOR"));
    assert_eq!(body["data"]["subject"], json!("event_creator-user"));
    assert!(body["data"]["expires_at"].is_i64());
    Ok(())
}

#[tokio::test]
async fn session_without_credential_is_unauthorized() -> Result<()> {
    let res = common::get(common::gate(), "/api/session", None).await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = common::json_body(res).await?;
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["code"], json!("UNAUTHORIZED"));
    Ok(())
}

#[tokio::test]
async fn session_with_expired_credential_is_unauthorized_and_keeps_cookie() -> Result<()> {
    let cookie = format!("token={}", common::expired_token("ADMIN"));
    let res = common::get(common::gate(), "/api/session", Some(&cookie)).await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    assert!(common::set_cookies(&res).is_empty());

    let body = common::json_body(res).await?;
    assert_eq!(body["error"], json!("Invalid or expired credential"));
    Ok(())
}

#[tokio::test]
async fn session_rejects_unknown_role() -> Result<()> {
    let cookie = format!("token={}", common::sign(json!({"role": "MODERATOR"})));
    let res = common::get(common::gate(), "/api/session", Some(&cookie)).await?;

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}
