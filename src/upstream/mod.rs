// upstream/mod.rs - forwarding of allowed requests to the front end that renders the pages

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    extract::Request,
    http::{header, HeaderMap, HeaderName},
    response::Response,
};
use url::Url;

use crate::config::ConfigError;
use crate::error::ApiError;

// Connection-scoped headers that must not be relayed by a proxy.
const HOP_BY_HOP: [HeaderName; 8] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::PROXY_AUTHORIZATION,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
    header::HOST,
];

/// HTTP client bound to the front-end origin.
#[derive(Debug, Clone)]
pub struct Upstream {
    base: Url,
    client: reqwest::Client,
    max_body_bytes: usize,
}

impl Upstream {
    pub fn new(base: Url, timeout: Duration, max_body_bytes: usize) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            // Front-end redirects belong to the browser, not to the gate.
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            base,
            client,
            max_body_bytes,
        })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Whether the front end answers at all.
    pub async fn is_reachable(&self) -> bool {
        match self.client.head(self.base.clone()).send().await {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Upstream {} unreachable: {}", self.base, e);
                false
            }
        }
    }

    /// Replay `request` against the front end and relay its answer.
    pub async fn forward(&self, request: Request) -> Result<Response, ApiError> {
        let (parts, body) = request.into_parts();

        let body = to_bytes(body, self.max_body_bytes).await.map_err(|e| {
            tracing::warn!("Rejected request body for {}: {}", parts.uri.path(), e);
            ApiError::payload_too_large(format!(
                "Request body exceeds {} bytes",
                self.max_body_bytes
            ))
        })?;

        let mut target = self.base.clone();
        target.set_path(parts.uri.path());
        target.set_query(parts.uri.query());

        // The guard judged `parts.uri.path()`; never send the front end anything else.
        if target.path() != parts.uri.path() {
            tracing::warn!(
                "Refusing to forward {}: rewritten to {}",
                parts.uri.path(),
                target.path()
            );
            return Err(ApiError::bad_request("Malformed request path"));
        }

        let mut headers = parts.headers;
        strip_hop_by_hop(&mut headers);
        headers.remove(header::CONTENT_LENGTH);

        let upstream_response = self
            .client
            .request(parts.method, target.clone())
            .headers(headers)
            .body(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Upstream request to {} failed: {}", target, e);
                ApiError::bad_gateway("Front end unavailable")
            })?;

        let status = upstream_response.status();
        let mut response_headers = upstream_response.headers().clone();
        strip_hop_by_hop(&mut response_headers);
        response_headers.remove(header::CONTENT_LENGTH);

        // Relayed chunk by chunk; the page body is never held whole.
        let mut response = Response::new(Body::from_stream(upstream_response.bytes_stream()));
        *response.status_mut() = status;
        *response.headers_mut() = response_headers;
        Ok(response)
    }
}

fn strip_hop_by_hop(headers: &mut HeaderMap) {
    for name in HOP_BY_HOP.iter() {
        headers.remove(name);
    }
    headers.remove("keep-alive");
}
