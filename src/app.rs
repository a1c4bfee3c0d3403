// app.rs - router assembly and shared state for the gate server

use std::sync::Arc;

use axum::{middleware, routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::auth::JwtVerifier;
use crate::config::{AppConfig, ConfigError};
use crate::guard::{AccessGuard, RouteTable};
use crate::handlers;
use crate::middleware::access_guard_middleware;
use crate::upstream::Upstream;

/// State shared by every handler and by the guard middleware.
#[derive(Clone, Debug)]
pub struct AppState {
    pub guard: Arc<AccessGuard>,
    pub upstream: Option<Upstream>,
    pub request_logging: bool,
}

impl AppState {
    pub fn new(guard: AccessGuard, upstream: Option<Upstream>) -> Self {
        Self {
            guard: Arc::new(guard),
            upstream,
            request_logging: false,
        }
    }

    pub fn with_request_logging(mut self, enabled: bool) -> Self {
        self.request_logging = enabled;
        self
    }

    /// Build the verifier, guard and upstream client from configuration.
    pub fn from_config(config: &AppConfig) -> Result<Self, ConfigError> {
        let verifier = JwtVerifier::new(
            config.security.jwt_secret()?,
            config.security.jwt_leeway_secs,
        );
        let guard = AccessGuard::new(RouteTable::default(), Arc::new(verifier));

        let upstream = match config.upstream.url()? {
            Some(base) => Some(Upstream::new(
                base,
                config.upstream.timeout(),
                config.api.max_request_size_bytes,
            )?),
            None => None,
        };

        Ok(Self::new(guard, upstream).with_request_logging(config.api.enable_request_logging))
    }
}

pub fn app(state: AppState) -> Router {
    let router = Router::new()
        .route("/health", get(handlers::health))
        .route("/api/session", get(handlers::session))
        // Everything else is a front-end page
        .fallback(handlers::page)
        .layer(middleware::from_fn_with_state(
            state.guard.clone(),
            access_guard_middleware,
        ));

    let router = if state.request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    };

    router.with_state(state)
}
