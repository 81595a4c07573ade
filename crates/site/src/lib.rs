//! Data Insights Hub site
//!
//! Serves the project catalog and detail pages, a small JSON API, and the
//! pre-generated thumbnails. The same renderers back `site export`, which
//! writes the whole site to static files.

pub mod export;
pub mod handlers;
pub mod middleware;
pub mod render;

use axum::{middleware as axum_middleware, routing::get, Router};
use datahub_common::{config::AppConfig, query::Catalog};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::middleware::rate_limit::{rate_limit_middleware, RateLimitState};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub catalog: Catalog<'static>,
}

impl AppState {
    /// State over the built-in catalog
    pub fn new(config: AppConfig) -> Self {
        Self {
            config: Arc::new(config),
            catalog: Catalog::builtin(),
        }
    }
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    let config = state.config.clone();

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    let api_routes = Router::new()
        .route("/projects", get(handlers::api::list_projects))
        .route("/projects/{id}", get(handlers::api::get_project))
        .route("/categories", get(handlers::api::list_categories));

    let site_routes = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // Pages
        .route("/", get(handlers::pages::catalog))
        .route("/category/{key}", get(handlers::pages::category))
        .route("/project/{id}", get(handlers::pages::project))
        .nest("/api", api_routes)
        .route_layer(axum_middleware::from_fn(middleware::track_metrics))
        .nest_service("/thumbnails", ServeDir::new(&config.thumbnails.dir))
        .fallback(handlers::pages::not_found);

    let base_path = config.site.base_path.trim_end_matches('/');
    let mut app = if base_path.is_empty() {
        site_routes
    } else {
        Router::new()
            .nest(base_path, site_routes)
            .fallback(handlers::pages::not_found)
    };

    if config.rate_limit.enabled {
        let limit = RateLimitState::new(
            config.rate_limit.requests_per_second,
            config.rate_limit.burst,
        );
        app = app.layer(axum_middleware::from_fn_with_state(
            limit,
            rate_limit_middleware,
        ));
    }

    app.layer(TimeoutLayer::new(config.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    pub fn state() -> AppState {
        let mut config = AppConfig::default();
        config.rate_limit.enabled = false;
        AppState::new(config)
    }

    /// Issue a GET against a fresh router and return status and body
    pub async fn get(app: Router, uri: &str) -> (StatusCode, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(body.to_vec()).unwrap())
    }
}
