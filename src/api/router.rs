//! Router setup and configuration.

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers::{health, subject, user};
use crate::api::state::AppState;

/// Health routes, never prefixed.
pub const HEALTH_PATHS: [&str; 2] = ["/health", "/ready"];

/// Resource routes, mounted under `server.api_prefix`.
pub const RESOURCE_PATHS: [&str; 7] = [
    "/subject",
    "/subjects",
    "/subject/{id}",
    "/subject/{id}/students",
    "/user",
    "/users",
    "/user/{id}",
];

/// Create the main application router.
pub fn create_router(state: AppState) -> Router {
    let config = &state.config;

    // Health and metrics routes (never prefixed)
    let mut health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready));

    if config.observability.metrics_enabled {
        health_routes = health_routes.route(
            &config.observability.metrics_path,
            get(health::metrics),
        );
    }

    // Resource routes
    let resource_routes = Router::new()
        .route("/subject", post(subject::create))
        .route("/subjects", get(subject::list))
        .route(
            "/subject/{id}",
            get(subject::get_one)
                .put(subject::update)
                .delete(subject::delete),
        )
        .route("/subject/{id}/students", get(subject::students))
        .route("/user", post(user::create))
        .route("/users", get(user::list))
        .route("/user/{id}", get(user::get_one));

    let router = Router::new().merge(health_routes);
    let router = if config.server.api_prefix.is_empty() {
        router.merge(resource_routes)
    } else {
        router.nest(&config.server.api_prefix, resource_routes)
    };

    router
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .with_state(state)
}
