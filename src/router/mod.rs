//! Router configuration - v1 registry API

use std::time::Duration;

use axum::{
    Router,
    http::StatusCode,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::app_state::AppState;
use crate::auth::middleware::auth_middleware;
use crate::handlers;
use crate::middleware::{add_security_headers, request_logger_middleware};
use crate::openapi::openapi_json;

/// Financing statement routes; every one requires a bearer token.
fn financing_statement_routes(app_state: &AppState) -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_financing_statement))
        .route("/{registration_num}", get(handlers::get_financing_statement))
        .route("/{registration_num}/discharges", post(handlers::create_discharge))
        .route(
            "/{registration_num}/discharges/{discharge_num}",
            get(handlers::get_discharge),
        )
        .layer(from_fn_with_state(app_state.clone(), auth_middleware))
}

/// Build the application router.
pub fn build_router(app_state: AppState) -> Router {
    let request_timeout = Duration::from_secs(app_state.config.request_timeout);

    let v1_api = Router::new()
        .nest("/financing-statements", financing_statement_routes(&app_state))
        .route("/docs/openapi.json", get(openapi_json));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", v1_api)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(from_fn(request_logger_middleware))
                .layer(from_fn(add_security_headers))
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                .layer(CorsLayer::permissive()),
        )
        .with_state(app_state)
}
