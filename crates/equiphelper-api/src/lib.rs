pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::config::Config;
use crate::middleware::logging;
use crate::routes::{ask, health};
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    paths(ask::ask, health::health_check),
    components(schemas(
        equiphelper_types::AskRequest,
        equiphelper_types::AskResponse,
        equiphelper_types::ErrorBody,
        health::HealthResponse,
    )),
    tags(
        (name = "ask", description = "Equipment questions answered by the LLM"),
        (name = "health", description = "Service status"),
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router with middleware
pub fn router(state: Arc<AppState>) -> Router {
    let api_routes = Router::new()
        // Health
        .route("/health", get(health::health_check))
        // Answers
        .route("/api/ask", post(ask::ask))
        // Docs
        .route("/api-docs/openapi.json", get(openapi_json));
    
    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);
    
    Router::new()
        .merge(api_routes)
        .layer(axum_middleware::from_fn(logging::log_request))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(build_cors_layer(&state.config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn build_cors_layer(config: &Config) -> CorsLayer {
    if config.cors.enabled {
        let mut cors = CorsLayer::new()
            .allow_methods([
                axum::http::Method::GET,
                axum::http::Method::POST,
                axum::http::Method::OPTIONS,
            ])
            .allow_headers(Any);
        
        if config.cors.origins.iter().any(|o| o == "*") {
            cors = cors.allow_origin(Any);
        } else {
            let origins: Vec<axum::http::HeaderValue> = config
                .cors
                .origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();
            cors = cors.allow_origin(origins);
        }
        
        cors
    } else {
        CorsLayer::permissive()
    }
}
