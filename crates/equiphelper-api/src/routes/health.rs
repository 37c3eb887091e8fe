use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use utoipa::ToSchema;

use crate::{error::ApiResult, state::AppState};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub services: HashMap<String, String>,
}

/// Health check endpoint
/// 
/// Reports the configured model, reference sources and live session count
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<HealthResponse>> {
    let settings = state.answers.settings();
    let mut services = HashMap::new();
    
    services.insert("llm".to_string(), settings.model.clone());
    services.insert(
        "reference_sources".to_string(),
        settings.sources.len().to_string(),
    );
    
    match state.answers.store().len().await {
        Ok(count) => services.insert("sessions".to_string(), count.to_string()),
        Err(e) => {
            tracing::warn!("Transcript store unavailable: {}", e);
            services.insert("sessions".to_string(), "unavailable".to_string())
        }
    };
    
    Ok(Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        services,
    }))
}
