use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use equiphelper_types::{AskRequest, AskResponse, ErrorBody};
use std::sync::Arc;

use crate::{error::{ApiError, ApiResult}, state::AppState};

/// Answer a question about firefighting equipment
#[utoipa::path(
    post,
    path = "/api/ask",
    request_body = AskRequest,
    responses(
        (status = 200, description = "Answer generated", body = AskResponse),
        (status = 400, description = "Question missing", body = ErrorBody),
        (status = 500, description = "Reference data or LLM failure", body = ErrorBody)
    ),
    tag = "ask"
)]
pub async fn ask(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> ApiResult<Json<AskResponse>> {
    let Json(req) = payload.map_err(|rejection| {
        tracing::warn!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest(rejection.body_text())
    })?;
    
    let question = req
        .question
        .filter(|q| !q.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Question is required".to_string()))?;
    
    let response = state
        .answers
        .answer(&question, req.session_id.as_deref())
        .await?;
    
    Ok(Json(response))
}
