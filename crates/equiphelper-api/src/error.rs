use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use equiphelper_types::ErrorBody;
use thiserror::Error;

use crate::service::AnswerError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    
    #[error("Answer failed: {0}")]
    Answer(#[from] AnswerError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Answer(ref e) => {
                match e {
                    AnswerError::Timeout { .. } => tracing::error!("Upstream timeout: {}", e),
                    _ => tracing::error!("Error processing the request: {}", e),
                }
                (StatusCode::INTERNAL_SERVER_ERROR, "Error processing the request".to_string())
            }
        };
        
        (status, Json(ErrorBody::new(message))).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
