use std::time::Instant;

use axum::{
    extract::Request,
    http::HeaderValue,
    middleware::Next,
    response::Response,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Logs every request with a generated id, echoed back in `x-request-id`
pub async fn log_request(req: Request, next: Next) -> Response {
    let request_id = uuid::Uuid::new_v4().to_string();
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let started = Instant::now();

    let mut response = next.run(req).await;

    let status = response.status();
    let duration_ms = started.elapsed().as_millis() as u64;

    if status.is_server_error() {
        tracing::warn!(%request_id, %method, %path, %status, duration_ms, "Request failed");
    } else if status.is_client_error() {
        tracing::info!(%request_id, %method, %path, %status, duration_ms, "Request rejected");
    } else {
        tracing::info!(%request_id, %method, %path, %status, duration_ms, "Request processed");
    }

    if let Ok(value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}
