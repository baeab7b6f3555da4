use crate::common::response::ApiError;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};

pub const API_KEY_HEADER: &str = "x-api-key";

pub async fn auth_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let provided = req
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match provided {
        Some(key) if key == state.config.api_key => Ok(next.run(req).await),
        Some(_) => {
            tracing::warn!("Rejected request with invalid API key");
            Err(ApiError("Unauthorized".to_string(), StatusCode::UNAUTHORIZED))
        }
        None => {
            tracing::warn!("Rejected request without API key");
            Err(ApiError("Unauthorized".to_string(), StatusCode::UNAUTHORIZED))
        }
    }
}
