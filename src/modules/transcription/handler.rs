use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::{error, info, warn};

use super::dispatcher::Dispatched;
use super::dto::TranscribeRequest;
use super::error::ValidationError;
use crate::common::response::{
    ApiBadRequest, ApiError, ApiSuccess, ErrorResponse, MessageResponse, TranscriptResponse,
};
use crate::state::AppState;

/// Transcribe a remote media file
///
/// Without `webhook_url`/`id` the request waits for the transcript. With both,
/// the job runs in the background and the outcome is POSTed to `webhook_url`.
#[utoipa::path(
    post,
    path = "/transcribe",
    request_body = TranscribeRequest,
    responses(
        (status = 200, description = "Transcription result", body = TranscriptResponse),
        (status = 202, description = "Accepted for background processing", body = MessageResponse),
        (status = 400, description = "Missing media_url", body = ErrorResponse),
        (status = 401, description = "Unauthorized", body = MessageResponse),
        (status = 422, description = "Malformed request body", body = MessageResponse),
        (status = 500, description = "Transcription failed or webhook_url/id mismatch", body = MessageResponse),
        (status = 503, description = "Job queue is full", body = MessageResponse)
    ),
    tag = "Transcription",
    security(("api_key" = []))
)]
pub async fn transcribe(
    State(state): State<AppState>,
    payload: Result<Json<TranscribeRequest>, JsonRejection>,
) -> Response {
    let Json(payload) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "Rejected malformed request body");
            return ApiError(rejection.body_text(), rejection.status()).into_response();
        }
    };

    info!(
        media_url = ?payload.media_url,
        output = ?payload.output,
        webhook_url = ?payload.webhook_url,
        id = ?payload.id,
        "Received transcription request"
    );

    let request = match payload.validate() {
        Ok(request) => request,
        Err(e) => return validation_response(e, state.config.pairing_error_status),
    };

    match state.dispatcher.dispatch(request).await {
        Ok(Dispatched::Accepted { job_id }) => {
            info!(job_id = %job_id, "Returning 202 Accepted, processing in background");
            ApiSuccess(
                MessageResponse {
                    message: "processing".to_string(),
                },
                StatusCode::ACCEPTED,
            )
            .into_response()
        }
        Ok(Dispatched::Completed {
            job_id,
            result: Ok(content),
        }) => {
            info!(job_id = %job_id, "Returning transcription result");
            ApiSuccess(TranscriptResponse { response: content }, StatusCode::OK).into_response()
        }
        Ok(Dispatched::Completed {
            job_id,
            result: Err(e),
        }) => {
            error!(job_id = %job_id, error = %e, "Error during synchronous transcription");
            ApiError(e.to_string(), StatusCode::INTERNAL_SERVER_ERROR).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Background job refused");
            ApiError(e.to_string(), StatusCode::SERVICE_UNAVAILABLE).into_response()
        }
    }
}

fn validation_response(e: ValidationError, pairing_status: StatusCode) -> Response {
    match e {
        ValidationError::MissingMediaUrl => {
            error!("Missing media_url parameter in request");
            ApiBadRequest(e.to_string()).into_response()
        }
        ValidationError::MissingCorrelationId => {
            warn!("id is missing when webhook_url is provided");
            ApiError(e.to_string(), pairing_status).into_response()
        }
        ValidationError::MissingWebhookUrl => {
            warn!("webhook_url is missing when id is provided");
            ApiError(e.to_string(), pairing_status).into_response()
        }
    }
}
