use utoipa::OpenApi;
use crate::common::response::{ErrorResponse, MessageResponse, TranscriptResponse};
use crate::modules::transcription::dto::TranscribeRequest;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::transcription::handler::transcribe,
    ),
    components(
        schemas(TranscribeRequest, TranscriptResponse, MessageResponse, ErrorResponse)
    ),
    tags(
        (name = "Transcription", description = "Media transcription with optional webhook delivery")
    ),
    security(
        ("api_key" = [])
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

use utoipa::Modify;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};

pub struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "api_key",
                SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::new("X-API-Key"))),
            );
        }
    }
}
