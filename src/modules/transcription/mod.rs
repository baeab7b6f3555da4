use axum::Router;
use axum::middleware;
use axum::routing::post;

use crate::state::AppState;

pub mod dispatcher;
pub mod dto;
pub mod error;
pub mod handler;
pub mod model;
pub mod service;

pub fn router(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/transcribe", post(handler::transcribe))
        .route_layer(middleware::from_fn_with_state(
            state,
            crate::middleware::auth::auth_middleware,
        ))
}
