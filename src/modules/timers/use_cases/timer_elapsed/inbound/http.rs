use axum::{
    Json, extract::Path, extract::State, http::StatusCode, response::IntoResponse,
};
use serde::Serialize;
use uuid::Uuid;

use crate::modules::timers::use_cases::http_error::error_response;
use crate::shell::state::AppState;

#[derive(Serialize)]
pub struct ElapsedResponse {
    pub elapsed_ms: i64,
}

pub async fn handle(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.timer_elapsed.handle(id).await {
        Ok(elapsed) => (
            StatusCode::OK,
            Json(ElapsedResponse {
                elapsed_ms: elapsed.num_milliseconds(),
            }),
        )
            .into_response(),
        Err(err) => error_response(err),
    }
}
