use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::modules::timers::use_cases::http_error::error_response;
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>) -> impl IntoResponse {
    match state.list_timers.handle().await {
        Ok(timers) => (StatusCode::OK, Json(timers)).into_response(),
        Err(err) => error_response(err),
    }
}
