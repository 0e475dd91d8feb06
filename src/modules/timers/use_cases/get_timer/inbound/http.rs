use axum::{
    Json, extract::Path, extract::State, http::StatusCode, response::IntoResponse,
};
use uuid::Uuid;

use crate::modules::timers::use_cases::http_error::error_response;
use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>, Path(id): Path<Uuid>) -> impl IntoResponse {
    match state.get_timer.handle(id).await {
        Ok(timer) => (StatusCode::OK, Json(timer)).into_response(),
        Err(err) => error_response(err),
    }
}
