use axum::{
    Json, extract::State, extract::rejection::JsonRejection, http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;

use crate::modules::timers::use_cases::create_timer::command::CreateTimer;
use crate::modules::timers::use_cases::http_error::error_response;
use crate::shell::state::AppState;

#[derive(Deserialize)]
pub struct CreateTimerBody {
    pub name: String,
}

pub async fn handle(
    State(state): State<AppState>,
    body: Result<Json<CreateTimerBody>, JsonRejection>,
) -> impl IntoResponse {
    let Json(body) = match body {
        Ok(b) => b,
        Err(_) => return StatusCode::UNPROCESSABLE_ENTITY.into_response(),
    };

    match state.create_timer.handle(CreateTimer { name: body.name }).await {
        Ok(timer) => (StatusCode::CREATED, Json(timer)).into_response(),
        Err(err) => error_response(err),
    }
}
