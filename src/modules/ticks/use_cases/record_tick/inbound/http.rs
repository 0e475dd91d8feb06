// Fire-and-forget: the tick is buffered, never written inline. A full
// buffer drops the entry (already logged by the queue) and the client
// still gets 202.

use axum::{extract::State, http::StatusCode, response::IntoResponse};
use chrono::Utc;

use crate::shell::state::AppState;

pub async fn handle(State(state): State<AppState>) -> impl IntoResponse {
    state.tick_queue.offer(Utc::now()).await;
    StatusCode::ACCEPTED
}
