use axum::{
    Json, Router,
    extract::State,
    response::IntoResponse,
    routing::{get, post},
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::modules::ticks::use_cases::list_ticks::inbound::http as list_ticks_http;
use crate::modules::ticks::use_cases::record_tick::inbound::http as record_tick_http;
use crate::modules::timers::use_cases::create_timer::inbound::http as create_http;
use crate::modules::timers::use_cases::delete_timer::inbound::http as delete_http;
use crate::modules::timers::use_cases::get_timer::inbound::http as get_http;
use crate::modules::timers::use_cases::list_timers::inbound::http as list_http;
use crate::modules::timers::use_cases::start_timer::inbound::http as start_http;
use crate::modules::timers::use_cases::stop_timer::inbound::http as stop_http;
use crate::modules::timers::use_cases::timer_elapsed::inbound::http as elapsed_http;
use crate::shell::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/timers", post(create_http::handle).get(list_http::handle))
        .route(
            "/timers/{id}",
            get(get_http::handle).delete(delete_http::handle),
        )
        .route("/timers/{id}/start", post(start_http::handle))
        .route("/timers/{id}/stop", post(stop_http::handle))
        .route("/timers/{id}/elapsed", get(elapsed_http::handle))
        .route(
            "/ticks",
            post(record_tick_http::handle).get(list_ticks_http::handle),
        )
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let db = if state.health.is_available() {
        "available"
    } else {
        "unavailable"
    };
    Json(serde_json::json!({ "db": db }))
}
