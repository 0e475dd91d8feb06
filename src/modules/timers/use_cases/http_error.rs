// Maps the domain error taxonomy onto HTTP status codes.
//
// Validation and state errors are the client's fault; store errors have
// already been retried once by the handlers and surface as server-side
// failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::modules::timers::core::errors::TimerError;
use crate::shared::infrastructure::store::StoreError;

pub fn error_response(err: TimerError) -> Response {
    match &err {
        TimerError::Validation(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()).into_response()
        }
        TimerError::NotFound(_) => StatusCode::NOT_FOUND.into_response(),
        TimerError::InvalidState { .. } => (StatusCode::CONFLICT, err.to_string()).into_response(),
        TimerError::Store(StoreError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE.into_response()
        }
        TimerError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
    }
}
