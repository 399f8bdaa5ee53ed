use axum::{
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::state::SharedState;

/// `GET /metrics`
///
/// Renders a snapshot of the store in the Prometheus text format. The body
/// is exactly the encoder output.
pub async fn metrics(State(state): State<SharedState>) -> Response {
    let body = state.encoder.render(&state.store.snapshot());
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, state.encoder.content_type())],
        body,
    )
        .into_response()
}
