use axum::{extract::State, http::StatusCode, Json};

use crate::display::{DisplaySnapshot, DrawCommand, InputEvent};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/display",
    responses(
        (status = 200, description = "Current display state", body = DisplaySnapshot),
        (status = 503, description = "Display stopped", body = ErrorResponse)
    ),
    tag = "display"
)]
pub async fn get_display(State(state): State<AppState>) -> ApiResult<Json<DisplaySnapshot>> {
    if state.snapshots.has_changed().is_err() {
        return Err(ApiError::DisplayStopped);
    }
    let snapshot = state.snapshots.borrow().clone();
    Ok(Json(snapshot))
}

#[utoipa::path(
    get,
    path = "/api/display/frame",
    responses(
        (status = 200, description = "Draw commands of the last frame", body = Vec<DrawCommand>),
        (status = 503, description = "Display stopped", body = ErrorResponse)
    ),
    tag = "display"
)]
pub async fn get_frame(State(state): State<AppState>) -> ApiResult<Json<Vec<DrawCommand>>> {
    if state.frames.has_changed().is_err() {
        return Err(ApiError::DisplayStopped);
    }
    let frame = state.frames.borrow().clone();
    Ok(Json(frame))
}

#[utoipa::path(
    post,
    path = "/api/display/input",
    request_body = InputEvent,
    responses(
        (status = 202, description = "Input queued for the next frame"),
        (status = 503, description = "Display stopped", body = ErrorResponse)
    ),
    tag = "display"
)]
pub async fn post_input(
    State(state): State<AppState>,
    Json(event): Json<InputEvent>,
) -> ApiResult<StatusCode> {
    log::debug!("Display input {:?}", event);
    state
        .inputs
        .send(event)
        .map_err(|_| ApiError::DisplayStopped)?;
    Ok(StatusCode::ACCEPTED)
}
