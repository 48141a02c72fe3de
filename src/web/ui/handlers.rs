use axum::extract::State;

use crate::web::api::error::{ApiError, ApiResult};
use crate::web::state::AppState;

use super::templates::DisplayTemplate;

pub async fn display(State(state): State<AppState>) -> ApiResult<DisplayTemplate> {
    if state.snapshots.has_changed().is_err() {
        return Err(ApiError::DisplayStopped);
    }
    let snapshot = state.snapshots.borrow().clone();
    Ok(DisplayTemplate {
        snapshot,
        canvas_size: state.canvas_size,
    })
}
