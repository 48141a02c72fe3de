use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::display::{AircraftSnapshot, Coordinates};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct AircraftResponse {
    pub aircraft: Vec<AircraftSnapshot>,
}

#[utoipa::path(
    get,
    path = "/aircraft/{latitude}/{longitude}/{distance}",
    params(
        ("latitude" = f64, Path, description = "Latitude of the origin"),
        ("longitude" = f64, Path, description = "Longitude of the origin"),
        ("distance" = i64, Path, description = "Search radius in nautical miles")
    ),
    responses(
        (status = 200, description = "Aircraft within range, nearest first", body = AircraftResponse),
        (status = 400, description = "Distance is not positive", body = ErrorResponse),
        (status = 502, description = "Upstream provider failed", body = ErrorResponse)
    ),
    tag = "data"
)]
pub async fn get_aircraft(
    State(state): State<AppState>,
    Path((latitude, longitude, distance)): Path<(f64, f64, i64)>,
) -> ApiResult<Json<AircraftResponse>> {
    if distance <= 0 {
        return Err(ApiError::Validation(
            "The distance must be positive".to_string(),
        ));
    }
    let range = u32::try_from(distance).unwrap_or(u32::MAX);

    let aircraft = state
        .providers
        .aircraft
        .nearby(Coordinates::new(latitude, longitude), range)
        .await?;
    Ok(Json(AircraftResponse { aircraft }))
}
