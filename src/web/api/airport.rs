use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::display::{AirportInfo, Coordinates};
use crate::web::api::error::{ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct AirportResponse {
    pub status: String,
    pub icao: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub weather: WeatherResponse,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeatherResponse {
    pub temperature: String,
    pub wind: String,
}

impl From<AirportInfo> for AirportResponse {
    fn from(airport: AirportInfo) -> Self {
        AirportResponse {
            status: "Success".to_string(),
            icao: airport.identifier,
            name: airport.name,
            coordinates: airport.coordinates,
            weather: WeatherResponse {
                temperature: airport.temperature,
                wind: airport.wind,
            },
        }
    }
}

#[utoipa::path(
    get,
    path = "/airport/{code}",
    params(
        ("code" = String, Path, description = "ICAO airport code")
    ),
    responses(
        (status = 200, description = "Airport location and weather", body = AirportResponse),
        (status = 404, description = "Airport not found", body = ErrorResponse),
        (status = 502, description = "Upstream provider failed", body = ErrorResponse)
    ),
    tag = "data"
)]
pub async fn get_airport(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> ApiResult<Json<AirportResponse>> {
    let code = code.trim().to_uppercase();
    let airport = state.providers.airports.lookup(&code).await?;
    Ok(Json(AirportResponse::from(airport)))
}
