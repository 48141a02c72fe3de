use utoipa::OpenApi;

use super::api::aircraft::AircraftResponse;
use super::api::airport::{AirportResponse, WeatherResponse};
use super::api::error::ErrorResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::airport::get_airport,
        super::api::aircraft::get_aircraft,
        super::api::display::get_display,
        super::api::display::get_frame,
        super::api::display::post_input,
    ),
    components(
        schemas(
            AirportResponse,
            WeatherResponse,
            AircraftResponse,
            ErrorResponse,
            crate::display::AircraftSnapshot,
            crate::display::Coordinates,
            crate::display::DisplaySnapshot,
            crate::display::DisplayFields,
            crate::display::LitBlip,
            crate::display::Generation,
            crate::display::DrawCommand,
            crate::display::Color,
            crate::display::Point,
            crate::display::InputEvent,
        )
    ),
    info(
        title = "Radarscope API",
        description = "Airport, aircraft and radar display endpoints",
        version = "0.1.0"
    ),
    tags(
        (name = "data", description = "Airport and aircraft lookups"),
        (name = "display", description = "Live radar display")
    )
)]
pub struct ApiDoc;
