use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::sweep::DEGREES_PER_REVOLUTION;

/// One aircraft as seen from the tracked airport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AircraftSnapshot {
    pub callsign: String,
    /// Bearing from the airport, whole degrees clockwise from north.
    pub angle: u16,
    /// Distance from the airport in nautical miles.
    pub distance: f64,
}

impl AircraftSnapshot {
    pub fn new(callsign: impl Into<String>, angle: u16, distance: f64) -> Self {
        Self {
            callsign: callsign.into(),
            angle: angle % DEGREES_PER_REVOLUTION,
            distance: distance.max(0.0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Result of a successful airport lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AirportInfo {
    pub identifier: String,
    pub name: String,
    pub coordinates: Coordinates,
    pub temperature: String,
    pub wind: String,
}
