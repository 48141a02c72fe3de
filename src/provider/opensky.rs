use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::display::{AircraftSnapshot, Coordinates};

use super::geo::{bearing_deg, distance_nm};
use super::http::{decode, read_body};
use super::{AircraftSource, ProviderError};

// Column indices of an OpenSky state vector.
const CALLSIGN: usize = 1;
const LONGITUDE: usize = 5;
const LATITUDE: usize = 6;

#[derive(Debug, Deserialize)]
struct StatesResponse {
    #[serde(default)]
    states: Option<Vec<Vec<Value>>>,
}

/// Aircraft within `max_distance_nm` of `origin`, nearest first.
///
/// Rows without a position are skipped. Bearing and distance are rounded to
/// whole units after the range check.
pub fn nearby_aircraft(
    states: &[Vec<Value>],
    origin: Coordinates,
    max_distance_nm: f64,
) -> Vec<AircraftSnapshot> {
    let mut nearby: Vec<AircraftSnapshot> = states
        .iter()
        .filter_map(|state| {
            let longitude = state.get(LONGITUDE)?.as_f64()?;
            let latitude = state.get(LATITUDE)?.as_f64()?;
            let position = Coordinates::new(latitude, longitude);

            let distance = distance_nm(position, origin);
            if distance > max_distance_nm {
                return None;
            }

            let callsign = state
                .get(CALLSIGN)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim();
            let angle = bearing_deg(origin, position).round() as u16;
            Some(AircraftSnapshot::new(callsign, angle, distance.round()))
        })
        .collect();

    nearby.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    nearby
}

/// Aircraft positions from an OpenSky-style `states/all` endpoint.
pub struct OpenSkyAircraft {
    client: reqwest::Client,
    states_url: String,
}

impl OpenSkyAircraft {
    pub fn new(client: reqwest::Client, states_url: String) -> Self {
        Self { client, states_url }
    }
}

#[async_trait]
impl AircraftSource for OpenSkyAircraft {
    async fn nearby(
        &self,
        origin: Coordinates,
        range_nm: u32,
    ) -> Result<Vec<AircraftSnapshot>, ProviderError> {
        if range_nm == 0 {
            return Err(ProviderError::InvalidRequest(
                "The distance must be positive".to_string(),
            ));
        }

        let body = read_body(self.client.get(&self.states_url).send().await?).await?;
        let response: StatesResponse = decode(&self.states_url, &body)?;
        let states = response.states.unwrap_or_default();

        let aircraft = nearby_aircraft(&states, origin, f64::from(range_nm));
        log::debug!(
            "{} of {} aircraft within {}NM",
            aircraft.len(),
            states.len(),
            range_nm
        );
        Ok(aircraft)
    }
}
