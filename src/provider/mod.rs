mod error;
pub mod geo;
mod http;
mod openflights;
mod opensky;
mod weather;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::ProvidersConfig;
use crate::display::{AircraftSnapshot, AirportInfo, Coordinates};

pub use error::ProviderError;
pub use openflights::OpenFlightsAirports;
pub use opensky::OpenSkyAircraft;
pub use weather::WeatherReports;

/// Resolves an airport identifier to its location and current weather.
#[async_trait]
pub trait AirportLookup: Send + Sync {
    async fn lookup(&self, identifier: &str) -> Result<AirportInfo, ProviderError>;
}

/// Current aircraft around a point. An empty result is a valid answer.
#[async_trait]
pub trait AircraftSource: Send + Sync {
    async fn nearby(
        &self,
        origin: Coordinates,
        range_nm: u32,
    ) -> Result<Vec<AircraftSnapshot>, ProviderError>;
}

#[derive(Clone)]
pub struct Providers {
    pub airports: Arc<dyn AirportLookup>,
    pub aircraft: Arc<dyn AircraftSource>,
}

impl Providers {
    /// HTTP-backed providers sharing one client.
    pub fn http(config: &ProvidersConfig, timeout: Duration) -> Result<Self, ProviderError> {
        let client = http::client(timeout)?;
        let weather = WeatherReports::new(client.clone(), config.weather_url.clone());
        Ok(Self {
            airports: Arc::new(OpenFlightsAirports::new(
                client.clone(),
                config.airport_search_url.clone(),
                weather,
            )),
            aircraft: Arc::new(OpenSkyAircraft::new(
                client,
                config.aircraft_states_url.clone(),
            )),
        })
    }
}

#[cfg(test)]
pub mod testing {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    /// Airports answered from a fixed table.
    pub struct MockAirports {
        pub airports: HashMap<String, AirportInfo>,
    }

    impl MockAirports {
        pub fn with(airports: Vec<AirportInfo>) -> Self {
            Self {
                airports: airports
                    .into_iter()
                    .map(|a| (a.identifier.clone(), a))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl AirportLookup for MockAirports {
        async fn lookup(&self, identifier: &str) -> Result<AirportInfo, ProviderError> {
            self.airports
                .get(identifier)
                .cloned()
                .ok_or_else(|| ProviderError::NotFound(identifier.to_string()))
        }
    }

    /// Returns the same aircraft for every request and records the calls.
    pub struct MockAircraft {
        pub aircraft: Vec<AircraftSnapshot>,
        pub calls: Mutex<Vec<(Coordinates, u32)>>,
    }

    impl MockAircraft {
        pub fn with(aircraft: Vec<AircraftSnapshot>) -> Self {
            Self {
                aircraft,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl AircraftSource for MockAircraft {
        async fn nearby(
            &self,
            origin: Coordinates,
            range_nm: u32,
        ) -> Result<Vec<AircraftSnapshot>, ProviderError> {
            self.calls.lock().unwrap().push((origin, range_nm));
            if range_nm == 0 {
                return Err(ProviderError::InvalidRequest(
                    "The distance must be positive".to_string(),
                ));
            }
            Ok(self.aircraft.clone())
        }
    }

    pub fn buffalo() -> AirportInfo {
        AirportInfo {
            identifier: "KBUF".into(),
            name: "Buffalo Niagara Intl".into(),
            coordinates: Coordinates::new(42.94, -78.73),
            temperature: "M02".into(),
            wind: "27012KT".into(),
        }
    }

    pub fn providers(aircraft: Vec<AircraftSnapshot>) -> Providers {
        Providers {
            airports: Arc::new(MockAirports::with(vec![buffalo()])),
            aircraft: Arc::new(MockAircraft::with(aircraft)),
        }
    }
}
