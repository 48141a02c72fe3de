use async_trait::async_trait;
use serde::Deserialize;

use crate::display::{AirportInfo, Coordinates};

use super::http::{decode, number_or_string, read_body};
use super::weather::{Weather, WeatherReports};
use super::{AirportLookup, ProviderError};

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    airports: Option<Vec<SearchAirport>>,
}

#[derive(Debug, Clone, Deserialize)]
struct SearchAirport {
    #[serde(default)]
    name: String,
    #[serde(default)]
    icao: Option<String>,
    /// Longitude.
    #[serde(deserialize_with = "number_or_string")]
    x: f64,
    /// Latitude.
    #[serde(deserialize_with = "number_or_string")]
    y: f64,
}

/// First airport of a search result, as `(icao, name, coordinates)`.
pub fn parse_search(
    url: &str,
    body: &str,
) -> Result<Option<(Option<String>, String, Coordinates)>, ProviderError> {
    let response: SearchResponse = decode(url, body)?;
    Ok(response
        .airports
        .unwrap_or_default()
        .into_iter()
        .next()
        .map(|a| (a.icao, a.name, Coordinates::new(a.y, a.x))))
}

/// Airport search backed by an OpenFlights-style `apsearch` endpoint, with
/// weather attached from a report service.
pub struct OpenFlightsAirports {
    client: reqwest::Client,
    search_url: String,
    weather: WeatherReports,
}

impl OpenFlightsAirports {
    pub fn new(client: reqwest::Client, search_url: String, weather: WeatherReports) -> Self {
        Self {
            client,
            search_url,
            weather,
        }
    }
}

#[async_trait]
impl AirportLookup for OpenFlightsAirports {
    async fn lookup(&self, identifier: &str) -> Result<AirportInfo, ProviderError> {
        if identifier.is_empty() {
            return Err(ProviderError::NotFound(identifier.to_string()));
        }

        let response = self
            .client
            .post(&self.search_url)
            .form(&[("icao", identifier)])
            .send()
            .await?;
        let body = read_body(response).await?;

        let (icao, name, coordinates) = parse_search(&self.search_url, &body)?
            .ok_or_else(|| ProviderError::NotFound(identifier.to_string()))?;
        let icao = icao
            .filter(|code| !code.is_empty())
            .unwrap_or_else(|| identifier.to_string());

        // Weather is decoration; the airport is still usable without it.
        let weather = match self.weather.report(&icao).await {
            Ok(weather) => weather,
            Err(e) => {
                log::warn!("Weather for {} unavailable: {}", icao, e);
                Weather::default()
            }
        };

        Ok(AirportInfo {
            identifier: icao,
            name,
            coordinates,
            temperature: weather.temperature,
            wind: weather.wind,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_airport() {
        let body = r#"{
            "status": 1,
            "airports": [
                {"apid": "3595", "name": "Buffalo Niagara Intl", "icao": "KBUF",
                 "x": "-78.732222", "y": "42.940525"},
                {"apid": "1", "name": "Other", "icao": "KXXX", "x": "0", "y": "0"}
            ]
        }"#;
        let (icao, name, coordinates) = parse_search("test", body).unwrap().unwrap();
        assert_eq!(icao.as_deref(), Some("KBUF"));
        assert_eq!(name, "Buffalo Niagara Intl");
        assert_eq!(coordinates, Coordinates::new(42.940525, -78.732222));
    }

    #[test]
    fn test_empty_result_is_none() {
        assert!(parse_search("test", r#"{"airports": []}"#)
            .unwrap()
            .is_none());
        assert!(parse_search("test", r#"{"status": 0, "airports": null}"#)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_malformed_body() {
        let err = parse_search("test", "<html>").unwrap_err();
        assert!(matches!(err, ProviderError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_empty_identifier_is_not_found() {
        let client = reqwest::Client::new();
        let airports = OpenFlightsAirports::new(
            client.clone(),
            "http://127.0.0.1:9/apsearch".into(),
            WeatherReports::new(client, "http://127.0.0.1:9/{icao}".into()),
        );
        let err = airports.lookup("").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotFound(_)));
    }
}
