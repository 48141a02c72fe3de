use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid duration {value:?}: {source}")]
    Duration {
        value: String,
        source: humantime::DurationError,
    },
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub providers: ProvidersConfig,
    #[serde(default)]
    pub web: WebConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_airport")]
    pub default_airport: String,
    #[serde(default = "default_fps")]
    pub fps: u32,
    /// Edge length of the square display, in pixels.
    #[serde(default = "default_canvas_size")]
    pub canvas_size: f64,
    #[serde(default)]
    pub range: RangeConfig,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_airport: default_airport(),
            fps: default_fps(),
            canvas_size: default_canvas_size(),
            range: RangeConfig::default(),
        }
    }
}

fn default_airport() -> String {
    "KBUF".to_string()
}

fn default_fps() -> u32 {
    60
}

fn default_canvas_size() -> f64 {
    815.0
}

/// Display radius bounds in nautical miles.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub initial: u32,
    pub minimum: u32,
    /// 11000 NM is slightly more than half the circumference of the Earth.
    pub maximum: u32,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            initial: 100,
            minimum: 2,
            maximum: 11000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvidersConfig {
    /// Form POST endpoint answering `icao=<code>` with matching airports.
    pub airport_search_url: String,
    /// Weather report URL; `{icao}` is replaced with the airport code.
    pub weather_url: String,
    /// Endpoint returning all current aircraft state vectors.
    pub aircraft_states_url: String,
    /// Per-request timeout, e.g. "10s".
    pub timeout: String,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        Self {
            airport_search_url: "https://openflights.org/php/apsearch.php".to_string(),
            weather_url: "https://aw.stephenorjames.com/api/retrieve/report/{icao}".to_string(),
            aircraft_states_url: "https://opensky-network.org/api/states/all".to_string(),
            timeout: "10s".to_string(),
        }
    }
}

impl ProvidersConfig {
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        humantime::parse_duration(self.timeout.trim()).map_err(|source| ConfigError::Duration {
            value: self.timeout.clone(),
            source,
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "0.0.0.0:8080".to_string()
}

impl Config {
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    pub fn from_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(yaml)?;
        config.providers.timeout()?;
        Ok(config)
    }

    /// Reads `path` when given, otherwise falls back to the defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}
