use std::time::Duration;

use serde::de::DeserializeOwned;

use super::ProviderError;

pub fn client(timeout: Duration) -> Result<reqwest::Client, ProviderError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("radarscope/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

pub async fn read_body(response: reqwest::Response) -> Result<String, ProviderError> {
    Ok(response.error_for_status()?.text().await?)
}

pub fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, ProviderError> {
    serde_json::from_str(body).map_err(|e| ProviderError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Accepts coordinates sent either as JSON numbers or as strings.
pub fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match <Raw as serde::Deserialize>::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, serde::Deserialize)]
    struct Point {
        #[serde(deserialize_with = "number_or_string")]
        x: f64,
    }

    #[test]
    fn test_number_or_string() {
        let p: Point = decode("test", r#"{"x": "-78.73"}"#).unwrap();
        assert_eq!(p.x, -78.73);
        let p: Point = decode("test", r#"{"x": 42.5}"#).unwrap();
        assert_eq!(p.x, 42.5);
        assert!(decode::<Point>("test", r#"{"x": "north"}"#).is_err());
    }

    #[test]
    fn test_decode_error_names_url() {
        let err = decode::<Point>("https://example.test/a", "not json").unwrap_err();
        assert!(err.to_string().contains("https://example.test/a"));
    }
}
