use serde::Deserialize;

use super::http::{decode, read_body};
use super::ProviderError;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Weather {
    pub temperature: String,
    pub wind: String,
}

#[derive(Debug, Deserialize)]
struct ReportBody {
    #[serde(default)]
    temperature: Option<RawValue>,
    #[serde(default)]
    wind: Option<RawValue>,
}

#[derive(Debug, Deserialize)]
struct RawValue {
    #[serde(default)]
    raw: Option<String>,
}

fn raw_text(value: Option<RawValue>) -> String {
    value.and_then(|v| v.raw).unwrap_or_default()
}

pub fn parse_report(url: &str, body: &str) -> Result<Weather, ProviderError> {
    let report: ReportBody = decode(url, body)?;
    Ok(Weather {
        temperature: raw_text(report.temperature),
        wind: raw_text(report.wind),
    })
}

/// Weather reports keyed by ICAO code.
pub struct WeatherReports {
    client: reqwest::Client,
    url_template: String,
}

impl WeatherReports {
    pub fn new(client: reqwest::Client, url_template: String) -> Self {
        Self {
            client,
            url_template,
        }
    }

    pub fn report_url(&self, icao: &str) -> String {
        self.url_template.replace("{icao}", icao)
    }

    pub async fn report(&self, icao: &str) -> Result<Weather, ProviderError> {
        let url = self.report_url(icao);
        let body = read_body(self.client.get(&url).send().await?).await?;
        parse_report(&url, &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_report() {
        let body = r#"{
            "station": "KBUF",
            "temperature": {"raw": "M02", "value": -2},
            "wind": {"raw": "27012KT", "speed": 12}
        }"#;
        let weather = parse_report("test", body).unwrap();
        assert_eq!(
            weather,
            Weather {
                temperature: "M02".into(),
                wind: "27012KT".into()
            }
        );
    }

    #[test]
    fn test_missing_fields_are_blank() {
        let weather = parse_report("test", r#"{"wind": {"raw": null}}"#).unwrap();
        assert_eq!(weather, Weather::default());
    }

    #[test]
    fn test_report_url() {
        let reports = WeatherReports::new(
            reqwest::Client::new(),
            "https://wx.example/report/{icao}".into(),
        );
        assert_eq!(reports.report_url("KBUF"), "https://wx.example/report/KBUF");
    }
}
