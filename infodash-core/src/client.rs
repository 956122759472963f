use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::{
    Config,
    error::FetchError,
    model::{ConversionResult, Quotation, WeatherReading},
};

/// Seam between the request controller and the remote endpoints.
///
/// The production implementation is [`ApiClient`]; tests substitute a mock.
#[async_trait]
pub trait DashboardApi: Send + Sync + Debug {
    async fn weather(&self, city: &str) -> Result<WeatherReading, FetchError>;
    async fn random_quote(&self) -> Result<Quotation, FetchError>;
    async fn convert(&self, amount: f64, from: &str, to: &str)
    -> Result<ConversionResult, FetchError>;
}

/// HTTP adapter for the three dashboard endpoints.
///
/// The base URL is injected at construction rather than read from a global,
/// so tests and alternate deployments can point it elsewhere.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self { base_url: base_url.into(), http })
    }

    pub fn from_config(config: &Config) -> Result<Self, FetchError> {
        Self::new(config.base_url.clone(), Duration::from_secs(config.timeout_secs))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T: for<'de> Deserialize<'de>>(
        &self,
        route: &str,
        query: &[(&str, &str)],
    ) -> Result<T, FetchError> {
        let url = format!("{}{route}", self.base_url);

        let res = self.http.get(&url).query(query).send().await?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus(status));
        }

        let body = res.text().await?;
        serde_json::from_str(&body).map_err(FetchError::Decode)
    }
}

#[async_trait]
impl DashboardApi for ApiClient {
    async fn weather(&self, city: &str) -> Result<WeatherReading, FetchError> {
        let parsed: WeatherBody = self.get_json("/weather", &[("city", city)]).await?;
        Ok(parsed.into_reading())
    }

    async fn random_quote(&self) -> Result<Quotation, FetchError> {
        let parsed: QuoteBody = self.get_json("/quote/random", &[]).await?;
        Ok(Quotation { quote: parsed.quote, author: parsed.author })
    }

    async fn convert(
        &self,
        amount: f64,
        from: &str,
        to: &str,
    ) -> Result<ConversionResult, FetchError> {
        let amount_str = amount.to_string();
        let parsed: ConvertBody = self
            .get_json(
                "/currency/convert",
                &[("amount", amount_str.as_str()), ("from", from), ("to", to)],
            )
            .await?;

        Ok(ConversionResult {
            amount: parsed.amount,
            from: parsed.from,
            to: parsed.to,
            result: parsed.result,
            rate: parsed.rate,
        })
    }
}

#[derive(Debug, Deserialize)]
struct WeatherBody {
    name: String,
    sys: WeatherSys,
    weather: Vec<WeatherCondition>,
    main: WeatherMain,
    wind: WeatherWind,
    visibility: u32,
}

#[derive(Debug, Deserialize)]
struct WeatherSys {
    country: String,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    icon: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
    humidity: u8,
    pressure: u32,
}

#[derive(Debug, Deserialize)]
struct WeatherWind {
    speed: f64,
}

impl WeatherBody {
    fn into_reading(self) -> WeatherReading {
        let (icon_code, condition) = self
            .weather
            .into_iter()
            .next()
            .map(|w| (w.icon, w.description))
            .unwrap_or_else(|| (String::new(), "Unknown".to_string()));

        WeatherReading {
            location_name: self.name,
            country: self.sys.country,
            temperature_c: self.main.temp,
            condition,
            icon_code,
            humidity_pct: self.main.humidity,
            wind_speed_mps: self.wind.speed,
            visibility_m: self.visibility,
            pressure_hpa: self.main.pressure,
        }
    }
}

#[derive(Debug, Deserialize)]
struct QuoteBody {
    quote: String,
    author: String,
}

#[derive(Debug, Deserialize)]
struct ConvertBody {
    amount: f64,
    from: String,
    to: String,
    result: f64,
    rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weather_body_decodes_and_converts() {
        let json = r#"{
            "name": "Hyderabad",
            "sys": { "country": "IN" },
            "weather": [ { "icon": "01d", "description": "clear sky" } ],
            "main": { "temp": 31.2, "humidity": 48, "pressure": 1009 },
            "wind": { "speed": 2.6 },
            "visibility": 8000
        }"#;

        let body: WeatherBody = serde_json::from_str(json).unwrap();
        let reading = body.into_reading();

        assert_eq!(reading.location_name, "Hyderabad");
        assert_eq!(reading.country, "IN");
        assert_eq!(reading.temperature_c, 31.2);
        assert_eq!(reading.condition, "clear sky");
        assert_eq!(reading.icon_code, "01d");
        assert_eq!(reading.humidity_pct, 48);
        assert_eq!(reading.wind_speed_mps, 2.6);
        assert_eq!(reading.visibility_m, 8000);
        assert_eq!(reading.pressure_hpa, 1009);
    }

    #[test]
    fn weather_body_without_conditions_falls_back() {
        let json = r#"{
            "name": "Nowhere",
            "sys": { "country": "XX" },
            "weather": [],
            "main": { "temp": 10.0, "humidity": 90, "pressure": 1000 },
            "wind": { "speed": 0.0 },
            "visibility": 100
        }"#;

        let body: WeatherBody = serde_json::from_str(json).unwrap();
        let reading = body.into_reading();

        assert_eq!(reading.condition, "Unknown");
        assert!(reading.icon_code.is_empty());
    }

    #[test]
    fn quote_body_decodes() {
        let json = r#"{ "quote": "Stay hungry.", "author": "S. Jobs" }"#;
        let body: QuoteBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.quote, "Stay hungry.");
        assert_eq!(body.author, "S. Jobs");
    }

    #[test]
    fn convert_body_decodes() {
        let json = r#"{ "amount": 100, "from": "INR", "to": "USD", "result": 1.2, "rate": 0.012 }"#;
        let body: ConvertBody = serde_json::from_str(json).unwrap();
        assert_eq!(body.amount, 100.0);
        assert_eq!(body.result, 1.2);
        assert_eq!(body.rate, 0.012);
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = serde_json::from_str::<WeatherBody>("{}").unwrap_err();
        let classified = FetchError::Decode(err);
        assert_eq!(classified.kind(), "decode");
    }
}
