//! Core library for the `infodash` dashboard.
//!
//! This crate defines:
//! - Configuration handling (base URL, timeout, defaults)
//! - The HTTP adapter for the weather / currency / quote endpoints
//! - The request controller that owns widget state, caching and the
//!   stale-response guard
//!
//! It is used by `infodash-cli`, but can also be reused by other frontends.

pub mod client;
pub mod config;
pub mod controller;
pub mod error;
pub mod model;

pub use client::{ApiClient, DashboardApi};
pub use config::{Config, DisplayMode};
pub use controller::{
    Controller, ControllerState, CurrencyField, FetchCommand, FetchOutcome, FetchRequest,
    RequestState, RequestToken, WidgetData, perform,
};
pub use error::FetchError;
pub use model::{ConversionResult, CurrencyForm, Quotation, WeatherReading, WidgetKind};

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use reqwest::StatusCode;

    /// Canned adapter for driving the controller without a server.
    #[derive(Debug, Default)]
    struct MockApi {
        fail_weather: bool,
    }

    #[async_trait]
    impl DashboardApi for MockApi {
        async fn weather(&self, city: &str) -> Result<WeatherReading, FetchError> {
            if self.fail_weather {
                return Err(FetchError::HttpStatus(StatusCode::NOT_FOUND));
            }
            Ok(WeatherReading {
                location_name: city.to_string(),
                country: "IN".into(),
                temperature_c: 28.0,
                condition: "clear sky".into(),
                icon_code: "01d".into(),
                humidity_pct: 40,
                wind_speed_mps: 1.5,
                visibility_m: 10000,
                pressure_hpa: 1013,
            })
        }

        async fn random_quote(&self) -> Result<Quotation, FetchError> {
            Ok(Quotation { quote: "Less is more.".into(), author: "Mies".into() })
        }

        async fn convert(
            &self,
            amount: f64,
            from: &str,
            to: &str,
        ) -> Result<ConversionResult, FetchError> {
            Ok(ConversionResult {
                amount,
                from: from.to_string(),
                to: to.to_string(),
                result: 1.2,
                rate: 0.012,
            })
        }
    }

    #[tokio::test]
    async fn conversion_roundtrip_through_mock_adapter() {
        let api = MockApi::default();
        let mut ctl = Controller::new("Hyderabad");

        // Form defaults are 100 INR -> USD.
        let cmd = ctl.convert_currency().expect("default form is valid");
        let outcome = perform(cmd, &api).await;
        ctl.apply(outcome);

        match ctl.state().request_state(WidgetKind::Currency) {
            RequestState::Success(WidgetData::Currency(conv)) => {
                assert_eq!(conv.result, 1.2);
                assert_eq!(conv.to_string(), "100 INR = 1.2 USD");
            }
            other => panic!("expected conversion result, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn weather_failure_maps_to_fixed_message() {
        let api = MockApi { fail_weather: true };
        let mut ctl = Controller::new("Hyderabad");

        let cmd = ctl.select_widget(Some(WidgetKind::Weather)).unwrap();
        assert!(ctl.state().request_state(WidgetKind::Weather).is_loading());

        let outcome = perform(cmd, &api).await;
        ctl.apply(outcome);

        match ctl.state().request_state(WidgetKind::Weather) {
            RequestState::Failed { message } => {
                assert_eq!(message, "Unable to fetch weather data");
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn interleaved_fetches_keep_the_latest_search() {
        let api = MockApi::default();
        let mut ctl = Controller::new("Hyderabad");

        let first = ctl.submit_search("Paris").unwrap();
        let second = ctl.submit_search("Tokyo").unwrap();

        // Resolve out of order: the older response lands last.
        let second_outcome = perform(second, &api).await;
        let first_outcome = perform(first, &api).await;
        ctl.apply(second_outcome);
        ctl.apply(first_outcome);

        match ctl.state().request_state(WidgetKind::Weather) {
            RequestState::Success(WidgetData::Weather(r)) => {
                assert_eq!(r.location_name, "Tokyo");
            }
            other => panic!("expected Tokyo reading, got {other:?}"),
        }
    }
}
