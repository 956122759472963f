use serde::{Deserialize, Serialize};
use std::num::ParseFloatError;

/// The three independent data panels the dashboard can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    Weather,
    Currency,
    Quote,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Weather => "weather",
            WidgetKind::Currency => "currency",
            WidgetKind::Quote => "quote",
        }
    }

    pub const fn all() -> &'static [WidgetKind] {
        &[WidgetKind::Weather, WidgetKind::Currency, WidgetKind::Quote]
    }
}

impl std::fmt::Display for WidgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for WidgetKind {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        match lower.as_str() {
            "weather" => Ok(WidgetKind::Weather),
            "currency" => Ok(WidgetKind::Currency),
            "quote" => Ok(WidgetKind::Quote),
            _ => Err(anyhow::anyhow!(
                "Unknown widget '{value}'. Supported widgets: weather, currency, quote."
            )),
        }
    }
}

/// Coarse sky classification derived from the provider's icon code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkyClass {
    Clear,
    Rain,
    Clouds,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherReading {
    pub location_name: String,
    pub country: String,
    pub temperature_c: f64,
    pub condition: String,
    /// Provider icon code, e.g. "01d" or "10n".
    pub icon_code: String,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
    pub visibility_m: u32,
    pub pressure_hpa: u32,
}

impl WeatherReading {
    /// Icon codes starting with "01" mean a clear sky, "09"/"10"/"11" mean
    /// rain or storm, everything else is shown as clouds.
    pub fn sky_class(&self) -> SkyClass {
        match self.icon_code.get(..2) {
            Some("01") => SkyClass::Clear,
            Some("09" | "10" | "11") => SkyClass::Rain,
            _ => SkyClass::Clouds,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    pub amount: f64,
    pub from: String,
    pub to: String,
    pub result: f64,
    pub rate: f64,
}

impl std::fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} = {} {}", self.amount, self.from, self.result, self.to)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    pub quote: String,
    pub author: String,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum AmountError {
    #[error("amount is not a number")]
    NotANumber(#[from] ParseFloatError),
    #[error("amount must be a non-negative finite number")]
    OutOfRange,
}

/// Mutable form fields for the currency widget. Values are kept as entered;
/// the amount is only parsed when a conversion is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyForm {
    pub amount: String,
    pub from: String,
    pub to: String,
}

impl Default for CurrencyForm {
    fn default() -> Self {
        Self {
            amount: "100".to_string(),
            from: "INR".to_string(),
            to: "USD".to_string(),
        }
    }
}

impl CurrencyForm {
    /// Parse the entered amount, rejecting negative and non-finite values.
    pub fn parse_amount(&self) -> Result<f64, AmountError> {
        let value: f64 = self.amount.trim().parse()?;
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(AmountError::OutOfRange)
        }
    }
}
