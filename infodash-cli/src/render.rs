//! Terminal rendering of controller snapshots.
//!
//! The renderer is a pure consumer of [`ControllerState`]: it reads the
//! active widget's request state and prints a panel. It never mutates state
//! or issues requests.

use chrono::Local;
use infodash_core::{
    ControllerState, RequestState, WidgetData, WidgetKind,
    model::{ConversionResult, Quotation, SkyClass, WeatherReading},
};

/// Print the panel for `kind` from the current snapshot.
pub fn render_widget(state: &ControllerState, kind: WidgetKind) {
    match state.request_state(kind) {
        RequestState::Idle => println!("  (no data yet)"),
        RequestState::Loading { .. } => println!("  Loading..."),
        RequestState::Failed { message } => println!("  {message}"),
        RequestState::Success(data) => render_data(data),
    }
}

fn render_data(data: &WidgetData) {
    match data {
        WidgetData::Weather(reading) => render_weather(reading),
        WidgetData::Currency(conv) => render_conversion(conv),
        WidgetData::Quote(quotation) => render_quote(quotation),
    }
}

fn sky_glyph(class: SkyClass) -> &'static str {
    match class {
        SkyClass::Clear => "☀",
        SkyClass::Rain => "🌧",
        SkyClass::Clouds => "☁",
    }
}

fn render_weather(reading: &WeatherReading) {
    let date = Local::now().format("%A, %B %d");

    println!();
    println!(
        "  {} {}, {}  ({date})",
        sky_glyph(reading.sky_class()),
        reading.location_name,
        reading.country
    );
    println!("  {}°C  {}", reading.temperature_c.round(), reading.condition);
    println!();
    println!("  Humidity    {}%", reading.humidity_pct);
    println!("  Wind        {} m/s", reading.wind_speed_mps);
    println!("  Visibility  {:.1} km", f64::from(reading.visibility_m) / 1000.0);
    println!("  Pressure    {} hPa", reading.pressure_hpa);
}

fn render_conversion(conv: &ConversionResult) {
    println!();
    println!("  {conv}");
    println!("  (rate: {})", conv.rate);
}

fn render_quote(quotation: &Quotation) {
    println!();
    println!("  \u{201c}{}\u{201d}", quotation.quote);
    println!("      — {}", quotation.author);
}
