//! Turning daily summaries into calendar events.

use std::fmt;

use chrono::NaiveDate;
use sync2cal_core::{Event, make_slug};

use super::aggregate::DailySummary;

/// Measurement system requested from the forecast endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Units {
    #[default]
    Metric,
    Imperial,
    Kelvin,
}

impl Units {
    /// Parses a units string; anything unrecognised is metric.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.to_lowercase().as_str() {
            "imperial" => Self::Imperial,
            "kelvin" => Self::Kelvin,
            _ => Self::Metric,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metric => "metric",
            Self::Imperial => "imperial",
            Self::Kelvin => "kelvin",
        }
    }

    pub fn temperature_symbol(&self) -> &'static str {
        match self {
            Self::Metric => "°C",
            Self::Imperial => "°F",
            Self::Kelvin => "K",
        }
    }

    pub fn wind_speed_unit(&self) -> &'static str {
        match self {
            Self::Imperial => "mph",
            Self::Metric | Self::Kelvin => "m/s",
        }
    }
}

impl fmt::Display for Units {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Picks a glyph for a condition group, refined by the description text.
pub fn weather_emoji(condition: &str, description: &str) -> &'static str {
    let condition = condition.to_lowercase();
    let description = description.to_lowercase();

    match condition.as_str() {
        "clear" => "☀️",
        "clouds" => {
            if description.contains("few") || description.contains("scattered") {
                "🌤️"
            } else if description.contains("broken") {
                "⛅"
            } else {
                "☁️"
            }
        }
        "rain" | "drizzle" => {
            if description.contains("light") || description.contains("drizzle") {
                "🌦️"
            } else {
                "🌧️"
            }
        }
        "thunderstorm" => "⛈️",
        "snow" => {
            if description.contains("light") {
                "🌨️"
            } else {
                "❄️"
            }
        }
        "mist" | "fog" | "haze" => "🌫️",
        "dust" | "sand" | "tornado" => "🌪️",
        "squall" => "💨",
        "ash" => "🌋",
        _ => "🌡️",
    }
}

const COMPASS_POINTS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// Maps a bearing in degrees to one of 16 compass points.
pub fn compass_point(degrees: f64) -> &'static str {
    let index = ((degrees + 11.25) / 22.5) as usize % COMPASS_POINTS.len();
    COMPASS_POINTS[index]
}

/// Upper-cases the first character and lower-cases the rest.
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

/// Stable identifier for a (city, day) pair.
pub fn event_uid(city: &str, date: NaiveDate) -> String {
    format!("weather-{}-{}", make_slug(city), date.format("%Y%m%d"))
}

/// `"{emoji} {avg}{unit} {city}"`, with the average truncated toward zero.
pub fn event_title(summary: &DailySummary, units: Units, city: &str) -> String {
    let description = capitalize(&summary.description);
    format!(
        "{} {}{} {}",
        weather_emoji(&summary.condition, &description),
        summary.temp_avg as i64,
        units.temperature_symbol(),
        city
    )
}

/// Pipe-separated detail line for the event body.
pub fn event_description(summary: &DailySummary, units: Units) -> String {
    let symbol = units.temperature_symbol();
    let mut parts = vec![
        format!(
            "Temperature: {}{symbol} - {}{symbol}",
            summary.temp_min as i64, summary.temp_max as i64
        ),
        format!("Condition: {}", capitalize(&summary.description)),
        format!("Humidity: {}%", summary.humidity_avg as i64),
        format!("Wind: {:.1} {}", summary.wind_speed_avg, units.wind_speed_unit()),
        format!("Clouds: {}%", summary.clouds_avg as i64),
        format!("Pressure: {} hPa", summary.pressure_avg as i64),
    ];

    if let Some(degrees) = summary.wind_deg_avg {
        parts.push(format!("Wind Direction: {}", compass_point(degrees)));
    }

    parts.join(" | ")
}

/// Builds the all-day event for one summarised day.
pub fn daily_event(summary: &DailySummary, units: Units, city: &str) -> Event {
    Event::all_day_on(
        event_uid(city, summary.date),
        event_title(summary, units, city),
        summary.date,
    )
    .with_description(event_description(summary, units))
    .with_location(city)
}
