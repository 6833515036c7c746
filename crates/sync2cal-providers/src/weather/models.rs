//! Wire types for the OpenWeatherMap geocoding and forecast endpoints.

use serde::{Deserialize, Serialize};

/// One match from the direct-geocoding endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct GeoPlace {
    #[serde(default)]
    pub name: Option<String>,
    pub lat: f64,
    pub lon: f64,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

/// One 3-hour slot of the forecast `list`.
///
/// Every field may be missing upstream; absent readings count as zero.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ForecastEntry {
    /// Unix timestamp of the slot.
    pub dt: Option<i64>,
    pub main: MainReadings,
    pub wind: WindReadings,
    pub clouds: CloudReadings,
    /// Condition list; only the first element is used.
    pub weather: Vec<ConditionEntry>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MainReadings {
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindReadings {
    pub speed: f64,
    pub deg: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CloudReadings {
    pub all: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ConditionEntry {
    /// Condition group, e.g. `Rain`.
    pub main: Option<String>,
    /// Detailed text, e.g. `light rain`.
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_forecast_entry() {
        let json = r#"{
            "dt": 1718928000,
            "main": {"temp": 21.4, "feels_like": 21.0, "pressure": 1013, "humidity": 60},
            "weather": [{"id": 500, "main": "Rain", "description": "light rain", "icon": "10d"}],
            "clouds": {"all": 75},
            "wind": {"speed": 3.6, "deg": 250, "gust": 5.1},
            "dt_txt": "2024-06-21 00:00:00"
        }"#;

        let entry: ForecastEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.dt, Some(1718928000));
        assert_eq!(entry.main.temp, 21.4);
        assert_eq!(entry.main.pressure, 1013.0);
        assert_eq!(entry.wind.deg, 250.0);
        assert_eq!(entry.clouds.all, 75.0);
        assert_eq!(entry.weather[0].main.as_deref(), Some("Rain"));
        assert_eq!(entry.weather[0].description.as_deref(), Some("light rain"));
    }

    #[test]
    fn missing_fields_default_to_zero() {
        let entry: ForecastEntry = serde_json::from_str(r#"{"dt": 1}"#).unwrap();
        assert_eq!(entry.main, MainReadings::default());
        assert_eq!(entry.wind.speed, 0.0);
        assert!(entry.weather.is_empty());
    }

    #[test]
    fn parse_geo_place() {
        let json = r#"[{
            "name": "London",
            "local_names": {"en": "London"},
            "lat": 51.5073219,
            "lon": -0.1276474,
            "country": "GB",
            "state": "England"
        }]"#;

        let places: Vec<GeoPlace> = serde_json::from_str(json).unwrap();
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].name.as_deref(), Some("London"));
        assert_eq!(places[0].country.as_deref(), Some("GB"));
        assert!((places[0].lat - 51.507).abs() < 0.001);
    }
}
