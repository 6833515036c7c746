//! Day-bucketing and per-day statistics over 3-hour forecast samples.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use super::models::ForecastEntry;

/// A single parsed forecast slot.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSample {
    pub time: DateTime<Utc>,
    pub temp: f64,
    pub humidity: f64,
    pub wind_speed: f64,
    /// Bearing in degrees; zero means no reading.
    pub wind_deg: f64,
    pub clouds: f64,
    pub pressure: f64,
    /// Condition group, `Unknown` when upstream sent none.
    pub condition: String,
    pub description: String,
}

impl ForecastSample {
    /// Parses an upstream slot. Slots without a usable timestamp yield `None`.
    pub fn from_entry(entry: &ForecastEntry) -> Option<Self> {
        let time = entry
            .dt
            .filter(|dt| *dt != 0)
            .and_then(|dt| DateTime::from_timestamp(dt, 0))?;
        let primary = entry.weather.first();

        Some(Self {
            time,
            temp: entry.main.temp,
            humidity: entry.main.humidity,
            wind_speed: entry.wind.speed,
            wind_deg: entry.wind.deg,
            clouds: entry.clouds.all,
            pressure: entry.main.pressure,
            condition: primary
                .and_then(|w| w.main.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            description: primary
                .and_then(|w| w.description.clone())
                .unwrap_or_default(),
        })
    }

    /// The UTC calendar day this sample belongs to.
    pub fn day(&self) -> NaiveDate {
        self.time.date_naive()
    }
}

/// Groups samples by UTC day, keeping arrival order within each day.
pub fn bucket_by_day(
    samples: impl IntoIterator<Item = ForecastSample>,
) -> BTreeMap<NaiveDate, Vec<ForecastSample>> {
    let mut buckets: BTreeMap<NaiveDate, Vec<ForecastSample>> = BTreeMap::new();
    for sample in samples {
        buckets.entry(sample.day()).or_default().push(sample);
    }
    buckets
}

/// Aggregate statistics for one day.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub temp_min: f64,
    pub temp_max: f64,
    pub temp_avg: f64,
    pub humidity_avg: f64,
    pub wind_speed_avg: f64,
    pub clouds_avg: f64,
    pub pressure_avg: f64,
    /// Mean of the non-zero bearings, `None` if there were none.
    pub wind_deg_avg: Option<f64>,
    /// Condition group of the representative sample.
    pub condition: String,
    /// Description of the representative sample, as sent upstream.
    pub description: String,
}

impl DailySummary {
    /// Summarises a day's samples.
    ///
    /// The representative condition is the sample at index `len / 2`, not the
    /// most frequent one.
    pub fn from_samples(date: NaiveDate, samples: &[ForecastSample]) -> Self {
        let temps = samples.iter().map(|s| s.temp);
        let temp_min = temps.clone().reduce(f64::min).unwrap_or(0.0);
        let temp_max = temps.clone().reduce(f64::max).unwrap_or(0.0);

        let (condition, description) = match samples.get(samples.len() / 2) {
            Some(mid) => (mid.condition.clone(), mid.description.clone()),
            None => ("Unknown".to_string(), "Unknown".to_string()),
        };

        Self {
            date,
            temp_min,
            temp_max,
            temp_avg: mean(temps),
            humidity_avg: mean(samples.iter().map(|s| s.humidity)),
            wind_speed_avg: mean(samples.iter().map(|s| s.wind_speed)),
            clouds_avg: mean(samples.iter().map(|s| s.clouds)),
            pressure_avg: mean(samples.iter().map(|s| s.pressure)),
            wind_deg_avg: mean_of_some(
                samples.iter().map(|s| s.wind_deg).filter(|deg| *deg > 0.0),
            ),
            condition,
            description,
        }
    }
}

/// Summaries for the first `days` days in ascending date order.
pub fn summarize_days(
    buckets: &BTreeMap<NaiveDate, Vec<ForecastSample>>,
    days: usize,
) -> Vec<DailySummary> {
    buckets
        .iter()
        .take(days)
        .map(|(date, samples)| DailySummary::from_samples(*date, samples))
        .collect()
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    mean_of_some(values).unwrap_or(0.0)
}

fn mean_of_some(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
