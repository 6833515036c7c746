//! ICS (RFC 5545) rendering of event feeds.

use chrono::{DateTime, Utc};
use icalendar::{Calendar, Component, EventLike, Property};

use crate::event::Event;

/// Product identifier written into every generated calendar.
pub const PRODUCT_ID: &str = "-//sync2cal//Events API//EN";

/// Renders `events` as a single VCALENDAR named `calendar_name`.
///
/// All-day events get `VALUE=DATE` start/end properties, timed events are
/// written in UTC. Every event is marked `STATUS:CONFIRMED`.
pub fn generate_ics(events: &[Event], calendar_name: &str) -> String {
    generate_ics_at(events, calendar_name, Utc::now())
}

/// Same as [`generate_ics`] with an explicit DTSTAMP.
pub fn generate_ics_at(events: &[Event], calendar_name: &str, stamp: DateTime<Utc>) -> String {
    let mut cal = Calendar::new();
    cal.name(calendar_name);

    let dtstamp = stamp.format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event.uid);
        ics_event.summary(&event.title);
        ics_event.add_property("DTSTAMP", &dtstamp);

        add_time_property(&mut ics_event, "DTSTART", event, event.start);
        add_time_property(&mut ics_event, "DTEND", event, event.end);

        if let Some(ref description) = event.description {
            ics_event.description(description);
        }
        if let Some(ref location) = event.location {
            ics_event.location(location);
        }
        ics_event.add_property("STATUS", "CONFIRMED");

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    strip_ics_bloat(&cal.to_string())
}

fn add_time_property(
    ics_event: &mut icalendar::Event,
    name: &str,
    event: &Event,
    time: DateTime<Utc>,
) {
    if event.all_day {
        let mut prop = Property::new(name, time.format("%Y%m%d").to_string());
        prop.add_parameter("VALUE", "DATE");
        ics_event.append_property(prop);
    } else {
        ics_event.add_property(name, time.format("%Y%m%dT%H%M%SZ").to_string());
    }
}

/// Rewrites PRODID and drops the implied `CALSCALE:GREGORIAN`.
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODUCT_ID);
            result.push_str("\r\n");
            continue;
        }
        if line == "CALSCALE:GREGORIAN" {
            continue;
        }
        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};

    fn weather_event(day: u32) -> Event {
        Event::all_day_on(
            format!("weather-london-202503{:02}", day),
            "Sunny",
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        )
        .with_description("Humidity: 40%")
        .with_location("London")
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 19, 12, 0, 0).unwrap()
    }

    #[test]
    fn all_day_events_use_value_date() {
        let ics = generate_ics_at(&[weather_event(20)], "Weather", stamp());

        assert!(ics.contains("DTSTART;VALUE=DATE:20250320"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND;VALUE=DATE:20250321"), "ICS:\n{}", ics);
        assert!(ics.contains("UID:weather-london-20250320"));
        assert!(ics.contains("STATUS:CONFIRMED"));
        assert!(ics.contains("LOCATION:London"));
    }

    #[test]
    fn timed_events_are_written_in_utc() {
        let start = Utc.with_ymd_and_hms(2025, 3, 20, 15, 30, 0).unwrap();
        let event = Event::new("evt-1", "Stream", start, start + chrono::Duration::hours(1));

        let ics = generate_ics_at(&[event], "Streams", stamp());

        assert!(ics.contains("DTSTART:20250320T153000Z"), "ICS:\n{}", ics);
        assert!(ics.contains("DTEND:20250320T163000Z"), "ICS:\n{}", ics);
    }

    #[test]
    fn one_vevent_per_event() {
        let events: Vec<Event> = (20..25).map(weather_event).collect();
        let ics = generate_ics_at(&events, "Weather", stamp());

        let count = ics.lines().filter(|l| *l == "BEGIN:VEVENT").count();
        assert_eq!(count, 5);
    }

    #[test]
    fn calendar_metadata_is_cleaned_up() {
        let ics = generate_ics_at(&[], "Daily Weather Forecast - London", stamp());

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\n"));
        assert!(ics.contains("PRODID:-//sync2cal//Events API//EN"));
        assert!(!ics.contains("CALSCALE:GREGORIAN"));
        assert!(ics.contains("Daily Weather Forecast - London"));
        assert!(!ics.contains("BEGIN:VEVENT"));
    }

    #[test]
    fn dtstamp_is_deterministic() {
        let ics = generate_ics_at(&[weather_event(20)], "Weather", stamp());
        assert!(ics.contains("DTSTAMP:20250319T120000Z"));
    }
}
