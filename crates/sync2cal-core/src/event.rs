//! The normalized calendar event.
//!
//! Every integration reshapes its upstream data into [`Event`] records. The
//! routing layer then renders them either as JSON or as ICS text, so nothing
//! in this type is specific to a single provider.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A normalized calendar entry produced by an integration.
///
/// Events are built once per upstream item and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Stable identifier, unique per integration and upstream item.
    pub uid: String,
    /// Display title.
    pub title: String,
    /// Start of the event (midnight UTC for all-day events).
    pub start: DateTime<Utc>,
    /// End of the event (exclusive).
    pub end: DateTime<Utc>,
    /// Whether the event spans whole days.
    pub all_day: bool,
    /// Free-form description.
    pub description: Option<String>,
    /// Where the event takes place.
    pub location: Option<String>,
}

impl Event {
    /// Creates a timed event.
    pub fn new(
        uid: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Self {
        Self {
            uid: uid.into(),
            title: title.into(),
            start,
            end,
            all_day: false,
            description: None,
            location: None,
        }
    }

    /// Creates an all-day event covering exactly `date`.
    ///
    /// The start is midnight UTC of `date` and the end is one day later.
    pub fn all_day_on(uid: impl Into<String>, title: impl Into<String>, date: NaiveDate) -> Self {
        let start = date.and_time(chrono::NaiveTime::MIN).and_utc();
        Self {
            all_day: true,
            ..Self::new(uid, title, start, start + Duration::days(1))
        }
    }

    /// Builder method to set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}
