//! Core types: events, ICS rendering, slugs, tracing

pub mod event;
pub mod ics;
pub mod slug;
pub mod tracing;

pub use event::Event;
pub use ics::{generate_ics, generate_ics_at};
pub use self::slug::make_slug;
pub use self::tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
