//! Renderers that turn parsed itineraries into files a user keeps.

pub mod calendar;
pub mod document;

pub use calendar::{parse_clock_time, render_calendar};
pub use document::render_document;
