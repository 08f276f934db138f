pub mod export;
pub mod parse;

pub use export::{render_calendar, render_document};
pub use parse::parse_itinerary;
