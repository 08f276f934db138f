//! Structured itinerary records recovered from generated text.

use serde::{Deserialize, Serialize};

/// One venue or activity in an itinerary.
///
/// Times are kept as the free text the document carried (e.g. `"10:00 AM"`);
/// exporters decide whether they parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItineraryItem {
    pub name: String,
    pub address: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub description: String,
}

/// Items in document order plus the trailing summary (empty when the
/// document had no summary section).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseResult {
    pub items: Vec<ItineraryItem>,
    pub summary: String,
}
