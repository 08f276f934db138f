//! Printable plain-text itinerary.

use wayfind_core::{ItineraryItem, ParseResult};

const TITLE: &str = "My Itinerary";
const NOT_SPECIFIED: &str = "Not specified";

/// Renders every item, numbered from 1, followed by the summary when there
/// is one. Items are included whether or not their times parse.
#[must_use]
pub fn render_document(result: &ParseResult) -> String {
    let mut out = format!("{TITLE}\n{}\n", "=".repeat(TITLE.len()));

    for (index, item) in result.items.iter().enumerate() {
        out.push('\n');
        out.push_str(&render_item(index + 1, item));
    }

    if !result.summary.is_empty() {
        out.push_str("\nSummary\n-------\n");
        out.push_str(&result.summary);
        out.push('\n');
    }

    out
}

fn render_item(number: usize, item: &ItineraryItem) -> String {
    let mut block = format!(
        "{number}. {}\n   Time: {}\n   Address: {}\n",
        item.name,
        time_slot(item),
        item.address.as_deref().unwrap_or(NOT_SPECIFIED)
    );
    if !item.description.is_empty() {
        block.push_str(&format!("   {}\n", item.description));
    }
    block
}

fn time_slot(item: &ItineraryItem) -> String {
    match (item.start_time.as_deref(), item.end_time.as_deref()) {
        (Some(start), Some(end)) => format!("{start} - {end}"),
        (Some(start), None) => start.to_owned(),
        (None, _) => NOT_SPECIFIED.to_owned(),
    }
}
