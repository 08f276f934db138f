//! Recovers structured items from a generated itinerary document.
//!
//! The document is expected to follow a loose convention, one block per
//! venue:
//!
//! ```text
//! ### Cafe Arabica
//! *12 MG Road, Bengaluru*
//! 🕒 10:00 AM - 12:00 PM
//! Great coffee and quiet seating.
//! 📝 Summary
//! A relaxing half day out.
//! ```
//!
//! Parsing never fails. A document with no recognisable headers yields no
//! items.

use std::sync::LazyLock;

use regex::Regex;
use wayfind_core::{ItineraryItem, ParseResult};

/// Lines that open the trailing summary section, tried in order.
const SUMMARY_MARKERS: &[&str] = &[
    r"^#{1,6}\s*Summary",
    r"^\p{Extended_Pictographic}\x{FE0F}?\s*Summary",
    r"^\*\*Summary\*\*:?$",
    r"^Summary:?$",
];

/// Lines that name a venue. The first capture group holding text is the name.
const NAME_PATTERNS: &[&str] = &[
    r"^###\s+(.*)",
    r"^[*-]\s+\*\*(.*?)\*\*",
    r"^\d+\.\s+\*\*(.*?)\*\*",
];

/// Section labels that look like venue headers but are not venues.
const GENERIC_LABELS: &[&str] = &[
    "itinerary",
    "mini-itinerary",
    "shopping",
    "restaurants",
    "activities",
];

/// Prefixes that introduce a time range. An emoji marker may carry a
/// trailing variation selector.
const TIME_MARKERS: &[&str] = &[
    "🕒", "🕐", "🕑", "🕓", "🕔", "🕕", "🕖", "🕗", "🕘", "🕙", "🕚", "🕛", "⏰", "Time:",
];

static SUMMARY_RE: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    SUMMARY_MARKERS
        .iter()
        .map(|p| Regex::new(&format!("(?i){p}")).expect("valid summary marker regex"))
        .collect()
});

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&NAME_PATTERNS.join("|")).expect("valid item name regex")
});

static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\*(.*?)\*|^Address:\s*(.*)").expect("valid address regex")
});

static ADDRESS_PREFIX_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Address:\s*").expect("valid address prefix regex"));

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    let markers: Vec<String> = TIME_MARKERS.iter().map(|m| regex::escape(m)).collect();
    Regex::new(&format!(
        r"(?i)(?:{})\x{{FE0F}}?\s*(.*)|(\d{{1,2}}:\d{{2}}\s*[AP]M\s*-\s*\d{{1,2}}:\d{{2}}\s*[AP]M)",
        markers.join("|")
    ))
    .expect("valid time regex")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    ScanningItem,
    /// Terminal: every remaining line belongs to the summary.
    InSummary,
}

/// Fields gathered for the item being read. Address and time lines seen
/// before the first header are kept for that first item.
#[derive(Debug, Default)]
struct Draft {
    name: Option<String>,
    address: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    description: Vec<String>,
}

impl Draft {
    fn into_item(self) -> Option<ItineraryItem> {
        Some(ItineraryItem {
            name: self.name?,
            address: self.address,
            start_time: self.start_time,
            end_time: self.end_time,
            description: self.description.join(" "),
        })
    }
}

struct ItineraryParser {
    state: ParseState,
    draft: Draft,
    items: Vec<ItineraryItem>,
    summary: Vec<String>,
}

impl ItineraryParser {
    fn new() -> Self {
        Self {
            state: ParseState::ScanningItem,
            draft: Draft::default(),
            items: Vec::new(),
            summary: Vec::new(),
        }
    }

    /// Emits the draft when it has a name; a nameless draft keeps its fields.
    fn flush(&mut self) {
        if self.draft.name.is_some() {
            if let Some(item) = std::mem::take(&mut self.draft).into_item() {
                self.items.push(item);
            }
        }
    }

    fn feed(&mut self, line: &str) {
        if self.state == ParseState::InSummary {
            self.summary.push(line.to_owned());
            return;
        }

        if SUMMARY_RE.iter().any(|re| re.is_match(line)) {
            self.flush();
            self.state = ParseState::InSummary;
            return;
        }

        if let Some(name) = capture_text(&NAME_RE, line) {
            if is_generic_label(&name) {
                tracing::debug!(label = %name, "skipping section header");
            } else if !name.is_empty() {
                self.flush();
                self.draft.name = Some(name);
            }
            return;
        }

        if self.draft.address.is_none() {
            if let Some(raw) = capture_text(&ADDRESS_RE, line) {
                let address = ADDRESS_PREFIX_RE.replace(&raw, "").trim().to_owned();
                if !address.is_empty() {
                    self.draft.address = Some(address);
                    return;
                }
            }
        }

        if self.draft.start_time.is_none() {
            if let Some(span) = capture_text(&TIME_RE, line).filter(|s| !s.is_empty()) {
                let (start, end) = split_time_span(&span);
                self.draft.start_time = Some(start);
                self.draft.end_time = end;
                return;
            }
        }

        if self.draft.name.is_some() && !is_separator(line) {
            self.draft.description.push(line.to_owned());
        }
    }

    fn finish(mut self) -> ParseResult {
        self.flush();
        ParseResult {
            items: self.items,
            summary: self.summary.join(" ").trim().to_owned(),
        }
    }
}

/// Parses a generated itinerary into items (document order) and the
/// trailing summary. Blank lines are ignored and every line is trimmed.
#[must_use]
pub fn parse_itinerary(text: &str) -> ParseResult {
    let mut parser = ItineraryParser::new();
    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        parser.feed(line);
    }
    let result = parser.finish();
    tracing::debug!(
        items = result.items.len(),
        has_summary = !result.summary.is_empty(),
        "parsed itinerary"
    );
    result
}

/// Trimmed text of the first participating capture group, when `re` matches.
fn capture_text(re: &Regex, line: &str) -> Option<String> {
    let caps = re.captures(line)?;
    Some(
        caps.iter()
            .skip(1)
            .flatten()
            .map(|m| m.as_str().trim())
            .find(|s| !s.is_empty())
            .unwrap_or_default()
            .to_owned(),
    )
}

fn is_generic_label(name: &str) -> bool {
    let lowered = name.to_lowercase();
    GENERIC_LABELS.contains(&lowered.as_str()) || lowered.contains("summary")
}

/// Horizontal rules: `---`, `***`, `___` and longer runs.
fn is_separator(line: &str) -> bool {
    line.starts_with("---")
        || (line.len() >= 3 && line.chars().all(|c| matches!(c, '-' | '*' | '_')))
}

/// `"10:00 AM - 12:00 PM"` → `("10:00 AM", Some("12:00 PM"))`. Without a
/// hyphen the whole span is the start. Text after a second hyphen is dropped.
fn split_time_span(span: &str) -> (String, Option<String>) {
    let mut parts = span.split('-').map(str::trim);
    let start = parts.next().unwrap_or_default().to_owned();
    let end = parts.next().filter(|p| !p.is_empty()).map(str::to_owned);
    (start, end)
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
