//! iCalendar (RFC 5545) export.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use wayfind_core::ItineraryItem;

const PRODID: &str = "-//wayfind//Itinerary Export//EN";
const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";
/// Content lines longer than this many octets are folded.
const MAX_LINE_OCTETS: usize = 75;

/// Parses `"10:00 AM"`, `"1:30pm"` and similar 12-hour clock text.
#[must_use]
pub fn parse_clock_time(text: &str) -> Option<NaiveTime> {
    let compact: String = text.split_whitespace().collect::<String>().to_uppercase();
    NaiveTime::parse_from_str(&compact, "%I:%M%p").ok()
}

/// Renders one `VEVENT` per item whose start and end both parse, dated on
/// `event_date`. An end earlier than its start rolls over to the next day.
/// Items without usable times are left out.
#[must_use]
pub fn render_calendar(items: &[ItineraryItem], event_date: NaiveDate) -> String {
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_owned(),
        "VERSION:2.0".to_owned(),
        format!("PRODID:{PRODID}"),
        "CALSCALE:GREGORIAN".to_owned(),
    ];

    for (index, item) in items.iter().enumerate() {
        let Some((start, end)) = event_window(item, event_date) else {
            tracing::debug!(name = %item.name, "omitting item without parseable times");
            continue;
        };

        lines.push("BEGIN:VEVENT".to_owned());
        lines.push(format!(
            "UID:{}-{}@wayfind",
            event_date.format("%Y%m%d"),
            index + 1
        ));
        lines.push(format!("SUMMARY:{}", escape_text(&item.name)));
        lines.push(format!("DTSTART:{}", start.format(DATE_TIME_FORMAT)));
        lines.push(format!("DTEND:{}", end.format(DATE_TIME_FORMAT)));
        if !item.description.is_empty() {
            lines.push(format!("DESCRIPTION:{}", escape_text(&item.description)));
        }
        if let Some(address) = &item.address {
            lines.push(format!("LOCATION:{}", escape_text(address)));
        }
        lines.push("END:VEVENT".to_owned());
    }

    lines.push("END:VCALENDAR".to_owned());

    let mut out = String::new();
    for line in &lines {
        out.push_str(&fold_line(line));
        out.push_str("\r\n");
    }
    out
}

fn event_window(item: &ItineraryItem, date: NaiveDate) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = parse_clock_time(item.start_time.as_deref()?)?;
    let end = parse_clock_time(item.end_time.as_deref()?)?;
    let start = date.and_time(start);
    let mut end = date.and_time(end);
    if end < start {
        end += Duration::days(1);
    }
    Some((start, end))
}

/// TEXT value escaping.
fn escape_text(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            ';' => out.push_str("\\;"),
            ',' => out.push_str("\\,"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            other => out.push(other),
        }
    }
    out
}

/// Splits a content line into chunks of at most 75 octets, continuation
/// chunks prefixed by a single space. Never splits inside a UTF-8 sequence.
fn fold_line(line: &str) -> String {
    if line.len() <= MAX_LINE_OCTETS {
        return line.to_owned();
    }

    let mut folded = String::with_capacity(line.len() + line.len() / MAX_LINE_OCTETS * 3);
    let mut used = 0;
    for c in line.chars() {
        // Continuation lines spend one octet on the leading space.
        if used + c.len_utf8() > MAX_LINE_OCTETS {
            folded.push_str("\r\n ");
            used = 1;
        }
        folded.push(c);
        used += c.len_utf8();
    }
    folded
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 14).unwrap()
    }

    fn timed(name: &str, start: &str, end: &str) -> ItineraryItem {
        ItineraryItem {
            name: name.to_owned(),
            address: Some("12 MG Road, Bengaluru".to_owned()),
            start_time: Some(start.to_owned()),
            end_time: Some(end.to_owned()),
            description: "Great coffee.".to_owned(),
        }
    }

    #[test]
    fn clock_time_formats() {
        let ten = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        assert_eq!(parse_clock_time("10:00 AM"), Some(ten));
        assert_eq!(parse_clock_time("10:00am"), Some(ten));
        assert_eq!(parse_clock_time(" 10:00  Am "), Some(ten));
        assert_eq!(
            parse_clock_time("1:30 PM"),
            NaiveTime::from_hms_opt(13, 30, 0)
        );
        assert_eq!(parse_clock_time("12:00 AM"), NaiveTime::from_hms_opt(0, 0, 0));
    }

    #[test]
    fn unparseable_clock_times() {
        assert_eq!(parse_clock_time(""), None);
        assert_eq!(parse_clock_time("noon"), None);
        assert_eq!(parse_clock_time("13:00 PM"), None);
        assert_eq!(parse_clock_time("10 AM"), None);
    }

    #[test]
    fn renders_event_with_crlf_endings() {
        let ics = render_calendar(&[timed("Cafe Arabica", "10:00 AM", "12:00 PM")], date());

        assert!(ics.starts_with("BEGIN:VCALENDAR\r\nVERSION:2.0\r\n"));
        assert!(ics.ends_with("END:VCALENDAR\r\n"));
        assert!(ics.contains("\r\nSUMMARY:Cafe Arabica\r\n"));
        assert!(ics.contains("\r\nDTSTART:20260314T100000\r\n"));
        assert!(ics.contains("\r\nDTEND:20260314T120000\r\n"));
        assert!(ics.contains("\r\nLOCATION:12 MG Road\\, Bengaluru\r\n"));
        assert!(ics.contains("\r\nDESCRIPTION:Great coffee.\r\n"));
        assert!(!ics.replace("\r\n", "").contains('\n'));
    }

    #[test]
    fn items_without_parseable_times_are_omitted() {
        let mut open_ended = timed("Toit", "7:00 PM", "late");
        open_ended.end_time = None;
        let items = [
            timed("Cafe Arabica", "10:00 AM", "12:00 PM"),
            timed("City Park", "afternoon", "3:00 PM"),
            open_ended,
        ];

        let ics = render_calendar(&items, date());

        assert_eq!(ics.matches("BEGIN:VEVENT").count(), 1);
        assert!(!ics.contains("City Park"));
        assert!(!ics.contains("Toit"));
    }

    #[test]
    fn empty_item_list_is_a_valid_empty_calendar() {
        let ics = render_calendar(&[], date());
        assert!(ics.contains("PRODID:"));
        assert!(!ics.contains("VEVENT"));
    }

    #[test]
    fn end_before_start_rolls_to_next_day() {
        let ics = render_calendar(&[timed("Late Show", "11:00 PM", "1:00 AM")], date());
        assert!(ics.contains("DTSTART:20260314T230000"));
        assert!(ics.contains("DTEND:20260315T010000"));
    }

    #[test]
    fn text_values_are_escaped() {
        assert_eq!(escape_text("a,b;c\\d\ne"), "a\\,b\\;c\\\\d\\ne");
    }

    #[test]
    fn long_lines_are_folded_on_char_boundaries() {
        let long = format!("DESCRIPTION:{}", "☕".repeat(40));
        let folded = fold_line(&long);

        for physical in folded.split("\r\n") {
            assert!(physical.len() <= MAX_LINE_OCTETS, "{} octets", physical.len());
        }
        let unfolded = folded.replace("\r\n ", "");
        assert_eq!(unfolded, long);
    }

    #[test]
    fn short_lines_are_not_folded() {
        assert_eq!(fold_line("SUMMARY:Toit"), "SUMMARY:Toit");
    }
}
