//! Itinerary parse and export command handlers.

use std::io::Read as _;
use std::path::Path;

use anyhow::Context as _;
use chrono::{Local, NaiveDate};
use wayfind_itinerary::{parse_itinerary, render_calendar, render_document};

use crate::ExportFormat;

/// Reads the whole document from `input`, or stdin when it is `-`.
fn read_input(input: &Path) -> anyhow::Result<String> {
    if input == Path::new("-") {
        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("failed to read itinerary from stdin")?;
        return Ok(text);
    }
    std::fs::read_to_string(input)
        .with_context(|| format!("failed to read itinerary from {}", input.display()))
}

/// Parse an itinerary and print it as pretty JSON.
///
/// # Errors
///
/// Returns an error if the input cannot be read.
pub(crate) fn run_parse(input: &Path) -> anyhow::Result<()> {
    let result = parse_itinerary(&read_input(input)?);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Parse an itinerary and render it in `format`.
///
/// Calendar events are dated on `date`, or tomorrow when omitted.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the output cannot be
/// written.
pub(crate) fn run_export(
    input: &Path,
    format: ExportFormat,
    date: Option<NaiveDate>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let result = parse_itinerary(&read_input(input)?);

    let rendered = match format {
        ExportFormat::Ics => {
            let event_date = match date {
                Some(date) => date,
                None => tomorrow()?,
            };
            render_calendar(&result.items, event_date)
        }
        ExportFormat::Text => render_document(&result),
    };

    match output {
        Some(path) => {
            std::fs::write(path, &rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(
                path = %path.display(),
                items = result.items.len(),
                "wrote itinerary export"
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn tomorrow() -> anyhow::Result<NaiveDate> {
    Local::now()
        .date_naive()
        .succ_opt()
        .ok_or_else(|| anyhow::anyhow!("no calendar date after today"))
}
