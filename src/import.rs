//! Batch CSV import of place records.
//!
//! One-time offline boundary: reads tabular rows with flattened dotted-key
//! columns (`location.lat`, `surroundingHeights.N`, `hours.openingHours`,
//! …), coerces numeric and date fields, and upserts each row into the
//! repository keyed by its `id` column. A malformed row is logged and
//! skipped; it never aborts the batch.

use std::path::Path;

use anyhow::{Context, Result, anyhow};
use chrono::{DateTime, NaiveDate, Utc};
use csv::StringRecord;

use crate::place::{Direction, Hours, Location, Place, SurroundingHeights};
use crate::repository::PlaceRepository;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub imported: usize,
    pub skipped: usize,
}

/// Import every row of `csv_path` into the repository.
pub fn run_import(csv_path: &Path, repo: &PlaceRepository) -> Result<ImportSummary> {
    let mut reader = csv::Reader::from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;
    let headers = reader.headers().context("Failed to read CSV header")?.clone();

    let mut summary = ImportSummary::default();
    for (index, record) in reader.records().enumerate() {
        let line = index + 2; // line 1 is the header
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                log_warning!("Skipping unreadable row at line {line}: {e}");
                summary.skipped += 1;
                continue;
            }
        };

        match place_from_record(&headers, &record) {
            Ok(place) => {
                repo.upsert(&place)?;
                log_indented!("Imported: {} ({})", place.name, place.id);
                summary.imported += 1;
            }
            Err(e) => {
                log_warning!("Skipping row at line {line}: {e}");
                summary.skipped += 1;
            }
        }
    }
    Ok(summary)
}

/// Build a place from one CSV row, coercing numeric and date fields.
fn place_from_record(headers: &StringRecord, record: &StringRecord) -> Result<Place> {
    let id = required(headers, record, "id")?;
    let name = required(headers, record, "name")?;

    let lat = parse_f64(required(headers, record, "location.lat")?, "location.lat")?;
    let lng = parse_f64(required(headers, record, "location.lng")?, "location.lng")?;

    let hours = match (
        field(headers, record, "hours.openingHours"),
        field(headers, record, "hours.closingHours"),
    ) {
        (Some(open), Some(close)) => Some(Hours {
            opening_hours: parse_f64(open, "hours.openingHours")?,
            closing_hours: parse_f64(close, "hours.closingHours")?,
        }),
        _ => None,
    };

    let mut surrounding_heights = SurroundingHeights::new();
    for direction in Direction::ALL {
        let column = format!("surroundingHeights.{direction}");
        if let Some(value) = field(headers, record, &column) {
            surrounding_heights.set(direction, parse_f64(value, &column)?);
        }
    }

    let place = Place {
        id: id.to_string(),
        name: name.to_string(),
        description: field(headers, record, "description").map(str::to_string),
        place_type: field(headers, record, "type").map(str::to_string),
        phone: field(headers, record, "phone").map(str::to_string),
        url: field(headers, record, "url").map(str::to_string),
        google_maps_location: field(headers, record, "googleMapsLocation").map(str::to_string),
        date_added: field(headers, record, "dateAdded")
            .map(parse_date)
            .transpose()?,
        hours,
        location: Location { lat, lng },
        surrounding_heights,
    };
    place.validate()?;
    Ok(place)
}

/// Look up a column by header name; empty cells read as absent.
fn field<'a>(headers: &StringRecord, record: &'a StringRecord, name: &str) -> Option<&'a str> {
    let position = headers.iter().position(|h| h == name)?;
    match record.get(position).map(str::trim) {
        Some("") | None => None,
        Some(value) => Some(value),
    }
}

fn required<'a>(
    headers: &StringRecord,
    record: &'a StringRecord,
    name: &str,
) -> Result<&'a str> {
    field(headers, record, name).ok_or_else(|| anyhow!("missing required column '{name}'"))
}

fn parse_f64(value: &str, column: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|_| anyhow!("column '{column}' is not a number: '{value}'"))
}

/// Accept RFC 3339 timestamps or plain dates (midnight UTC).
fn parse_date(value: &str) -> Result<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_hms_opt(0, 0, 0).expect("midnight exists").and_utc());
    }
    Err(anyhow!("unrecognized date: '{value}'"))
}
