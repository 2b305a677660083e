//! CSV loading for the letters and places files.
//!
//! Every row is parsed into a typed record up front; a single bad row fails
//! the whole load so the service never starts with a partial archive.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::error::ArchiveError;
use crate::models::{Letter, Place};
use crate::types::{RecordId, Timestamp};

/// Paragraph separator used in the letters file.
pub const PARAGRAPH_MARKER: &str = "<PARA>";

const PARAGRAPH_BREAK: &str = "\n\n";

/// Formats accepted for the `date` column, tried in order after RFC 3339.
const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Reasons a file failed to parse. Line numbers count the header as line 1.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("file not found")]
    NotFound,

    #[error("{0}")]
    Io(#[from] io::Error),

    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("line {line}: invalid {column} value {value:?}")]
    InvalidValue {
        line: usize,
        column: &'static str,
        value: String,
    },

    #[error("line {line}: duplicate place_id {place_id}")]
    DuplicatePlace { line: usize, place_id: RecordId },
}

/// A letters-file row after parsing, before place resolution and id assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterRow {
    pub date: Timestamp,
    pub place_id: Option<RecordId>,
    pub sender: String,
    pub recipient: String,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct RawPlace {
    place_id: String,
    name: String,
    #[serde(default)]
    geometry: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawLetter {
    date: String,
    #[serde(default)]
    place_id: Option<String>,
    sender: String,
    recipient: String,
    text: String,
}

/// Load the places file into a map keyed by place id.
pub fn load_places(path: &Path) -> Result<BTreeMap<RecordId, Place>, ArchiveError> {
    let places = open(path)
        .and_then(read_places)
        .map_err(|e| ArchiveError::data_load(path, e))?;
    tracing::info!(path = %path.display(), count = places.len(), "Loaded places");
    Ok(places)
}

/// Load the letters file, resolving each row's `place_id` against `places`.
pub fn load_letters(
    path: &Path,
    places: &BTreeMap<RecordId, Place>,
) -> Result<Vec<Letter>, ArchiveError> {
    let rows = open(path)
        .and_then(read_letter_rows)
        .map_err(|e| ArchiveError::data_load(path, e))?;
    let letters = resolve_letters(rows, places);
    let unplaced = letters.iter().filter(|l| l.place.is_none()).count();
    tracing::info!(
        path = %path.display(),
        count = letters.len(),
        unplaced,
        "Loaded letters"
    );
    Ok(letters)
}

/// Parse places CSV (`place_id, name, geometry`) from any reader.
pub fn read_places<R: Read>(reader: R) -> Result<BTreeMap<RecordId, Place>, LoadError> {
    let mut places = BTreeMap::new();
    for (index, row) in csv::Reader::from_reader(reader)
        .deserialize::<RawPlace>()
        .enumerate()
    {
        let line = index + 2;
        let raw = row?;
        let id = parse_id(&raw.place_id)
            .filter(|id| *id >= 1)
            .ok_or_else(|| LoadError::InvalidValue {
                line,
                column: "place_id",
                value: raw.place_id.clone(),
            })?;
        let place = Place {
            id,
            name: raw.name.trim().to_string(),
            geometry: non_empty(raw.geometry),
        };
        if places.insert(id, place).is_some() {
            return Err(LoadError::DuplicatePlace { line, place_id: id });
        }
    }
    Ok(places)
}

/// Parse letters CSV (`date, place_id, sender, recipient, text`) from any reader.
///
/// An `id` column, if present, is ignored: ids come from row order.
pub fn read_letter_rows<R: Read>(reader: R) -> Result<Vec<LetterRow>, LoadError> {
    let mut rows = Vec::new();
    for (index, row) in csv::Reader::from_reader(reader)
        .deserialize::<RawLetter>()
        .enumerate()
    {
        let line = index + 2;
        let raw = row?;

        let date = parse_date(&raw.date).ok_or_else(|| LoadError::InvalidValue {
            line,
            column: "date",
            value: raw.date.clone(),
        })?;

        let place_id = match non_empty(raw.place_id) {
            None => None,
            Some(value) => Some(parse_id(&value).ok_or(LoadError::InvalidValue {
                line,
                column: "place_id",
                value,
            })?),
        };

        rows.push(LetterRow {
            date,
            place_id,
            sender: raw.sender,
            recipient: raw.recipient,
            text: raw.text,
        });
    }
    Ok(rows)
}

/// Assign 1-based ids in row order, normalize paragraph markers and resolve
/// place names. Unknown place ids resolve to `None`.
pub fn resolve_letters(
    rows: impl IntoIterator<Item = LetterRow>,
    places: &BTreeMap<RecordId, Place>,
) -> Vec<Letter> {
    rows.into_iter()
        .zip(1..)
        .map(|(row, id)| {
            let place = row
                .place_id
                .and_then(|place_id| places.get(&place_id))
                .map(|p| p.name.clone());
            Letter {
                id,
                date: row.date,
                place,
                sender: row.sender,
                recipient: row.recipient,
                text: normalize_paragraphs(&row.text),
            }
        })
        .collect()
}

/// Replace the paragraph marker with a blank line.
pub fn normalize_paragraphs(text: &str) -> String {
    text.replace(PARAGRAPH_MARKER, PARAGRAPH_BREAK)
}

/// Parse a letter date. Zoned timestamps are converted to UTC.
pub fn parse_date(value: &str) -> Option<Timestamp> {
    let value = value.trim();
    if let Ok(zoned) = DateTime::parse_from_rfc3339(value) {
        return Some(zoned.naive_utc());
    }
    DATE_TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(value, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Parse an integer id, accepting integral floats such as `3.0`.
fn parse_id(value: &str) -> Option<RecordId> {
    let value = value.trim();
    if let Ok(id) = value.parse::<RecordId>() {
        return Some(id);
    }
    let float = value.parse::<f64>().ok()?;
    if float.fract() == 0.0 && float.abs() < 1e15 {
        Some(float as RecordId)
    } else {
        None
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound,
        _ => LoadError::Io(e),
    })
}
