use serde_json::Value;

use crate::models::{Entry, ExportFile, ImportSummary, RawEntry};
use crate::validate::{normalize, now_iso, validate};

/// Import file is not JSON of the expected shape. Aborts the import with zero
/// side effects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatError {
    pub message: String,
}

impl FormatError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub fn export_payload(year: i32, entries: &[Entry]) -> ExportFile {
    ExportFile {
        version: 1,
        year,
        exported_at: now_iso(),
        entries: entries.to_vec(),
    }
}

/// Accept either the versioned export object or a bare array of entries.
/// Individual records are handed over as raw JSON; per-record problems are
/// counted during the merge, not here.
pub fn parse_import(payload: &Value) -> Result<Vec<Value>, FormatError> {
    match payload {
        Value::Array(items) => Ok(items.clone()),
        Value::Object(map) => match map.get("entries") {
            Some(Value::Array(items)) => Ok(items.clone()),
            _ => Err(FormatError::new(
                "expected an object with an entries array",
            )),
        },
        _ => Err(FormatError::new(
            "expected an array of entries or an export object",
        )),
    }
}

/// Merge imported records into the current collection by id. Every record is
/// renormalized and revalidated; invalid ones are dropped and only counted.
pub fn merge_import(
    current: &[Entry],
    records: Vec<Value>,
    year: i32,
) -> (Vec<Entry>, ImportSummary) {
    let mut merged = current.to_vec();
    let mut summary = ImportSummary::default();

    for record in records {
        let raw: RawEntry = serde_json::from_value(record).unwrap_or_default();
        let entry = normalize(raw);
        if validate(&entry, year).is_err() {
            summary.skipped += 1;
            continue;
        }
        match merged.iter_mut().find(|e| e.id == entry.id) {
            Some(slot) => {
                *slot = entry;
                summary.updated += 1;
            }
            None => {
                merged.push(entry);
                summary.added += 1;
            }
        }
    }

    (merged, summary)
}
