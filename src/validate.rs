use chrono::{SecondsFormat, Utc};
use uuid::Uuid;

use crate::models::{Entry, RawEntry};

/// A user-correctable input problem. Never mutates state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
}

impl ValidationError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Check an entry against the year's rules. The order is fixed and the first
/// failing rule wins.
pub fn validate(entry: &Entry, year: i32) -> Result<(), ValidationError> {
    if entry.name.trim().is_empty() {
        return Err(ValidationError::new("name required"));
    }
    if entry.start.is_empty() || entry.end.is_empty() {
        return Err(ValidationError::new("both dates required"));
    }
    if !in_year(&entry.start, year) || !in_year(&entry.end, year) {
        return Err(ValidationError::new(format!("dates must be within {year}")));
    }
    if entry.end < entry.start {
        return Err(ValidationError::new("end before start"));
    }
    if entry.kind.is_empty() {
        return Err(ValidationError::new("type required"));
    }
    Ok(())
}

// Prefix test rather than a full parse: it pins the year and rejects
// malformed dates in one comparison.
fn in_year(iso: &str, year: i32) -> bool {
    iso.starts_with(&format!("{year}-"))
}

/// Coerce raw input into the canonical shape: trim text fields, default the
/// note to empty, stamp `createdAt` and a fresh id when absent. Never fails;
/// bad output is caught by [`validate`].
pub fn normalize(raw: RawEntry) -> Entry {
    Entry {
        id: raw
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(new_id),
        name: raw.name.trim().to_string(),
        kind: raw.kind.trim().to_string(),
        start: raw.start,
        end: raw.end,
        note: raw.note.unwrap_or_default().trim().to_string(),
        created_at: raw
            .created_at
            .filter(|stamp| !stamp.is_empty())
            .unwrap_or_else(now_iso),
    }
}

pub fn new_id() -> String {
    Uuid::new_v4().to_string()
}

pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
