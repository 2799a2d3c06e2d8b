use serde::{Deserialize, Serialize};

/// The five canonical leave types. Entries may carry any free-text type, but
/// only these labels get a row in the monthly breakdown.
pub const LEAVE_TYPES: [&str; 5] = [
    "Vacaciones",
    "Día de la familia",
    "Permiso",
    "Incapacidad",
    "Otro",
];

/// One leave record for one person over an inclusive date range.
///
/// `start` and `end` are zero-padded ISO dates, so lexicographic comparison
/// matches chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub note: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

/// Untrusted input as it arrives from the form or an import file. Normalized
/// into an [`Entry`] before validation; missing fields default to empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEntry {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub end: String,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

/// Transient display filter. `name` is a case-insensitive substring query,
/// `kind` an exact case-insensitive match; empty means no filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Filter {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub kind: String,
}

#[derive(Debug, Serialize)]
pub struct TypeBreakdown {
    pub label: &'static str,
    pub people: usize,
}

#[derive(Debug, Serialize)]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub unique_people: usize,
    pub total_entries: usize,
    pub total_days: i64,
    pub breakdown: Vec<TypeBreakdown>,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Serialize)]
pub struct CollectionResponse {
    pub year: i32,
    pub entries: Vec<Entry>,
    pub revision: Option<String>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// Version-tagged interchange file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportFile {
    pub version: u32,
    pub year: i32,
    #[serde(rename = "exportedAt")]
    pub exported_at: String,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
}

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    #[serde(flatten)]
    pub summary: ImportSummary,
    #[serde(flatten)]
    pub collection: CollectionResponse,
}
