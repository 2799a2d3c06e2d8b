use std::collections::HashSet;

use crate::dates::{days_within_month, overlaps_month};
use crate::models::{Entry, Filter, LEAVE_TYPES, MonthSummary, TypeBreakdown};

/// Aggregate one month of the collection under a display filter.
///
/// Pure function of its inputs. `total_days` sums each entry's clipped span,
/// so a person with several overlapping entries is counted once per entry.
/// The breakdown counts distinct people per canonical label by exact type
/// match; entries with a free-text type appear in no breakdown row even
/// though they count toward the KPIs and the calendar.
pub fn month_summary(entries: &[Entry], year: i32, month: u32, filter: &Filter) -> MonthSummary {
    let name_q = filter.name.trim().to_lowercase();
    let kind_q = filter.kind.trim().to_lowercase();

    let mut month_entries: Vec<Entry> = entries
        .iter()
        .filter(|e| name_q.is_empty() || e.name.to_lowercase().contains(&name_q))
        .filter(|e| kind_q.is_empty() || e.kind.to_lowercase() == kind_q)
        .filter(|e| overlaps_month(e, year, month))
        .cloned()
        .collect();
    // stable, so equal start dates keep insertion order
    month_entries.sort_by(|a, b| a.start.cmp(&b.start));

    let total_days = month_entries
        .iter()
        .map(|e| days_within_month(e, year, month))
        .sum();

    let breakdown = LEAVE_TYPES
        .iter()
        .copied()
        .map(|label| TypeBreakdown {
            label,
            people: distinct_people(month_entries.iter().filter(|e| e.kind == label)),
        })
        .collect();

    MonthSummary {
        year,
        month,
        unique_people: distinct_people(month_entries.iter()),
        total_entries: month_entries.len(),
        total_days,
        breakdown,
        entries: month_entries,
    }
}

fn distinct_people<'a>(entries: impl Iterator<Item = &'a Entry>) -> usize {
    entries
        .map(|e| e.name.trim().to_lowercase())
        .collect::<HashSet<_>>()
        .len()
}
