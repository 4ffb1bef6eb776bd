//! Day-by-day display rows for daily plan text
//!
//! The planner returns free-form text with one `Day N: ...` line per day.
//! Line *i* (1-based) becomes row "Day *i*" with the literal prefix
//! `"Day {i}: "` removed when present. The prefix is matched against the row
//! index, not the number written in the line, so a plan that skips or reorders
//! days keeps its text untouched on the mismatched lines.

use crate::types::DayEntry;

/// Split plan text into display rows
///
/// Lines are separated by `\n` only and are otherwise left raw, so a `\r` from
/// CRLF text stays in the row. Blank lines are kept as rows of their own.
/// Empty text yields no rows.
pub fn parse_days(text: &str) -> Vec<DayEntry> {
    if text.is_empty() {
        return Vec::new();
    }

    text.split('\n')
        .enumerate()
        .map(|(index, line)| {
            let day = index as u32 + 1;
            let prefix = format!("Day {}: ", day);
            DayEntry {
                day,
                text: line.strip_prefix(prefix.as_str()).unwrap_or(line).to_string(),
            }
        })
        .collect()
}
