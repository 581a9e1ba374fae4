//! Interpretation of the operator's answers.

/// Answers accepted as "continue" (French and English).
const AFFIRMATIVE: [&str; 4] = ["o", "oui", "y", "yes"];

pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE.contains(&answer.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Zero-based index into the listed instances.
    Index(usize),
    Cancelled,
}

/// Parse a menu answer against `count` entries numbered from 1.
///
/// Only the leading number counts, so a completed entry such as
/// `"2 - QGIS 3.28 - QGIS.org - C:\..."` selects entry 2. Zero, out of range
/// and non-numeric answers cancel.
pub fn parse_selection(answer: &str, count: usize) -> Selection {
    let digits: String = answer
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();

    match digits.parse::<usize>() {
        Ok(number) if (1..=count).contains(&number) => Selection::Index(number - 1),
        _ => Selection::Cancelled,
    }
}
