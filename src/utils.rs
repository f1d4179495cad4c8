use crate::pubmed::{DateParts, JournalPubDate};

const MONTH_ABBREVIATIONS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

/// Left-pads `value` with zeros to at least two characters.
///
/// Non-numeric values such as `"Spring"` are returned unchanged.
pub fn zero_pad(value: &str) -> String {
    format!("{value:0>2}")
}

/// Normalizes a month to two digits, accepting numbers and English month names.
///
/// # Arguments
///
/// * `month` - A month such as `"3"`, `"03"`, `"Mar"` or `"March"`
pub fn normalize_month(month: &str) -> String {
    let month = month.trim();
    let lower = month.to_lowercase();
    MONTH_ABBREVIATIONS
        .iter()
        .position(|abbr| lower.len() >= 3 && lower.starts_with(abbr))
        .map(|i| format!("{:02}", i + 1))
        .unwrap_or_else(|| zero_pad(month))
}

/// Formats a date as `YYYY-MM-DD`, defaulting month and day to `01`.
///
/// Returns `None` when no year is present.
pub fn format_date(year: Option<&str>, month: Option<&str>, day: Option<&str>) -> Option<String> {
    let year = year.map(str::trim).filter(|y| !y.is_empty())?;
    let month = month.map(normalize_month).unwrap_or_else(|| "01".to_string());
    let day = day.map(|d| zero_pad(d.trim())).unwrap_or_else(|| "01".to_string());
    Some(format!("{year}-{month}-{day}"))
}

/// Formats a structured `Year`/`Month`/`Day` date.
pub fn format_date_parts(date: &DateParts) -> Option<String> {
    format_date(
        date.year.as_deref(),
        date.month.as_deref(),
        date.day.as_deref(),
    )
}

/// Formats a journal issue date.
///
/// A structured `Month` takes precedence. Without one, a free-text `MedlineDate`
/// supplies the year (its first four characters) and, when its second
/// `-`-separated fragment is numeric, the month.
pub fn format_journal_date(date: &JournalPubDate) -> Option<String> {
    let mut year = date.year.clone();
    let month = match (&date.month, &date.medline_date) {
        (Some(month), _) => Some(month.clone()),
        (None, Some(medline_date)) if medline_date.chars().count() >= 4 => {
            year = Some(medline_date.chars().take(4).collect());
            Some(medline_date_month(medline_date))
        }
        _ => None,
    };
    format_date(year.as_deref(), month.as_deref(), date.day.as_deref())
}

/// Best-effort month from a `MedlineDate` such as `"2000 Jan-Feb"` or `"1999-2000"`.
///
/// Only a purely numeric second fragment is used, so `"1999-2000"` yields
/// `"2000"`; anything else falls back to `"01"`.
fn medline_date_month(medline_date: &str) -> String {
    if medline_date.chars().count() <= 5 {
        return "01".to_string();
    }
    medline_date
        .split('-')
        .nth(1)
        .filter(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_digit()))
        .map(zero_pad)
        .unwrap_or_else(|| "01".to_string())
}
