use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{FileMetadata, UNKNOWN_DATE};

/// Compact `YYYYMMDD` in the 1900s or 2000s with a plausible month and day.
static COMPACT_DATE: Lazy<Option<Regex>> = Lazy::new(|| {
    Regex::new(r"(20\d{2}|19\d{2})(0[1-9]|1[0-2])(0[1-9]|[12]\d|3[01])").ok()
});

/// Derive an event label and date from a log's file name.
///
/// A `YYYYMMDD` run anywhere in the name becomes the date and is cut out of
/// the label, so `"20231025 Sunday Service.txt"` gives `"Sunday Service"` on
/// `"2023-10-25"`. Never fails; the date falls back to [`UNKNOWN_DATE`].
pub fn extract_metadata(file_name: &str) -> FileMetadata {
    let stem = strip_extension(file_name);

    let Some((start, date)) = find_compact_date(stem) else {
        return FileMetadata {
            derived_name: stem.to_string(),
            derived_date: UNKNOWN_DATE.to_string(),
        };
    };

    let spliced = format!("{}{}", &stem[..start], &stem[start + 8..]);
    let name = spliced
        .trim()
        .trim_matches(|c: char| c == '-' || c == '_')
        .trim();

    FileMetadata {
        derived_name: (if name.is_empty() { stem } else { name }).to_string(),
        derived_date: date,
    }
}

/// Drop the last `.ext`, if any.
fn strip_extension(file_name: &str) -> &str {
    match file_name.rfind('.') {
        Some(idx) => {
            let ext = &file_name[idx + 1..];
            if ext.is_empty() || ext.contains('/') {
                file_name
            } else {
                &file_name[..idx]
            }
        }
        None => file_name,
    }
}

/// Leftmost compact date run. Returns its byte offset and the `YYYY-MM-DD`
/// form.
fn find_compact_date(s: &str) -> Option<(usize, String)> {
    let caps = COMPACT_DATE.as_ref()?.captures(s)?;
    let start = caps.get(0)?.start();
    let (year, month, day) = (caps.get(1)?, caps.get(2)?, caps.get(3)?);
    Some((
        start,
        format!("{}-{}-{}", year.as_str(), month.as_str(), day.as_str()),
    ))
}
