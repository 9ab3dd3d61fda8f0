use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::AnalysisConfig;

use super::model::SampleRecord;

/// `H:MM:SS` / `HH:MM:SS`, optionally followed by fractional seconds.
static TIME_LABEL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(\d{1,2}:\d{2}:\d{2})(\.\d+)?").ok());

/// Leading decimal number with an optional exponent.
static LEADING_NUMBER: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?").ok());

// ---------------------------------------------------------------------------
// Candidate extraction from a single line
// ---------------------------------------------------------------------------

/// A tentative `(time, level)` pair pulled out of one line.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    /// `H:MM:SS` / `HH:MM:SS` with any fractional seconds removed.
    pub time_label: String,
    pub level: f64,
}

/// Split a raw line into fragments.
///
/// Quotes are dropped and any run of whitespace, `,` or `;` separates
/// fragments, so REW exports, CSV and tab-separated logs all tokenize the
/// same way.
pub fn split_fragments(line: &str) -> Vec<String> {
    let cleaned: String = line
        .trim()
        .chars()
        .filter(|c| *c != '"' && *c != '\'')
        .collect();

    cleaned
        .split(|c: char| c.is_whitespace() || c == ',' || c == ';')
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract a candidate from one line, or `None` if the line has no usable
/// timestamp or no value inside the configured dB window.
pub fn extract_candidate(line: &str, config: &AnalysisConfig) -> Option<Candidate> {
    let fragments = split_fragments(line);
    if fragments.len() < 2 {
        return None;
    }

    // Timestamps lead, so scan forward.
    let (time_idx, time_label) = fragments
        .iter()
        .enumerate()
        .find_map(|(i, part)| find_time_label(part).map(|label| (i, label)))?;

    // The value is conventionally the last column, so scan backward.
    let level = fragments
        .iter()
        .enumerate()
        .rev()
        .filter(|(i, part)| *i != time_idx && !part.contains(':'))
        .filter_map(|(_, part)| leading_float(&part.replacen(',', ".", 1)))
        .find(|v| config.accepts_level(*v))?;

    Some(Candidate {
        time_label: time_label.to_string(),
        level,
    })
}

/// Full per-line pipeline: candidate extraction plus clock parsing.
pub fn parse_line(line: &str, config: &AnalysisConfig) -> Option<SampleRecord> {
    let candidate = extract_candidate(line, config)?;
    let seconds = clock_seconds(&candidate.time_label)?;
    Some(SampleRecord {
        timestamp_label: candidate.time_label,
        seconds_since_midnight: seconds,
        level: candidate.level,
    })
}

// ---------------------------------------------------------------------------
// Field helpers
// ---------------------------------------------------------------------------

/// Find the first `\d{1,2}:\d{2}:\d{2}` inside `fragment` and return it.
/// A trailing `.fff` is allowed but not part of the returned label.
pub fn find_time_label(fragment: &str) -> Option<&str> {
    let caps = TIME_LABEL.as_ref()?.captures(fragment)?;
    caps.get(1).map(|m| m.as_str())
}

/// Convert an `H:MM:SS` label to seconds since midnight.
/// Components outside a 24h clock are rejected.
pub fn clock_seconds(label: &str) -> Option<u32> {
    let mut parts = label.split(':').map(|p| p.parse::<u32>().ok());
    let (h, m, s) = (parts.next()??, parts.next()??, parts.next()??);
    if parts.next().is_some() || h > 23 || m > 59 || s > 59 {
        return None;
    }
    Some(h * 3600 + m * 60 + s)
}

/// Parse the longest numeric prefix of `s`, so `"85.5dB"` reads as `85.5`.
pub fn leading_float(s: &str) -> Option<f64> {
    let m = LEADING_NUMBER.as_ref()?.find(s)?;
    m.as_str().parse::<f64>().ok()
}
