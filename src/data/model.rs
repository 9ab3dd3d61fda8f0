use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SampleRecord – one accepted (timestamp, level) reading
// ---------------------------------------------------------------------------

/// A single SPL reading extracted from one log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// `HH:MM:SS` as written in the log, fractional seconds removed.
    #[serde(rename = "timestamp")]
    pub timestamp_label: String,
    /// Seconds since 00:00:00, fractional part truncated.
    #[serde(rename = "seconds")]
    pub seconds_since_midnight: u32,
    /// Sound pressure level in dB.
    #[serde(rename = "level_db")]
    pub level: f64,
}

impl SampleRecord {
    /// Hour of day (0–23).
    pub fn hour(&self) -> u32 {
        self.seconds_since_midnight / 3600
    }
}

impl fmt::Display for SampleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1} dB at {}", self.level, self.timestamp_label)
    }
}

// ---------------------------------------------------------------------------
// Series – time-ordered samples
// ---------------------------------------------------------------------------

/// Samples sorted ascending by `seconds_since_midnight`.
///
/// Only the analyzer builds a `Series`, so one obtained from a successful
/// parse is never empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Series {
    records: Vec<SampleRecord>,
}

impl Series {
    /// Stable sort by time; records that share a second keep their order.
    pub(crate) fn from_unsorted(mut records: Vec<SampleRecord>) -> Self {
        records.sort_by_key(|r| r.seconds_since_midnight);
        Series { records }
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SampleRecord> {
        self.records.iter()
    }

    pub fn first(&self) -> Option<&SampleRecord> {
        self.records.first()
    }

    pub fn last(&self) -> Option<&SampleRecord> {
        self.records.last()
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the series is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a Series {
    type Item = &'a SampleRecord;
    type IntoIter = std::slice::Iter<'a, SampleRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ---------------------------------------------------------------------------
// SafetyTier
// ---------------------------------------------------------------------------

/// Coarse exposure classification derived from the average level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SafetyTier {
    Safe,
    Moderate,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl fmt::Display for SafetyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SafetyTier::Safe => write!(f, "Safe"),
            SafetyTier::Moderate => write!(f, "Moderate"),
            SafetyTier::HighRisk => write!(f, "High Risk"),
        }
    }
}

// ---------------------------------------------------------------------------
// StatsBundle – derived summary of a parsed log
// ---------------------------------------------------------------------------

/// Read-only statistics computed once per parsed log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsBundle {
    pub average_level: f64,
    pub max_level: f64,
    pub min_level: f64,
    /// Loudest sample with an hour before the morning cutoff (10:00).
    pub peak_before_10: Option<SampleRecord>,
    /// Up to three loudest samples, pairwise separated in time, descending.
    pub top3_distinct: Vec<SampleRecord>,
    pub sample_count: usize,
    pub duration_secs: u32,
    /// `"{h}h {m}m"`.
    pub duration_label: String,
    pub safety_tier: SafetyTier,
}

// ---------------------------------------------------------------------------
// FileMetadata
// ---------------------------------------------------------------------------

/// Sentinel used when no date can be recovered from a file name.
pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Label and date recovered from a file name alone.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileMetadata {
    pub derived_name: String,
    /// `YYYY-MM-DD` or [`UNKNOWN_DATE`].
    pub derived_date: String,
}

// ---------------------------------------------------------------------------
// LoadedLog – everything the viewer and the exporters need
// ---------------------------------------------------------------------------

/// A fully analysed log file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadedLog {
    pub file_name: String,
    pub metadata: FileMetadata,
    pub stats: StatsBundle,
    pub series: Series,
}
