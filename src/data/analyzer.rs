use std::cmp::Ordering;

use thiserror::Error;

use crate::config::AnalysisConfig;

use super::model::{SafetyTier, SampleRecord, Series, StatsBundle};
use super::tokenizer::parse_line;

const SECONDS_PER_DAY: u32 = 24 * 3600;

/// The only failure the analysis core reports.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error(
        "No valid SPL data found. Please ensure the file is a text log containing \
         timestamps (HH:MM:SS) and valid dB values."
    )]
    NoValidData,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Analyse a whole log with the default configuration.
pub fn analyze_log(content: &str) -> Result<(Series, StatsBundle), AnalysisError> {
    analyze_log_with(content, &AnalysisConfig::default())
}

/// Parse every line, then derive the time-sorted series and its statistics.
pub fn analyze_log_with(
    content: &str,
    config: &AnalysisConfig,
) -> Result<(Series, StatsBundle), AnalysisError> {
    let mut lines_seen = 0usize;
    let records: Vec<SampleRecord> = content
        .lines()
        .inspect(|_| lines_seen += 1)
        .filter_map(|line| parse_line(line, config))
        .collect();

    log::debug!(
        "Parsed {lines_seen} lines: {} accepted, {} skipped",
        records.len(),
        lines_seen - records.len()
    );

    if records.is_empty() {
        return Err(AnalysisError::NoValidData);
    }

    let stats = compute_stats(&records, config);
    Ok((Series::from_unsorted(records), stats))
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Compute the summary over records in source order. `records` must be
/// non-empty.
fn compute_stats(records: &[SampleRecord], config: &AnalysisConfig) -> StatsBundle {
    let average_level = records.iter().map(|r| r.level).sum::<f64>() / records.len() as f64;

    let by_level = sorted_by_level(records);
    let max_level = by_level[0].level;
    let min_level = by_level[by_level.len() - 1].level;

    let top3_distinct = select_distinct_peaks(
        &by_level,
        config.peak_count,
        config.peak_separation_secs,
    );
    let peak_before_10 = peak_before_hour(records, config.morning_cutoff_hour);

    let duration_secs = recording_span(records);

    StatsBundle {
        average_level,
        max_level,
        min_level,
        peak_before_10,
        top3_distinct,
        sample_count: records.len(),
        duration_secs,
        duration_label: format_duration(duration_secs),
        safety_tier: SafetyTier::classify(average_level, config),
    }
}

/// Copy sorted loudest first. Equal levels: earlier time first, then source
/// order.
fn sorted_by_level(records: &[SampleRecord]) -> Vec<&SampleRecord> {
    let mut by_level: Vec<&SampleRecord> = records.iter().collect();
    by_level.sort_by(|a, b| match b.level.total_cmp(&a.level) {
        Ordering::Equal => a.seconds_since_midnight.cmp(&b.seconds_since_midnight),
        other => other,
    });
    by_level
}

/// Greedy peak picking: walk loudest first and keep a candidate only if it
/// is at least `separation_secs` away from every peak kept so far.
pub fn select_distinct_peaks(
    by_level: &[&SampleRecord],
    count: usize,
    separation_secs: u32,
) -> Vec<SampleRecord> {
    let mut peaks: Vec<SampleRecord> = Vec::with_capacity(count);
    for candidate in by_level {
        if peaks.len() >= count {
            break;
        }
        let distinct = peaks.iter().all(|p| {
            p.seconds_since_midnight.abs_diff(candidate.seconds_since_midnight) >= separation_secs
        });
        if distinct {
            peaks.push((*candidate).clone());
        }
    }
    peaks
}

/// Loudest record whose hour is below `cutoff_hour`. Ties keep the first seen.
fn peak_before_hour(records: &[SampleRecord], cutoff_hour: u32) -> Option<SampleRecord> {
    records
        .iter()
        .filter(|r| r.hour() < cutoff_hour)
        .fold(None, |best: Option<&SampleRecord>, r| match best {
            Some(b) if b.level >= r.level => Some(b),
            _ => Some(r),
        })
        .cloned()
}

/// Recording span over the time-sorted timestamps.
fn recording_span(records: &[SampleRecord]) -> u32 {
    let mut seconds: Vec<u32> = records.iter().map(|r| r.seconds_since_midnight).collect();
    seconds.sort_unstable();
    circular_span(&seconds)
}

/// Shortest arc of the 24h clock covering every timestamp in `sorted`.
///
/// The largest gap between neighbours, counting the one from the last
/// sample round to the first, is where recording was off. Without a
/// midnight crossing that is the wrap gap and the result is `last - first`.
pub fn circular_span(sorted: &[u32]) -> u32 {
    let (Some(&first), Some(&last)) = (sorted.first(), sorted.last()) else {
        return 0;
    };
    let wrap_gap = first + SECONDS_PER_DAY - last;
    let largest_gap = sorted
        .windows(2)
        .map(|w| w[1] - w[0])
        .fold(wrap_gap, u32::max);
    SECONDS_PER_DAY - largest_gap
}

/// Whole hours and minutes; leftover seconds are dropped.
pub fn format_duration(secs: u32) -> String {
    format!("{}h {}m", secs / 3600, (secs % 3600) / 60)
}
