use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::AnalysisConfig;

use super::analyzer::analyze_log_with;
use super::filename::extract_metadata;
use super::model::{LoadedLog, Series};

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Extensions offered in the open dialog. Any text file is accepted by the
/// parser; these are just the common meter exports.
pub const LOG_EXTENSIONS: &[&str] = &["txt", "csv", "log", "tsv"];

/// Load and analyse an SPL log from disk.
pub fn load_file(path: &Path, config: &AnalysisConfig) -> Result<LoadedLog> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading log file {}", path.display()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("")
        .to_string();

    load_str(&file_name, &content, config)
        .with_context(|| format!("analysing {}", path.display()))
}

/// Analyse in-memory log content. `file_name` only feeds the metadata.
pub fn load_str(file_name: &str, content: &str, config: &AnalysisConfig) -> Result<LoadedLog> {
    let (series, stats) = analyze_log_with(content, config)?;
    let metadata = extract_metadata(file_name);

    log::info!(
        "Loaded {file_name}: {} samples over {}, average {:.1} dB ({})",
        stats.sample_count,
        stats.duration_label,
        stats.average_level,
        stats.safety_tier
    );

    Ok(LoadedLog {
        file_name: file_name.to_string(),
        metadata,
        stats,
        series,
    })
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Write the time-sorted series as CSV with a `timestamp,seconds,level_db`
/// header.
pub fn export_series_csv(path: &Path, series: &Series) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for (row_no, record) in series.iter().enumerate() {
        writer
            .serialize(record)
            .with_context(|| format!("writing CSV row {row_no}"))?;
    }
    writer.flush().context("flushing CSV file")?;
    log::info!("Exported {} samples to {}", series.len(), path.display());
    Ok(())
}

/// Write the whole report (metadata, stats and series) as pretty JSON.
pub fn export_report_json(path: &Path, report: &LoadedLog) -> Result<()> {
    let file = File::create(path).context("creating JSON file")?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).context("writing JSON report")?;
    writer.flush().context("flushing JSON file")?;
    log::info!("Exported report for {} to {}", report.file_name, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::analyzer::AnalysisError;

    #[test]
    fn test_load_str_combines_metadata_and_stats() {
        let log = load_str(
            "20231025 Sunday Service.txt",
            "09:00:00 80\n09:10:00 90\n",
            &AnalysisConfig::default(),
        )
        .unwrap();
        assert_eq!(log.metadata.derived_name, "Sunday Service");
        assert_eq!(log.stats.sample_count, 2);
        assert_eq!(log.series.len(), 2);
        assert_eq!(log.stats.duration_label, "0h 10m");
    }

    #[test]
    fn test_load_str_surfaces_no_valid_data() {
        let err = load_str("empty.txt", "nothing here\n", &AnalysisConfig::default())
            .unwrap_err();
        assert_eq!(
            err.downcast_ref::<AnalysisError>(),
            Some(&AnalysisError::NoValidData)
        );
    }

    #[test]
    fn test_load_file_missing() {
        let err = load_file(Path::new("/definitely/not/here.txt"), &AnalysisConfig::default())
            .unwrap_err();
        assert!(format!("{err:#}").contains("reading log file"));
    }
}
