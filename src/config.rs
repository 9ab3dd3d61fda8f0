use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::model::SafetyTier;

/// Environment variable naming an optional JSON config file.
pub const CONFIG_ENV_VAR: &str = "SPL_ANALYSER_CONFIG";

// ---------------------------------------------------------------------------
// Analysis configuration
// ---------------------------------------------------------------------------

/// Heuristic constants used by the analyzer and the viewer.
///
/// The defaults are the literal values the tool has always used; none of
/// them carries regulatory weight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Exclusive lower bound for a value to count as a dB reading.
    pub level_floor_db: f64,
    /// Exclusive upper bound for a value to count as a dB reading.
    pub level_ceiling_db: f64,
    /// Minimum time between two reported peaks.
    pub peak_separation_secs: u32,
    /// How many distinct peaks to report.
    pub peak_count: usize,
    /// Samples with an hour strictly below this count as "before".
    pub morning_cutoff_hour: u32,
    /// Average above this is at least `Moderate`.
    pub moderate_threshold_db: f64,
    /// Average above this is `HighRisk`.
    pub high_risk_threshold_db: f64,
    /// Point budget for the chart.
    pub chart_max_points: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            level_floor_db: 20.0,
            level_ceiling_db: 160.0,
            peak_separation_secs: 300,
            peak_count: 3,
            morning_cutoff_hour: 10,
            moderate_threshold_db: 85.0,
            high_risk_threshold_db: 95.0,
            chart_max_points: 1500,
        }
    }
}

impl AnalysisConfig {
    /// Read a config from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        serde_json::from_str(&text).context("parsing config JSON")
    }

    /// Use the file named by [`CONFIG_ENV_VAR`] if set, defaults otherwise.
    pub fn load_or_default() -> Self {
        let Some(path) = std::env::var_os(CONFIG_ENV_VAR) else {
            return Self::default();
        };
        match Self::from_json_file(Path::new(&path)) {
            Ok(config) => {
                log::info!("Loaded analysis config from {}", Path::new(&path).display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config file, using defaults: {e:#}");
                Self::default()
            }
        }
    }

    /// Whether `value` lies strictly inside the accepted dB window.
    pub fn accepts_level(&self, value: f64) -> bool {
        value > self.level_floor_db && value < self.level_ceiling_db
    }
}

impl SafetyTier {
    /// Classify an average level against the configured thresholds.
    pub fn classify(average_level: f64, config: &AnalysisConfig) -> Self {
        if average_level > config.high_risk_threshold_db {
            SafetyTier::HighRisk
        } else if average_level > config.moderate_threshold_db {
            SafetyTier::Moderate
        } else {
            SafetyTier::Safe
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_window_is_exclusive() {
        let cfg = AnalysisConfig::default();
        assert!(!cfg.accepts_level(20.0));
        assert!(cfg.accepts_level(20.5));
        assert!(cfg.accepts_level(159.9));
        assert!(!cfg.accepts_level(160.0));
        assert!(!cfg.accepts_level(-90.0));
    }

    #[test]
    fn classify_thresholds_are_strict() {
        let cfg = AnalysisConfig::default();
        assert_eq!(SafetyTier::classify(85.0, &cfg), SafetyTier::Safe);
        assert_eq!(SafetyTier::classify(85.01, &cfg), SafetyTier::Moderate);
        assert_eq!(SafetyTier::classify(95.0, &cfg), SafetyTier::Moderate);
        assert_eq!(SafetyTier::classify(95.5, &cfg), SafetyTier::HighRisk);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg: AnalysisConfig =
            serde_json::from_str(r#"{ "peak_separation_secs": 60 }"#).unwrap();
        assert_eq!(cfg.peak_separation_secs, 60);
        assert_eq!(cfg.peak_count, 3);
        assert_eq!(cfg.level_ceiling_db, 160.0);
    }

    #[test]
    fn from_json_file_reports_missing_file() {
        let err = AnalysisConfig::from_json_file(Path::new("/nonexistent/spl.json"))
            .unwrap_err();
        assert!(format!("{err:#}").contains("reading config file"));
    }
}
