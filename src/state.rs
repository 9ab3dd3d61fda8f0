use anyhow::Result;

use crate::config::AnalysisConfig;
use crate::data::downsample::downsample;
use crate::data::model::{LoadedLog, SampleRecord};
use crate::insight::Insight;

// ---------------------------------------------------------------------------
// Analysis phase
// ---------------------------------------------------------------------------

/// Where the viewer is in the load → analyse → report cycle.
#[derive(Debug, Clone, Default)]
pub enum Phase {
    #[default]
    Idle,
    Analyzing,
    Complete(Box<LoadedLog>),
    Error(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
#[derive(Debug, Default)]
pub struct AppState {
    /// Current phase; the loaded report lives in `Phase::Complete`.
    pub phase: Phase,

    /// Heuristic constants used for parsing and charting.
    pub config: AnalysisConfig,

    /// Downsampled series for the chart (cached on completion).
    pub chart_points: Vec<SampleRecord>,

    /// Narrative shown next to the report.
    pub insight: Option<Insight>,

    /// Transient status line (export results etc.).
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: AnalysisConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// File selected: Idle, Complete or Error → Analyzing.
    /// Returns false if an analysis is already running.
    pub fn begin_analysis(&mut self) -> bool {
        if matches!(self.phase, Phase::Analyzing) {
            return false;
        }
        self.clear_report();
        self.phase = Phase::Analyzing;
        true
    }

    /// Analyzing → Complete on success, Analyzing → Error on failure.
    /// Results arriving in any other phase are dropped.
    pub fn finish(&mut self, result: Result<LoadedLog>) {
        if !matches!(self.phase, Phase::Analyzing) {
            log::warn!("Ignoring analysis result outside the analyzing phase");
            return;
        }
        match result {
            Ok(report) => {
                self.chart_points =
                    downsample(report.series.records(), self.config.chart_max_points);
                self.insight = Some(Insight::fallback(&report.metadata));
                self.phase = Phase::Complete(Box::new(report));
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.phase = Phase::Error(format!("{e:#}"));
            }
        }
    }

    /// Any phase → Idle.
    pub fn reset(&mut self) {
        self.clear_report();
        self.phase = Phase::Idle;
    }

    /// The loaded report, if analysis completed.
    pub fn report(&self) -> Option<&LoadedLog> {
        match &self.phase {
            Phase::Complete(report) => Some(report.as_ref()),
            _ => None,
        }
    }

    fn clear_report(&mut self) {
        self.chart_points.clear();
        self.insight = None;
        self.status_message = None;
    }
}
