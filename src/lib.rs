//! SPL Analyser – tolerant SPL log parsing, statistics and an egui viewer.
//!
//! ## Module Structure
//!
//! - [`data`] - Parsing, statistics, downsampling, file-name metadata, load/export
//! - [`config`] - Heuristic constants (dB window, peak spacing, safety thresholds)
//! - [`insight`] - Captioning contract and its static fallback
//! - [`state`] - Idle / Analyzing / Complete / Error state machine
//! - [`app`] - eframe::App implementation
//! - [`ui`] - Panels and the SPL chart
//! - [`color`] - Tier and peak colours

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod insight;
pub mod state;
pub mod ui;
